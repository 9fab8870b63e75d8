use crate::constants::{MAX_INVENTORY_SIZE, MAX_NAME_LENGTH, STARTING_GOLD, STARTING_LEVEL};
use crate::errors::CharacterError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
    Cleric,
}

/// Starting vitals and combat stats for a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseStats {
    pub health: u32,
    pub strength: u32,
    pub magic: u32,
}

impl CharacterClass {
    pub fn all() -> [CharacterClass; 4] {
        [
            CharacterClass::Warrior,
            CharacterClass::Mage,
            CharacterClass::Rogue,
            CharacterClass::Cleric,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Mage => "Mage",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Cleric => "Cleric",
        }
    }

    pub fn base_stats(&self) -> BaseStats {
        match self {
            CharacterClass::Warrior => BaseStats {
                health: 120,
                strength: 15,
                magic: 5,
            },
            CharacterClass::Mage => BaseStats {
                health: 80,
                strength: 8,
                magic: 20,
            },
            CharacterClass::Rogue => BaseStats {
                health: 90,
                strength: 12,
                magic: 10,
            },
            CharacterClass::Cleric => BaseStats {
                health: 100,
                strength: 10,
                magic: 15,
            },
        }
    }

    /// Display name of the class special ability.
    pub fn ability_name(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Power Strike",
            CharacterClass::Mage => "Fireball",
            CharacterClass::Rogue => "Critical Strike",
            CharacterClass::Cleric => "Heal",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Sturdy frontliner. Power Strike hits for double strength.",
            CharacterClass::Mage => "Fragile caster. Fireball hits for double magic.",
            CharacterClass::Rogue => "Gambler. Critical Strike has a 50% chance of triple damage.",
            CharacterClass::Cleric => "Healer. Heal restores 30 health mid-battle.",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CharacterClass {
    type Err = CharacterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        CharacterClass::all()
            .into_iter()
            .find(|class| class.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CharacterError::InvalidClass(trimmed.to_string()))
    }
}

/// Experience and gold handed out by a finished quest or a won battle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rewards {
    pub xp: u32,
    pub gold: u32,
}

/// A playable hero and everything the save file records about them.
///
/// Quest ids live in two ordered lists that must never overlap; the quest
/// engine is the only code that moves ids between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub experience: u32,
    pub health: u32,
    pub max_health: u32,
    pub strength: u32,
    pub magic: u32,
    pub gold: u32,
    pub inventory: Vec<String>,
    pub active_quests: Vec<String>,
    pub completed_quests: Vec<String>,
    pub equipped_weapon: Option<String>,
    pub equipped_armor: Option<String>,
}

impl Character {
    /// Creates a level 1 character with the class's base stats.
    pub fn new(name: &str, class: CharacterClass) -> Result<Self, CharacterError> {
        validate_name(name).map_err(CharacterError::InvalidName)?;

        let stats = class.base_stats();
        Ok(Self {
            name: name.trim().to_string(),
            class,
            level: STARTING_LEVEL,
            experience: 0,
            health: stats.health,
            max_health: stats.health,
            strength: stats.strength,
            magic: stats.magic,
            gold: STARTING_GOLD,
            inventory: Vec::new(),
            active_quests: Vec::new(),
            completed_quests: Vec::new(),
            equipped_weapon: None,
            equipped_armor: None,
        })
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    pub fn health_ratio(&self) -> f64 {
        if self.max_health == 0 {
            return 0.0;
        }
        (self.health as f64 / self.max_health as f64).clamp(0.0, 1.0)
    }

    /// Checks the record invariants a loaded save must satisfy.
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;

        if self.level < 1 {
            return Err("level must be at least 1".to_string());
        }
        if self.max_health == 0 {
            return Err("max health must be positive".to_string());
        }
        if self.health > self.max_health {
            return Err(format!(
                "health {} exceeds max health {}",
                self.health, self.max_health
            ));
        }
        if self.inventory.len() > MAX_INVENTORY_SIZE {
            return Err(format!(
                "inventory holds {} items (capacity {})",
                self.inventory.len(),
                MAX_INVENTORY_SIZE
            ));
        }
        if let Some(id) = self
            .active_quests
            .iter()
            .find(|id| self.completed_quests.contains(id))
        {
            return Err(format!("quest '{}' is both active and completed", id));
        }

        Ok(())
    }
}

pub fn validate_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(format!(
            "Name must be {} characters or less",
            MAX_NAME_LENGTH
        ));
    }

    let valid_chars = trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_');

    if !valid_chars {
        return Err(
            "Name can only contain letters, numbers, spaces, hyphens, and underscores".to_string(),
        );
    }

    Ok(())
}

/// File-system friendly form of a character name.
pub fn sanitize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_character_uses_class_base_stats() {
        let hero = Character::new("Aria", CharacterClass::Mage).unwrap();
        assert_eq!(hero.level, 1);
        assert_eq!(hero.experience, 0);
        assert_eq!(hero.health, 80);
        assert_eq!(hero.max_health, 80);
        assert_eq!(hero.strength, 8);
        assert_eq!(hero.magic, 20);
        assert_eq!(hero.gold, 100);
        assert!(hero.inventory.is_empty());
        assert!(hero.active_quests.is_empty());
        assert!(hero.completed_quests.is_empty());
    }

    #[test]
    fn test_new_character_rejects_bad_name() {
        let err = Character::new("bad@name", CharacterClass::Rogue).unwrap_err();
        assert!(matches!(err, CharacterError::InvalidName(_)));
    }

    #[test]
    fn test_class_parsing_is_case_insensitive() {
        assert_eq!("warrior".parse::<CharacterClass>(), Ok(CharacterClass::Warrior));
        assert_eq!(" CLERIC ".parse::<CharacterClass>(), Ok(CharacterClass::Cleric));
        assert_eq!(
            "Bard".parse::<CharacterClass>(),
            Err(CharacterError::InvalidClass("Bard".to_string()))
        );
    }

    #[test]
    fn test_validate_name_valid() {
        assert!(validate_name("Hero").is_ok());
        assert!(validate_name("Test 123").is_ok());
        assert!(validate_name("Warrior-2").is_ok());
        assert!(validate_name("under_score").is_ok());
    }

    #[test]
    fn test_validate_name_invalid() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name("12345678901234567").is_err()); // 17 chars
        assert!(validate_name("hello!world").is_err());
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Hero"), "hero");
        assert_eq!(sanitize_name("Mage the Great"), "mage_the_great");
        assert_eq!(sanitize_name("Warrior-2"), "warrior-2");
        assert_eq!(sanitize_name("   Spaces   "), "spaces");
    }

    #[test]
    fn test_validate_detects_overlapping_quests() {
        let mut hero = Character::new("Hero", CharacterClass::Warrior).unwrap();
        assert!(hero.validate().is_ok());

        hero.active_quests.push("first_steps".to_string());
        hero.completed_quests.push("first_steps".to_string());
        assert!(hero.validate().is_err());
    }

    #[test]
    fn test_validate_detects_health_above_max() {
        let mut hero = Character::new("Hero", CharacterClass::Cleric).unwrap();
        hero.health = hero.max_health + 1;
        assert!(hero.validate().is_err());
    }
}
