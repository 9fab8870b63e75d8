use super::types::{sanitize_name, Character, CharacterClass};
use crate::constants::SAVE_FILE_SUFFIX;
use crate::errors::SaveError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const REQUIRED_KEYS: [&str; 12] = [
    "NAME",
    "CLASS",
    "LEVEL",
    "HEALTH",
    "MAX_HEALTH",
    "STRENGTH",
    "MAGIC",
    "EXPERIENCE",
    "GOLD",
    "INVENTORY",
    "ACTIVE_QUESTS",
    "COMPLETED_QUESTS",
];

/// Summary of one save file, for the character select screen.
#[derive(Debug, Clone)]
pub struct CharacterInfo {
    pub name: String,
    pub class: Option<CharacterClass>,
    pub level: u32,
    pub filename: String,
    pub is_corrupted: bool,
}

/// Flat-file character store: one `<name>_save.txt` per character.
pub struct CharacterManager {
    save_dir: PathBuf,
}

impl CharacterManager {
    pub fn new(save_dir: impl Into<PathBuf>) -> io::Result<Self> {
        let save_dir = save_dir.into();
        fs::create_dir_all(&save_dir)?;
        Ok(Self { save_dir })
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.save_dir
            .join(format!("{}{}", sanitize_name(name), SAVE_FILE_SUFFIX))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).exists()
    }

    /// Writes the whole record, replacing any previous save.
    pub fn save_character(&self, character: &Character) -> Result<(), SaveError> {
        fs::create_dir_all(&self.save_dir)?;
        let path = self.path_for(&character.name);
        fs::write(&path, to_save_text(character))?;
        log::info!("saved {} to {}", character.name, path.display());
        Ok(())
    }

    pub fn load_character(&self, name: &str) -> Result<Character, SaveError> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(SaveError::CharacterNotFound(name.to_string()));
        }
        let character = load_from_path(&path)?;
        log::info!("loaded {} (level {})", character.name, character.level);
        Ok(character)
    }

    /// Lists every save in the directory, sorted by name.
    /// Files that fail to parse are included and flagged as corrupted.
    pub fn list_characters(&self) -> Result<Vec<CharacterInfo>, SaveError> {
        let mut characters = Vec::new();

        if !self.save_dir.exists() {
            return Ok(characters);
        }

        for entry in fs::read_dir(&self.save_dir)? {
            let path = entry?.path();

            let filename = match path.file_name().and_then(|s| s.to_str()) {
                Some(name) if name.ends_with(SAVE_FILE_SUFFIX) => name.to_string(),
                _ => continue,
            };

            match load_from_path(&path) {
                Ok(character) => characters.push(CharacterInfo {
                    name: character.name,
                    class: Some(character.class),
                    level: character.level,
                    filename,
                    is_corrupted: false,
                }),
                Err(e) => {
                    log::warn!("skipping corrupted save {}: {}", filename, e);
                    characters.push(CharacterInfo {
                        name: filename.trim_end_matches(SAVE_FILE_SUFFIX).to_string(),
                        class: None,
                        level: 0,
                        filename,
                        is_corrupted: true,
                    });
                }
            }
        }

        characters.sort_by_key(|info| info.name.to_lowercase());
        Ok(characters)
    }

    pub fn delete_character(&self, name: &str) -> Result<(), SaveError> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(SaveError::CharacterNotFound(name.to_string()));
        }
        fs::remove_file(&path)?;
        log::info!("deleted save for {}", name);
        Ok(())
    }
}

fn load_from_path(path: &Path) -> Result<Character, SaveError> {
    let text = fs::read_to_string(path).map_err(SaveError::Corrupted)?;
    from_save_text(&text)
}

/// Renders a character in the `KEY: value` save format.
pub fn to_save_text(character: &Character) -> String {
    let mut lines = vec![
        format!("NAME: {}", character.name),
        format!("CLASS: {}", character.class),
        format!("LEVEL: {}", character.level),
        format!("HEALTH: {}", character.health),
        format!("MAX_HEALTH: {}", character.max_health),
        format!("STRENGTH: {}", character.strength),
        format!("MAGIC: {}", character.magic),
        format!("EXPERIENCE: {}", character.experience),
        format!("GOLD: {}", character.gold),
        format!("INVENTORY: {}", character.inventory.join(",")),
        format!("ACTIVE_QUESTS: {}", character.active_quests.join(",")),
        format!("COMPLETED_QUESTS: {}", character.completed_quests.join(",")),
    ];

    if let Some(weapon) = &character.equipped_weapon {
        lines.push(format!("EQUIPPED_WEAPON: {}", weapon));
    }
    if let Some(armor) = &character.equipped_armor {
        lines.push(format!("EQUIPPED_ARMOR: {}", armor));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Parses the `KEY: value` save format back into a validated character.
pub fn from_save_text(text: &str) -> Result<Character, SaveError> {
    let mut name = None;
    let mut class = None;
    let mut numbers = [None::<u32>; 7];
    let mut lists: [Option<Vec<String>>; 3] = [None, None, None];
    let mut equipped_weapon = None;
    let mut equipped_armor = None;

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let (key, value) = line.split_once(':').ok_or_else(|| {
            SaveError::InvalidData(format!("line {} has no ':' separator", index + 1))
        })?;
        let key = key.trim().to_ascii_uppercase();
        let value = value.trim();

        match key.as_str() {
            "NAME" => name = Some(value.to_string()),
            "CLASS" => {
                let parsed = value
                    .parse::<CharacterClass>()
                    .map_err(|e| SaveError::InvalidData(e.to_string()))?;
                class = Some(parsed);
            }
            "LEVEL" => numbers[0] = Some(parse_number(&key, value)?),
            "HEALTH" => numbers[1] = Some(parse_number(&key, value)?),
            "MAX_HEALTH" => numbers[2] = Some(parse_number(&key, value)?),
            "STRENGTH" => numbers[3] = Some(parse_number(&key, value)?),
            "MAGIC" => numbers[4] = Some(parse_number(&key, value)?),
            "EXPERIENCE" => numbers[5] = Some(parse_number(&key, value)?),
            "GOLD" => numbers[6] = Some(parse_number(&key, value)?),
            "INVENTORY" => lists[0] = Some(parse_list(value)),
            "ACTIVE_QUESTS" => lists[1] = Some(parse_list(value)),
            "COMPLETED_QUESTS" => lists[2] = Some(parse_list(value)),
            "EQUIPPED_WEAPON" => equipped_weapon = non_empty(value),
            "EQUIPPED_ARMOR" => equipped_armor = non_empty(value),
            other => {
                return Err(SaveError::InvalidData(format!(
                    "unknown key '{}' on line {}",
                    other,
                    index + 1
                )))
            }
        }
    }

    let missing = |key: &str| SaveError::InvalidData(format!("missing required key {}", key));

    let name = name.ok_or_else(|| missing(REQUIRED_KEYS[0]))?;
    let class = class.ok_or_else(|| missing(REQUIRED_KEYS[1]))?;
    let mut values = [0u32; 7];
    for (slot, (value, key)) in values
        .iter_mut()
        .zip(numbers.iter().zip(&REQUIRED_KEYS[2..9]))
    {
        *slot = value.ok_or_else(|| missing(*key))?;
    }
    let [inventory, active_quests, completed_quests] = lists;
    let inventory = inventory.ok_or_else(|| missing(REQUIRED_KEYS[9]))?;
    let active_quests = active_quests.ok_or_else(|| missing(REQUIRED_KEYS[10]))?;
    let completed_quests = completed_quests.ok_or_else(|| missing(REQUIRED_KEYS[11]))?;

    let [level, health, max_health, strength, magic, experience, gold] = values;
    let character = Character {
        name,
        class,
        level,
        experience,
        health,
        max_health,
        strength,
        magic,
        gold,
        inventory,
        active_quests,
        completed_quests,
        equipped_weapon,
        equipped_armor,
    };

    character.validate().map_err(SaveError::InvalidData)?;
    Ok(character)
}

fn parse_number(key: &str, value: &str) -> Result<u32, SaveError> {
    value.parse::<u32>().map_err(|_| {
        SaveError::InvalidData(format!("{} must be a non-negative integer, got '{}'", key, value))
    })
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Character {
        let mut hero = Character::new("Mage the Great", CharacterClass::Mage).unwrap();
        hero.level = 3;
        hero.experience = 42;
        hero.gold = 17;
        hero.inventory = vec!["health_potion".to_string(), "health_potion".to_string()];
        hero.active_quests = vec!["goblin_menace".to_string()];
        hero.completed_quests = vec!["first_steps".to_string()];
        hero.equipped_weapon = Some("iron_sword".to_string());
        hero
    }

    #[test]
    fn test_save_text_layout() {
        let text = to_save_text(&sample());
        assert!(text.starts_with("NAME: Mage the Great\nCLASS: Mage\nLEVEL: 3\n"));
        assert!(text.contains("INVENTORY: health_potion,health_potion\n"));
        assert!(text.contains("EQUIPPED_WEAPON: iron_sword\n"));
        assert!(!text.contains("EQUIPPED_ARMOR"));
    }

    #[test]
    fn test_empty_lists_parse_as_empty() {
        let hero = Character::new("Hero", CharacterClass::Rogue).unwrap();
        let text = to_save_text(&hero);
        assert!(text.contains("ACTIVE_QUESTS: \n") || text.contains("ACTIVE_QUESTS:\n"));

        let loaded = from_save_text(&text).unwrap();
        assert!(loaded.inventory.is_empty());
        assert!(loaded.active_quests.is_empty());
        assert_eq!(loaded, hero);
    }

    #[test]
    fn test_missing_key_is_invalid() {
        let text = to_save_text(&sample()).replace("GOLD: 17\n", "");
        match from_save_text(&text) {
            Err(SaveError::InvalidData(msg)) => assert!(msg.contains("GOLD")),
            other => panic!("expected InvalidData, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_value_is_invalid() {
        let text = to_save_text(&sample()).replace("LEVEL: 3", "LEVEL: three");
        assert!(matches!(from_save_text(&text), Err(SaveError::InvalidData(_))));
    }

    #[test]
    fn test_line_without_colon_is_invalid() {
        let text = format!("{}garbage\n", to_save_text(&sample()));
        assert!(matches!(from_save_text(&text), Err(SaveError::InvalidData(_))));
    }

    #[test]
    fn test_unknown_key_is_invalid() {
        let text = format!("{}MOOD: happy\n", to_save_text(&sample()));
        assert!(matches!(from_save_text(&text), Err(SaveError::InvalidData(_))));
    }

    #[test]
    fn test_save_and_load_character() {
        let dir = TempDir::new().unwrap();
        let manager = CharacterManager::new(dir.path()).unwrap();
        let hero = sample();

        manager.save_character(&hero).unwrap();
        assert!(dir.path().join("mage_the_great_save.txt").exists());

        let loaded = manager.load_character("Mage the Great").unwrap();
        assert_eq!(loaded, hero);
    }

    #[test]
    fn test_load_missing_character() {
        let dir = TempDir::new().unwrap();
        let manager = CharacterManager::new(dir.path()).unwrap();
        assert!(matches!(
            manager.load_character("Nobody"),
            Err(SaveError::CharacterNotFound(_))
        ));
    }

    #[test]
    fn test_list_characters_flags_corrupted_saves() {
        let dir = TempDir::new().unwrap();
        let manager = CharacterManager::new(dir.path()).unwrap();

        manager
            .save_character(&Character::new("Zed", CharacterClass::Warrior).unwrap())
            .unwrap();
        manager
            .save_character(&Character::new("Abe", CharacterClass::Cleric).unwrap())
            .unwrap();
        fs::write(dir.path().join("broken_save.txt"), "not a save").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let list = manager.list_characters().unwrap();
        let names: Vec<&str> = list.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Abe", "broken", "Zed"]);
        assert!(list[1].is_corrupted);
        assert!(!list[0].is_corrupted);
        assert_eq!(list[2].class, Some(CharacterClass::Warrior));
    }

    #[test]
    fn test_delete_character() {
        let dir = TempDir::new().unwrap();
        let manager = CharacterManager::new(dir.path()).unwrap();
        let hero = Character::new("Hero", CharacterClass::Rogue).unwrap();

        manager.save_character(&hero).unwrap();
        assert!(manager.exists("Hero"));

        manager.delete_character("Hero").unwrap();
        assert!(!manager.exists("Hero"));
        assert!(matches!(
            manager.delete_character("Hero"),
            Err(SaveError::CharacterNotFound(_))
        ));
    }
}
