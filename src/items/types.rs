use crate::errors::DataError;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    Weapon,
    Armor,
    Consumable,
}

impl ItemType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "weapon" => Some(ItemType::Weapon),
            "armor" => Some(ItemType::Armor),
            "consumable" => Some(ItemType::Consumable),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ItemType::Weapon => "weapon",
            ItemType::Armor => "armor",
            ItemType::Consumable => "consumable",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}

/// Equipment slot on the character. Consumables have none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquipSlot {
    Weapon,
    Armor,
}

impl EquipSlot {
    pub fn for_item_type(item_type: ItemType) -> Option<Self> {
        match item_type {
            ItemType::Weapon => Some(EquipSlot::Weapon),
            ItemType::Armor => Some(EquipSlot::Armor),
            ItemType::Consumable => None,
        }
    }

    pub fn item_type(&self) -> ItemType {
        match self {
            EquipSlot::Weapon => ItemType::Weapon,
            EquipSlot::Armor => ItemType::Armor,
        }
    }
}

/// Character stat an item can modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Health,
    MaxHealth,
    Strength,
    Magic,
}

impl Stat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "health" => Some(Stat::Health),
            "max_health" => Some(Stat::MaxHealth),
            "strength" => Some(Stat::Strength),
            "magic" => Some(Stat::Magic),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Stat::Health => "health",
            Stat::MaxHealth => "max_health",
            Stat::Strength => "strength",
            Stat::Magic => "magic",
        }
    }
}

/// Parsed form of an item's `stat:value` effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatEffect {
    pub stat: Stat,
    pub value: i32,
}

impl StatEffect {
    pub fn parse(text: &str) -> Result<Self, String> {
        let (stat, value) = text
            .split_once(':')
            .ok_or_else(|| format!("effect '{}' is not in stat:value form", text))?;
        let stat = Stat::parse(stat).ok_or_else(|| format!("unknown stat '{}'", stat.trim()))?;
        let value = value
            .trim()
            .parse::<i32>()
            .map_err(|_| format!("effect value '{}' is not an integer", value.trim()))?;
        Ok(Self { stat, value })
    }

    /// The same effect with the sign flipped, used to strip an equipment bonus.
    pub fn reversed(&self) -> Self {
        Self {
            stat: self.stat,
            value: self.value.saturating_neg(),
        }
    }
}

impl fmt::Display for StatEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.stat.key(), self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDefinition {
    pub id: String,
    pub name: String,
    pub item_type: ItemType,
    pub effect: StatEffect,
    pub cost: u32,
    pub description: String,
}

impl ItemDefinition {
    /// Equipment bonuses are stripped by applying the reversed effect, which
    /// only restores the old stats when the bonus was applied without
    /// clamping. Weapons and armor may therefore only raise max health,
    /// strength or magic.
    pub fn check_equipment_effect(&self) -> Result<(), String> {
        if self.item_type == ItemType::Consumable {
            return Ok(());
        }
        if self.effect.stat == Stat::Health {
            return Err(format!(
                "{} '{}' cannot carry a health effect; use max_health",
                self.item_type, self.id
            ));
        }
        if self.effect.value < 0 {
            return Err(format!(
                "{} '{}' has a negative effect ({})",
                self.item_type, self.id, self.effect
            ));
        }
        Ok(())
    }
}

/// Immutable id -> item table, iterated in load order.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: Vec<ItemDefinition>,
    index: HashMap<String, usize>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(
        definitions: impl IntoIterator<Item = ItemDefinition>,
    ) -> Result<Self, DataError> {
        let mut catalog = Self::new();
        for item in definitions {
            catalog.insert(item)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, item: ItemDefinition) -> Result<(), DataError> {
        if self.index.contains_key(&item.id) {
            return Err(DataError::DuplicateId(item.id));
        }
        self.index.insert(item.id.clone(), self.items.len());
        self.items.push(item);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ItemDefinition> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_effect_parse() {
        assert_eq!(
            StatEffect::parse("strength:5"),
            Ok(StatEffect {
                stat: Stat::Strength,
                value: 5
            })
        );
        assert_eq!(
            StatEffect::parse("max_health: -10"),
            Ok(StatEffect {
                stat: Stat::MaxHealth,
                value: -10
            })
        );
        assert!(StatEffect::parse("luck:5").is_err());
        assert!(StatEffect::parse("strength").is_err());
        assert!(StatEffect::parse("strength:lots").is_err());
    }

    #[test]
    fn test_stat_effect_display_matches_file_form() {
        let effect = StatEffect::parse("health:20").unwrap();
        assert_eq!(effect.to_string(), "health:20");
        assert_eq!(effect.reversed().value, -20);
    }

    fn definition(item_type: ItemType, effect: &str) -> ItemDefinition {
        ItemDefinition {
            id: "thing".to_string(),
            name: "Thing".to_string(),
            item_type,
            effect: StatEffect::parse(effect).unwrap(),
            cost: 1,
            description: String::new(),
        }
    }

    #[test]
    fn test_equipment_effects_must_be_reversible() {
        assert!(definition(ItemType::Weapon, "strength:5")
            .check_equipment_effect()
            .is_ok());
        assert!(definition(ItemType::Armor, "max_health:15")
            .check_equipment_effect()
            .is_ok());
        assert!(definition(ItemType::Weapon, "strength:-20")
            .check_equipment_effect()
            .is_err());
        assert!(definition(ItemType::Armor, "health:10")
            .check_equipment_effect()
            .is_err());
        // Consumables are spent, never reversed
        assert!(definition(ItemType::Consumable, "health:-10")
            .check_equipment_effect()
            .is_ok());
    }

    #[test]
    fn test_equip_slot_for_item_type() {
        assert_eq!(
            EquipSlot::for_item_type(ItemType::Weapon),
            Some(EquipSlot::Weapon)
        );
        assert_eq!(EquipSlot::for_item_type(ItemType::Consumable), None);
        assert_eq!(EquipSlot::Armor.item_type(), ItemType::Armor);
    }

    #[test]
    fn test_item_type_parse() {
        assert_eq!(ItemType::parse("Weapon"), Some(ItemType::Weapon));
        assert_eq!(ItemType::parse("consumable"), Some(ItemType::Consumable));
        assert_eq!(ItemType::parse("trinket"), None);
    }
}
