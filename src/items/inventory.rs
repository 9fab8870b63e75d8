//! Inventory and equipment mutation on a character.
//!
//! Equipped items live outside the inventory; their stat bonus is applied on
//! equip and stripped again on unequip.

use super::types::{EquipSlot, ItemCatalog, ItemDefinition, ItemType, Stat, StatEffect};
use crate::character::Character;
use crate::constants::MAX_INVENTORY_SIZE;
use crate::errors::InventoryError;

pub fn add_item(character: &mut Character, item_id: &str) -> Result<(), InventoryError> {
    if character.inventory.len() >= MAX_INVENTORY_SIZE {
        return Err(InventoryError::InventoryFull(MAX_INVENTORY_SIZE));
    }
    character.inventory.push(item_id.to_string());
    Ok(())
}

/// Removes one copy of the item.
pub fn remove_item(character: &mut Character, item_id: &str) -> Result<(), InventoryError> {
    let position = character
        .inventory
        .iter()
        .position(|id| id == item_id)
        .ok_or_else(|| InventoryError::ItemNotFound(item_id.to_string()))?;
    character.inventory.remove(position);
    Ok(())
}

pub fn has_item(character: &Character, item_id: &str) -> bool {
    character.inventory.iter().any(|id| id == item_id)
}

pub fn count_item(character: &Character, item_id: &str) -> usize {
    character.inventory.iter().filter(|id| *id == item_id).count()
}

pub fn space_remaining(character: &Character) -> usize {
    MAX_INVENTORY_SIZE.saturating_sub(character.inventory.len())
}

/// Empties the inventory and returns what was in it.
pub fn clear_inventory(character: &mut Character) -> Vec<String> {
    std::mem::take(&mut character.inventory)
}

fn add_signed(base: u32, delta: i32) -> u32 {
    if delta >= 0 {
        base.saturating_add(delta.unsigned_abs())
    } else {
        base.saturating_sub(delta.unsigned_abs())
    }
}

/// Applies a stat change. Health stays within `0..=max_health`; max health
/// never drops below 1 and pulls health down with it.
pub fn apply_stat_effect(character: &mut Character, effect: StatEffect) {
    match effect.stat {
        Stat::Health => {
            character.health = add_signed(character.health, effect.value).min(character.max_health);
        }
        Stat::MaxHealth => {
            character.max_health = add_signed(character.max_health, effect.value).max(1);
            character.health = character.health.min(character.max_health);
        }
        Stat::Strength => character.strength = add_signed(character.strength, effect.value),
        Stat::Magic => character.magic = add_signed(character.magic, effect.value),
    }
}

/// Consumes one copy of a consumable and applies its effect.
pub fn use_item(character: &mut Character, item: &ItemDefinition) -> Result<(), InventoryError> {
    if !has_item(character, &item.id) {
        return Err(InventoryError::ItemNotFound(item.id.clone()));
    }
    if item.item_type != ItemType::Consumable {
        return Err(InventoryError::InvalidItemType {
            item_id: item.id.clone(),
            actual: item.item_type.to_string(),
        });
    }

    apply_stat_effect(character, item.effect);
    remove_item(character, &item.id)?;
    log::info!("{} used {} ({})", character.name, item.name, item.effect);
    Ok(())
}

fn slot(character: &mut Character, slot: EquipSlot) -> &mut Option<String> {
    match slot {
        EquipSlot::Weapon => &mut character.equipped_weapon,
        EquipSlot::Armor => &mut character.equipped_armor,
    }
}

fn equip(
    character: &mut Character,
    catalog: &ItemCatalog,
    item_id: &str,
    expected: EquipSlot,
) -> Result<Option<String>, InventoryError> {
    let item = catalog
        .get(item_id)
        .ok_or_else(|| InventoryError::ItemNotFound(item_id.to_string()))?;
    if !has_item(character, item_id) {
        return Err(InventoryError::ItemNotFound(item_id.to_string()));
    }
    if item.item_type != expected.item_type() {
        return Err(InventoryError::InvalidItemType {
            item_id: item_id.to_string(),
            actual: item.item_type.to_string(),
        });
    }
    item.check_equipment_effect()
        .map_err(|reason| InventoryError::InvalidEquipmentEffect {
            item_id: item_id.to_string(),
            reason,
        })?;

    remove_item(character, item_id)?;

    let previous = slot(character, expected).take();
    if let Some(old_id) = &previous {
        if let Some(old) = catalog.get(old_id) {
            apply_stat_effect(character, old.effect.reversed());
        }
        // The new item just freed a slot, so this cannot overflow
        character.inventory.push(old_id.clone());
    }

    apply_stat_effect(character, item.effect);
    *slot(character, expected) = Some(item_id.to_string());

    log::info!("{} equipped {}", character.name, item.name);
    Ok(previous)
}

fn unequip(
    character: &mut Character,
    catalog: &ItemCatalog,
    from: EquipSlot,
) -> Result<Option<String>, InventoryError> {
    if slot(character, from).is_none() {
        return Ok(None);
    }
    if space_remaining(character) == 0 {
        return Err(InventoryError::InventoryFull(MAX_INVENTORY_SIZE));
    }

    let item_id = slot(character, from).take();
    if let Some(id) = &item_id {
        if let Some(item) = catalog.get(id) {
            apply_stat_effect(character, item.effect.reversed());
        }
        character.inventory.push(id.clone());
        log::info!("{} unequipped {}", character.name, id);
    }
    Ok(item_id)
}

/// Equips a weapon from the inventory. Returns the id of the weapon it
/// replaced, which goes back into the inventory.
pub fn equip_weapon(
    character: &mut Character,
    catalog: &ItemCatalog,
    item_id: &str,
) -> Result<Option<String>, InventoryError> {
    equip(character, catalog, item_id, EquipSlot::Weapon)
}

pub fn equip_armor(
    character: &mut Character,
    catalog: &ItemCatalog,
    item_id: &str,
) -> Result<Option<String>, InventoryError> {
    equip(character, catalog, item_id, EquipSlot::Armor)
}

/// Moves the equipped weapon back into the inventory.
/// Returns `None` when nothing was equipped.
pub fn unequip_weapon(
    character: &mut Character,
    catalog: &ItemCatalog,
) -> Result<Option<String>, InventoryError> {
    unequip(character, catalog, EquipSlot::Weapon)
}

pub fn unequip_armor(
    character: &mut Character,
    catalog: &ItemCatalog,
) -> Result<Option<String>, InventoryError> {
    unequip(character, catalog, EquipSlot::Armor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterClass;

    fn item(id: &str, item_type: ItemType, effect: &str) -> ItemDefinition {
        ItemDefinition {
            id: id.to_string(),
            name: id.replace('_', " "),
            item_type,
            effect: StatEffect::parse(effect).unwrap(),
            cost: 50,
            description: String::new(),
        }
    }

    fn catalog() -> ItemCatalog {
        ItemCatalog::from_definitions(vec![
            item("health_potion", ItemType::Consumable, "health:20"),
            item("iron_sword", ItemType::Weapon, "strength:5"),
            item("steel_sword", ItemType::Weapon, "strength:10"),
            item("leather_armor", ItemType::Armor, "max_health:10"),
        ])
        .unwrap()
    }

    fn hero() -> Character {
        Character::new("Hero", CharacterClass::Warrior).unwrap()
    }

    #[test]
    fn test_add_item_respects_capacity() {
        let mut c = hero();
        for _ in 0..MAX_INVENTORY_SIZE {
            add_item(&mut c, "health_potion").unwrap();
        }
        assert_eq!(space_remaining(&c), 0);
        assert_eq!(
            add_item(&mut c, "health_potion"),
            Err(InventoryError::InventoryFull(20))
        );
        assert_eq!(count_item(&c, "health_potion"), 20);
    }

    #[test]
    fn test_remove_item_removes_one_copy() {
        let mut c = hero();
        add_item(&mut c, "health_potion").unwrap();
        add_item(&mut c, "health_potion").unwrap();
        remove_item(&mut c, "health_potion").unwrap();
        assert_eq!(count_item(&c, "health_potion"), 1);
        assert_eq!(
            remove_item(&mut c, "iron_sword"),
            Err(InventoryError::ItemNotFound("iron_sword".to_string()))
        );
    }

    #[test]
    fn test_clear_inventory_returns_items() {
        let mut c = hero();
        add_item(&mut c, "a").unwrap();
        add_item(&mut c, "b").unwrap();
        assert_eq!(clear_inventory(&mut c), vec!["a".to_string(), "b".to_string()]);
        assert!(c.inventory.is_empty());
    }

    #[test]
    fn test_use_consumable_heals_and_consumes() {
        let cat = catalog();
        let mut c = hero();
        c.health = 110;
        add_item(&mut c, "health_potion").unwrap();

        use_item(&mut c, cat.get("health_potion").unwrap()).unwrap();
        assert_eq!(c.health, 120);
        assert!(!has_item(&c, "health_potion"));
    }

    #[test]
    fn test_use_rejects_weapons_and_missing_items() {
        let cat = catalog();
        let mut c = hero();
        assert!(matches!(
            use_item(&mut c, cat.get("health_potion").unwrap()),
            Err(InventoryError::ItemNotFound(_))
        ));

        add_item(&mut c, "iron_sword").unwrap();
        assert!(matches!(
            use_item(&mut c, cat.get("iron_sword").unwrap()),
            Err(InventoryError::InvalidItemType { .. })
        ));
        assert!(has_item(&c, "iron_sword"));
    }

    #[test]
    fn test_equip_weapon_swaps_bonus() {
        let cat = catalog();
        let mut c = hero();
        add_item(&mut c, "iron_sword").unwrap();
        add_item(&mut c, "steel_sword").unwrap();

        assert_eq!(equip_weapon(&mut c, &cat, "iron_sword"), Ok(None));
        assert_eq!(c.strength, 20);
        assert_eq!(c.equipped_weapon.as_deref(), Some("iron_sword"));
        assert!(!has_item(&c, "iron_sword"));

        assert_eq!(
            equip_weapon(&mut c, &cat, "steel_sword"),
            Ok(Some("iron_sword".to_string()))
        );
        assert_eq!(c.strength, 25);
        assert!(has_item(&c, "iron_sword"));
        assert!(!has_item(&c, "steel_sword"));
    }

    #[test]
    fn test_equip_wrong_type() {
        let cat = catalog();
        let mut c = hero();
        add_item(&mut c, "leather_armor").unwrap();
        assert!(matches!(
            equip_weapon(&mut c, &cat, "leather_armor"),
            Err(InventoryError::InvalidItemType { .. })
        ));
        assert_eq!(equip_armor(&mut c, &cat, "leather_armor"), Ok(None));
        assert_eq!(c.max_health, 130);
        assert_eq!(c.health, 120);
    }

    #[test]
    fn test_unequip_returns_item_and_strips_bonus() {
        let cat = catalog();
        let mut c = hero();
        assert_eq!(unequip_armor(&mut c, &cat), Ok(None));

        add_item(&mut c, "leather_armor").unwrap();
        equip_armor(&mut c, &cat, "leather_armor").unwrap();
        c.health = c.max_health;

        assert_eq!(
            unequip_armor(&mut c, &cat),
            Ok(Some("leather_armor".to_string()))
        );
        assert_eq!(c.max_health, 120);
        assert_eq!(c.health, 120);
        assert!(c.equipped_armor.is_none());
        assert!(has_item(&c, "leather_armor"));
    }

    #[test]
    fn test_unequip_with_full_inventory() {
        let cat = catalog();
        let mut c = hero();
        add_item(&mut c, "iron_sword").unwrap();
        equip_weapon(&mut c, &cat, "iron_sword").unwrap();
        for _ in 0..MAX_INVENTORY_SIZE {
            add_item(&mut c, "health_potion").unwrap();
        }
        assert_eq!(
            unequip_weapon(&mut c, &cat),
            Err(InventoryError::InventoryFull(20))
        );
        assert_eq!(c.equipped_weapon.as_deref(), Some("iron_sword"));
        assert_eq!(c.strength, 20);
    }

    #[test]
    fn test_negative_equipment_is_refused_and_stats_survive() {
        let cat = ItemCatalog::from_definitions(vec![
            item("cursed_blade", ItemType::Weapon, "strength:-20"),
            item("iron_sword", ItemType::Weapon, "strength:5"),
        ])
        .unwrap();
        let mut c = hero();
        add_item(&mut c, "cursed_blade").unwrap();

        assert!(matches!(
            equip_weapon(&mut c, &cat, "cursed_blade"),
            Err(InventoryError::InvalidEquipmentEffect { item_id, .. }) if item_id == "cursed_blade"
        ));
        assert_eq!(c.strength, 15);
        assert!(c.equipped_weapon.is_none());
        assert!(has_item(&c, "cursed_blade"));

        add_item(&mut c, "iron_sword").unwrap();
        equip_weapon(&mut c, &cat, "iron_sword").unwrap();
        unequip_weapon(&mut c, &cat).unwrap();
        assert_eq!(c.strength, 15);
    }

    #[test]
    fn test_max_health_never_below_one() {
        let mut c = hero();
        apply_stat_effect(
            &mut c,
            StatEffect {
                stat: Stat::MaxHealth,
                value: -500,
            },
        );
        assert_eq!(c.max_health, 1);
        assert_eq!(c.health, 1);

        apply_stat_effect(
            &mut c,
            StatEffect {
                stat: Stat::Health,
                value: -5,
            },
        );
        assert_eq!(c.health, 0);
    }
}
