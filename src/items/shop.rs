use super::inventory::{has_item, remove_item, space_remaining};
use super::types::ItemDefinition;
use crate::character::Character;
use crate::constants::{MAX_INVENTORY_SIZE, SELL_PRICE_DIVISOR};
use crate::errors::InventoryError;

/// Gold paid back when selling an item.
pub fn sell_price(item: &ItemDefinition) -> u32 {
    item.cost / SELL_PRICE_DIVISOR
}

/// Buys one copy of `item`. Gold and space are both checked before anything changes.
pub fn purchase_item(character: &mut Character, item: &ItemDefinition) -> Result<(), InventoryError> {
    if character.gold < item.cost {
        return Err(InventoryError::InsufficientGold {
            needed: item.cost,
            available: character.gold,
        });
    }
    if space_remaining(character) == 0 {
        return Err(InventoryError::InventoryFull(MAX_INVENTORY_SIZE));
    }

    character.gold -= item.cost;
    character.inventory.push(item.id.clone());
    log::info!("{} bought {} for {} gold", character.name, item.name, item.cost);
    Ok(())
}

/// Sells one copy of `item` for half its cost. Returns the gold received.
pub fn sell_item(character: &mut Character, item: &ItemDefinition) -> Result<u32, InventoryError> {
    if !has_item(character, &item.id) {
        return Err(InventoryError::ItemNotFound(item.id.clone()));
    }

    remove_item(character, &item.id)?;
    let price = sell_price(item);
    character.add_gold(price);
    log::info!("{} sold {} for {} gold", character.name, item.name, price);
    Ok(price)
}
