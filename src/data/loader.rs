use super::parser::{parse_blocks, Block};
use crate::errors::DataError;
use crate::items::{ItemCatalog, ItemDefinition, ItemType, StatEffect};
use crate::quests::{Prerequisite, QuestCatalog, QuestDefinition};
use std::fs;
use std::path::Path;

const QUEST_KEYS: [&str; 7] = [
    "QUEST_ID",
    "TITLE",
    "DESCRIPTION",
    "REWARD_XP",
    "REWARD_GOLD",
    "REQUIRED_LEVEL",
    "PREREQUISITE",
];

const ITEM_KEYS: [&str; 6] = ["ITEM_ID", "NAME", "TYPE", "EFFECT", "COST", "DESCRIPTION"];

fn read_data_file(path: &Path) -> Result<String, DataError> {
    if !path.exists() {
        return Err(DataError::MissingFile(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

fn quest_from_block(block: &Block) -> Result<QuestDefinition, DataError> {
    block.check_keys(&QUEST_KEYS)?;

    let required_level = block.required_u32("REQUIRED_LEVEL")?;
    if required_level < 1 {
        return Err(DataError::InvalidFormat {
            line: block.required("REQUIRED_LEVEL")?.line,
            reason: "REQUIRED_LEVEL must be at least 1".to_string(),
        });
    }

    Ok(QuestDefinition {
        id: block.required_str("QUEST_ID")?,
        title: block.required_str("TITLE")?,
        description: block.required_str("DESCRIPTION")?,
        reward_xp: block.required_u32("REWARD_XP")?,
        reward_gold: block.required_u32("REWARD_GOLD")?,
        required_level,
        prerequisite: Prerequisite::parse(&block.required("PREREQUISITE")?.value),
    })
}

fn item_from_block(block: &Block) -> Result<ItemDefinition, DataError> {
    block.check_keys(&ITEM_KEYS)?;

    let type_field = block.required("TYPE")?;
    let item_type = ItemType::parse(&type_field.value).ok_or_else(|| DataError::InvalidFormat {
        line: type_field.line,
        reason: format!("unknown item type '{}'", type_field.value),
    })?;

    let effect_field = block.required("EFFECT")?;
    let effect = StatEffect::parse(&effect_field.value).map_err(|reason| {
        DataError::InvalidFormat {
            line: effect_field.line,
            reason,
        }
    })?;

    let item = ItemDefinition {
        id: block.required_str("ITEM_ID")?,
        name: block.required_str("NAME")?,
        item_type,
        effect,
        cost: block.required_u32("COST")?,
        description: block.required_str("DESCRIPTION")?,
    };
    item.check_equipment_effect()
        .map_err(|reason| DataError::InvalidFormat {
            line: effect_field.line,
            reason,
        })?;
    Ok(item)
}

pub fn parse_quests(text: &str) -> Result<QuestCatalog, DataError> {
    let mut catalog = QuestCatalog::new();
    for block in parse_blocks(text)? {
        catalog.insert(quest_from_block(&block)?)?;
    }
    Ok(catalog)
}

pub fn parse_items(text: &str) -> Result<ItemCatalog, DataError> {
    let mut catalog = ItemCatalog::new();
    for block in parse_blocks(text)? {
        catalog.insert(item_from_block(&block)?)?;
    }
    Ok(catalog)
}

pub fn load_quests(path: &Path) -> Result<QuestCatalog, DataError> {
    let catalog = parse_quests(&read_data_file(path)?)?;
    log::info!("loaded {} quests from {}", catalog.len(), path.display());
    Ok(catalog)
}

pub fn load_items(path: &Path) -> Result<ItemCatalog, DataError> {
    let catalog = parse_items(&read_data_file(path)?)?;
    log::info!("loaded {} items from {}", catalog.len(), path.display());
    Ok(catalog)
}
