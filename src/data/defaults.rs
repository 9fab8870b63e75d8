use crate::constants::{ITEMS_FILE_NAME, QUESTS_FILE_NAME};
use crate::errors::DataError;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_QUESTS: &str = "\
QUEST_ID: first_steps
TITLE: First Steps
DESCRIPTION: Report to the captain at the village gate.
REWARD_XP: 50
REWARD_GOLD: 25
REQUIRED_LEVEL: 1
PREREQUISITE: NONE

QUEST_ID: goblin_menace
TITLE: Goblin Menace
DESCRIPTION: Drive the goblins out of the old mill.
REWARD_XP: 100
REWARD_GOLD: 50
REQUIRED_LEVEL: 1
PREREQUISITE: first_steps

QUEST_ID: herbalist_errand
TITLE: The Herbalist's Errand
DESCRIPTION: Gather moonleaf from the forest edge.
REWARD_XP: 75
REWARD_GOLD: 40
REQUIRED_LEVEL: 2
PREREQUISITE: NONE

QUEST_ID: orc_warband
TITLE: Orc Warband
DESCRIPTION: Break the warband camped on the northern road.
REWARD_XP: 200
REWARD_GOLD: 100
REQUIRED_LEVEL: 3
PREREQUISITE: goblin_menace

QUEST_ID: dragon_lair
TITLE: The Dragon's Lair
DESCRIPTION: Climb the ash mountain and slay the dragon.
REWARD_XP: 500
REWARD_GOLD: 250
REQUIRED_LEVEL: 6
PREREQUISITE: orc_warband
";

pub const DEFAULT_ITEMS: &str = "\
ITEM_ID: health_potion
NAME: Health Potion
TYPE: consumable
EFFECT: health:30
COST: 25
DESCRIPTION: Restores 30 health.

ITEM_ID: greater_health_potion
NAME: Greater Health Potion
TYPE: consumable
EFFECT: health:60
COST: 60
DESCRIPTION: Restores 60 health.

ITEM_ID: strength_tonic
NAME: Strength Tonic
TYPE: consumable
EFFECT: strength:1
COST: 150
DESCRIPTION: Permanently adds 1 strength.

ITEM_ID: iron_sword
NAME: Iron Sword
TYPE: weapon
EFFECT: strength:5
COST: 100
DESCRIPTION: A basic iron sword.

ITEM_ID: steel_sword
NAME: Steel Sword
TYPE: weapon
EFFECT: strength:10
COST: 250
DESCRIPTION: Well balanced and sharp.

ITEM_ID: oak_staff
NAME: Oak Staff
TYPE: weapon
EFFECT: magic:6
COST: 120
DESCRIPTION: Focuses a caster's magic.

ITEM_ID: leather_armor
NAME: Leather Armor
TYPE: armor
EFFECT: max_health:15
COST: 80
DESCRIPTION: Light protection.

ITEM_ID: chainmail
NAME: Chainmail
TYPE: armor
EFFECT: max_health:30
COST: 200
DESCRIPTION: Heavy rings of steel.
";

/// Writes the starter quest and item files into `dir` when they are absent.
/// Existing files are left alone. Returns the paths that were created.
pub fn create_default_data_files(dir: &Path) -> Result<Vec<PathBuf>, DataError> {
    fs::create_dir_all(dir)?;

    let mut created = Vec::new();
    for (name, contents) in [
        (QUESTS_FILE_NAME, DEFAULT_QUESTS),
        (ITEMS_FILE_NAME, DEFAULT_ITEMS),
    ] {
        let path = dir.join(name);
        if !path.exists() {
            fs::write(&path, contents)?;
            log::info!("created default data file {}", path.display());
            created.push(path);
        }
    }

    Ok(created)
}
