//! Integration test: a session loaded from a data directory
//!
//! Covers catalog bootstrapping on disk, the shop and equipment flow, and
//! revival after a lost fight.

use chronicles::character::{Character, CharacterClass};
use chronicles::combat::{Battle, Enemy, EnemyKind, PlayerAction};
use chronicles::constants::{ITEMS_FILE_NAME, MAX_INVENTORY_SIZE, QUESTS_FILE_NAME};
use chronicles::errors::{CombatError, GameError, InventoryError, QuestError};
use chronicles::game::{GameData, GameSession};
use chronicles::items::EquipSlot;
use rand::rngs::mock::StepRng;
use std::fs;
use std::rc::Rc;
use tempfile::TempDir;

fn session_in(dir: &TempDir, class: CharacterClass) -> GameSession {
    let data = GameData::load(dir.path()).unwrap();
    GameSession::new(Character::new("Tess", class).unwrap(), Rc::new(data))
}

#[test]
fn test_load_writes_starter_files_once() {
    let dir = TempDir::new().unwrap();
    let data = GameData::load(dir.path()).unwrap();

    assert_eq!(data.quests.len(), 5);
    assert_eq!(data.items.len(), 8);
    assert!(dir.path().join(QUESTS_FILE_NAME).exists());
    assert!(dir.path().join(ITEMS_FILE_NAME).exists());

    // Edited files are not overwritten on the next start
    fs::write(
        dir.path().join(QUESTS_FILE_NAME),
        "QUEST_ID: solo\nTITLE: Solo\nDESCRIPTION: Just one.\nREWARD_XP: 5\nREWARD_GOLD: 5\nREQUIRED_LEVEL: 1\nPREREQUISITE: NONE\n",
    )
    .unwrap();
    let data = GameData::load(dir.path()).unwrap();
    assert_eq!(data.quests.len(), 1);
    assert!(data.quests.get("solo").is_some());
    assert_eq!(data.items.len(), 8);
}

#[test]
fn test_load_rejects_broken_quest_chains() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(QUESTS_FILE_NAME),
        "QUEST_ID: orphan\nTITLE: Orphan\nDESCRIPTION: Lost.\nREWARD_XP: 5\nREWARD_GOLD: 5\nREQUIRED_LEVEL: 1\nPREREQUISITE: missing\n",
    )
    .unwrap();

    assert!(matches!(
        GameData::load(dir.path()),
        Err(GameError::Quest(QuestError::QuestNotFound(id))) if id == "missing"
    ));
}

#[test]
fn test_shop_and_equipment_flow() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, CharacterClass::Rogue);
    session.character.gold = 1000;

    session.buy("iron_sword").unwrap();
    assert_eq!(session.equip("iron_sword").unwrap(), None);
    assert_eq!(session.character.strength, 17);
    assert_eq!(session.character.gold, 900);
    assert!(session.character.inventory.is_empty());

    // Swapping returns the old weapon to the pack and moves the bonus over
    session.buy("steel_sword").unwrap();
    assert_eq!(
        session.equip("steel_sword").unwrap(),
        Some("iron_sword".to_string())
    );
    assert_eq!(session.character.strength, 22);
    assert_eq!(session.character.inventory, vec!["iron_sword"]);

    assert_eq!(session.sell("iron_sword").unwrap(), 50);
    assert_eq!(session.character.gold, 700);

    assert_eq!(
        session.unequip(EquipSlot::Weapon).unwrap(),
        Some("steel_sword".to_string())
    );
    assert_eq!(session.character.strength, 12);
    assert_eq!(session.unequip(EquipSlot::Weapon).unwrap(), None);

    session.buy("health_potion").unwrap();
    assert!(matches!(
        session.equip("health_potion"),
        Err(InventoryError::InvalidItemType { .. })
    ));
    session.character.health = 70;
    session.use_item("health_potion").unwrap();
    assert_eq!(session.character.health, 90);
    assert_eq!(
        session.use_item("health_potion"),
        Err(InventoryError::ItemNotFound("health_potion".to_string()))
    );
}

#[test]
fn test_shop_limits() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, CharacterClass::Cleric);

    assert_eq!(
        session.buy("chainmail"),
        Err(InventoryError::InsufficientGold {
            needed: 200,
            available: 100,
        })
    );
    assert_eq!(session.character.gold, 100);
    assert_eq!(
        session.buy("cursed_amulet"),
        Err(InventoryError::ItemNotFound("cursed_amulet".to_string()))
    );

    session.character.gold = 10_000;
    session.buy("leather_armor").unwrap();
    session.equip("leather_armor").unwrap();
    for _ in 0..MAX_INVENTORY_SIZE {
        session.buy("health_potion").unwrap();
    }
    assert_eq!(
        session.buy("health_potion"),
        Err(InventoryError::InventoryFull(MAX_INVENTORY_SIZE))
    );
    // No room to put the armor back
    assert_eq!(
        session.unequip(EquipSlot::Armor),
        Err(InventoryError::InventoryFull(MAX_INVENTORY_SIZE))
    );
    assert_eq!(
        session.character.equipped_armor.as_deref(),
        Some("leather_armor")
    );

    session.drop_item("health_potion").unwrap();
    assert_eq!(
        session.unequip(EquipSlot::Armor).unwrap(),
        Some("leather_armor".to_string())
    );
    assert_eq!(session.character.max_health, 100);
}

#[test]
fn test_lost_fight_then_revive() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, CharacterClass::Mage);
    session.character.health = 1;

    let mut battle = Battle::start(&session.character, Enemy::new(EnemyKind::Dragon)).unwrap();
    session
        .fight_round(&mut battle, PlayerAction::Attack, &mut StepRng::new(0, 0))
        .unwrap();

    assert!(matches!(
        session.finish_battle(&battle),
        Err(GameError::Combat(CombatError::CharacterDied(_)))
    ));
    assert_eq!(session.character.gold, 100);
    assert!(matches!(
        session.explore(),
        Err(CombatError::CharacterDead(_))
    ));

    assert!(session.revive());
    assert_eq!(session.character.health, 40);
    assert!(!session.revive());
    assert!(session.explore().is_ok());
}
