//! Session glue between the character record, the catalogs, quests and combat.
//!
//! The quest engine and the battle resolver never level a character
//! themselves. Every reward that reaches the character through this module
//! runs the level-up cascade right after it is applied.

use crate::character::{Character, Rewards};
use crate::combat::{enemy_for_level, Battle, BattleResult, CombatEvent, PlayerAction};
use crate::constants::{ITEMS_FILE_NAME, QUESTS_FILE_NAME};
use crate::data::{create_default_data_files, load_items, load_quests};
use crate::errors::{CharacterError, CombatError, GameError, InventoryError, QuestError};
use crate::items::{self, EquipSlot, ItemCatalog, ItemDefinition};
use crate::quests::{self, AcceptOutcome, QuestCatalog, QuestDefinition};
use rand::Rng;
use std::path::Path;
use std::rc::Rc;

/// Catalogs loaded once at startup and shared read-only by every session.
#[derive(Debug, Clone, Default)]
pub struct GameData {
    pub quests: QuestCatalog,
    pub items: ItemCatalog,
}

impl GameData {
    /// Loads both catalogs from `dir`, writing the starter files first when
    /// they are missing, and rejects quest chains that dangle or loop.
    pub fn load(dir: &Path) -> Result<Self, GameError> {
        create_default_data_files(dir)?;
        let quests = load_quests(&dir.join(QUESTS_FILE_NAME))?;
        let items = load_items(&dir.join(ITEMS_FILE_NAME))?;
        quests::validate_prerequisites(&quests)?;
        Ok(Self { quests, items })
    }
}

/// Rewards that reached the character and the levels they produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardSummary {
    pub rewards: Rewards,
    pub levels_gained: u32,
}

/// The character being played plus the catalogs it is played against.
pub struct GameSession {
    pub character: Character,
    data: Rc<GameData>,
}

impl GameSession {
    pub fn new(character: Character, data: Rc<GameData>) -> Self {
        Self { character, data }
    }

    pub fn data(&self) -> &GameData {
        &self.data
    }

    pub fn into_character(self) -> Character {
        self.character
    }

    /// Starts a battle against the enemy for the character's level.
    pub fn explore(&self) -> Result<Battle, CombatError> {
        Battle::start(&self.character, enemy_for_level(self.character.level))
    }

    /// Plays one round of `battle` with the session's character.
    pub fn fight_round(
        &mut self,
        battle: &mut Battle,
        action: PlayerAction,
        rng: &mut impl Rng,
    ) -> Result<Vec<CombatEvent>, CombatError> {
        battle.play_round(&mut self.character, action, rng)
    }

    /// Applies victory rewards: experience with the level-up cascade, then gold.
    /// A dead character is rejected before anything changes.
    pub fn claim_battle_rewards(&mut self, rewards: Rewards) -> Result<RewardSummary, GameError> {
        let levels_gained = self.character.gain_experience(rewards.xp)?;
        self.character.add_gold(rewards.gold);
        Ok(RewardSummary {
            rewards,
            levels_gained,
        })
    }

    /// Claims rewards for a finished battle. Escapes yield `None`; a lost
    /// battle yields `CharacterDied`.
    pub fn finish_battle(&mut self, battle: &Battle) -> Result<Option<RewardSummary>, GameError> {
        match battle.result()? {
            Some(BattleResult::Victory(rewards)) => Ok(Some(self.claim_battle_rewards(rewards)?)),
            Some(BattleResult::Escaped) | None => Ok(None),
        }
    }

    pub fn accept_quest(&mut self, quest_id: &str) -> Result<AcceptOutcome, QuestError> {
        quests::accept(&mut self.character, &self.data.quests, quest_id)
    }

    /// Completes a quest and then runs the level-up cascade.
    ///
    /// Like battle rewards, nothing is granted to a dead character: the level-up
    /// heal would otherwise act as a free revive.
    pub fn complete_quest(&mut self, quest_id: &str) -> Result<RewardSummary, GameError> {
        if self.character.is_dead() {
            return Err(CharacterError::CharacterDead(self.character.name.clone()).into());
        }
        let rewards = quests::complete(&mut self.character, &self.data.quests, quest_id)?;
        let levels_gained = self.character.process_level_ups();
        Ok(RewardSummary {
            rewards,
            levels_gained,
        })
    }

    pub fn abandon_quest(&mut self, quest_id: &str) -> Result<(), QuestError> {
        quests::abandon(&mut self.character, quest_id)
    }

    pub fn available_quests(&self) -> Vec<&QuestDefinition> {
        quests::available_quests(&self.character, &self.data.quests)
    }

    pub fn active_quests(&self) -> Vec<&QuestDefinition> {
        quests::active_quests(&self.character, &self.data.quests)
    }

    pub fn completed_quests(&self) -> Vec<&QuestDefinition> {
        quests::completed_quests(&self.character, &self.data.quests)
    }

    pub fn completion_percentage(&self) -> f64 {
        quests::completion_percentage(&self.character, &self.data.quests)
    }

    pub fn revive(&mut self) -> bool {
        self.character.revive()
    }

    fn item(&self, item_id: &str) -> Result<&ItemDefinition, InventoryError> {
        self.data
            .items
            .get(item_id)
            .ok_or_else(|| InventoryError::ItemNotFound(item_id.to_string()))
    }

    pub fn use_item(&mut self, item_id: &str) -> Result<(), InventoryError> {
        let item = self.item(item_id)?.clone();
        items::use_item(&mut self.character, &item)
    }

    /// Equips a weapon or armor piece into its slot. Returns the replaced item.
    pub fn equip(&mut self, item_id: &str) -> Result<Option<String>, InventoryError> {
        let item_type = self.item(item_id)?.item_type;
        match EquipSlot::for_item_type(item_type) {
            Some(EquipSlot::Weapon) => {
                items::equip_weapon(&mut self.character, &self.data.items, item_id)
            }
            Some(EquipSlot::Armor) => {
                items::equip_armor(&mut self.character, &self.data.items, item_id)
            }
            None => Err(InventoryError::InvalidItemType {
                item_id: item_id.to_string(),
                actual: item_type.to_string(),
            }),
        }
    }

    pub fn unequip(&mut self, slot: EquipSlot) -> Result<Option<String>, InventoryError> {
        match slot {
            EquipSlot::Weapon => items::unequip_weapon(&mut self.character, &self.data.items),
            EquipSlot::Armor => items::unequip_armor(&mut self.character, &self.data.items),
        }
    }

    /// Throws one copy away without payment.
    pub fn drop_item(&mut self, item_id: &str) -> Result<(), InventoryError> {
        items::remove_item(&mut self.character, item_id)
    }

    pub fn buy(&mut self, item_id: &str) -> Result<(), InventoryError> {
        let item = self.item(item_id)?.clone();
        items::purchase_item(&mut self.character, &item)
    }

    pub fn sell(&mut self, item_id: &str) -> Result<u32, InventoryError> {
        let item = self.item(item_id)?.clone();
        items::sell_item(&mut self.character, &item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterClass;
    use crate::data::{parse_items, parse_quests, DEFAULT_ITEMS, DEFAULT_QUESTS};
    use rand::rngs::mock::StepRng;

    fn session(class: CharacterClass) -> GameSession {
        let data = GameData {
            quests: parse_quests(DEFAULT_QUESTS).unwrap(),
            items: parse_items(DEFAULT_ITEMS).unwrap(),
        };
        GameSession::new(Character::new("Hero", class).unwrap(), Rc::new(data))
    }

    #[test]
    fn test_complete_quest_levels_up() {
        let mut s = session(CharacterClass::Warrior);
        s.character.experience = 60;
        s.accept_quest("first_steps").unwrap();

        let summary = s.complete_quest("first_steps").unwrap();
        assert_eq!(summary.rewards, Rewards { xp: 50, gold: 25 });
        assert_eq!(summary.levels_gained, 1);
        assert_eq!(s.character.level, 2);
        assert_eq!(s.character.experience, 10);
        assert_eq!(s.character.gold, 125);
    }

    #[test]
    fn test_dead_character_cannot_complete_quest() {
        let mut s = session(CharacterClass::Warrior);
        s.accept_quest("first_steps").unwrap();
        s.character.experience = 90;
        s.character.health = 0;

        assert!(matches!(
            s.complete_quest("first_steps"),
            Err(GameError::Character(CharacterError::CharacterDead(_)))
        ));
        assert_eq!(s.character.health, 0);
        assert_eq!(s.character.level, 1);
        assert_eq!(s.character.experience, 90);
        assert_eq!(s.character.gold, 100);
        assert_eq!(s.character.active_quests, vec!["first_steps"]);
        assert!(s.character.completed_quests.is_empty());
    }

    #[test]
    fn test_dead_character_claims_no_battle_rewards() {
        let mut s = session(CharacterClass::Rogue);
        s.character.health = 0;

        assert!(matches!(
            s.claim_battle_rewards(Rewards { xp: 25, gold: 10 }),
            Err(GameError::Character(CharacterError::CharacterDead(_)))
        ));
        assert_eq!(s.character.gold, 100);
        assert_eq!(s.character.experience, 0);
    }

    #[test]
    fn test_explore_picks_enemy_by_level() {
        let mut s = session(CharacterClass::Mage);
        assert_eq!(s.explore().unwrap().enemy().name, "Goblin");
        s.character.level = 4;
        assert_eq!(s.explore().unwrap().enemy().name, "Orc");
        s.character.health = 0;
        assert!(matches!(s.explore(), Err(CombatError::CharacterDead(_))));
    }

    #[test]
    fn test_finish_battle_applies_rewards() {
        let mut s = session(CharacterClass::Warrior);
        let mut battle = s.explore().unwrap();
        let mut rng = StepRng::new(u64::MAX, 0);
        while battle.is_active() {
            s.fight_round(&mut battle, PlayerAction::Attack, &mut rng)
                .unwrap();
        }

        let summary = s.finish_battle(&battle).unwrap().unwrap();
        assert_eq!(summary.rewards, Rewards { xp: 25, gold: 10 });
        assert_eq!(summary.levels_gained, 0);
        assert_eq!(s.character.experience, 25);
        assert_eq!(s.character.gold, 110);
    }

    #[test]
    fn test_finish_lost_battle_reports_death() {
        let mut s = session(CharacterClass::Mage);
        s.character.level = 6;
        s.character.health = 1;
        let mut battle = s.explore().unwrap();
        s.fight_round(&mut battle, PlayerAction::Attack, &mut StepRng::new(u64::MAX, 0))
            .unwrap();

        assert!(matches!(
            s.finish_battle(&battle),
            Err(GameError::Combat(CombatError::CharacterDied(_)))
        ));
        assert!(s.revive());
        assert_eq!(s.character.health, 40);
    }

    #[test]
    fn test_shop_and_equipment_flow() {
        let mut s = session(CharacterClass::Warrior);
        s.buy("iron_sword").unwrap();
        assert_eq!(s.character.gold, 0);
        assert_eq!(s.equip("iron_sword").unwrap(), None);
        assert_eq!(s.character.strength, 20);

        assert_eq!(s.unequip(EquipSlot::Weapon).unwrap(), Some("iron_sword".to_string()));
        assert_eq!(s.character.strength, 15);
        assert_eq!(s.sell("iron_sword").unwrap(), 50);
        assert_eq!(s.character.gold, 50);

        assert!(matches!(
            s.buy("excalibur"),
            Err(InventoryError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_equip_consumable_is_rejected() {
        let mut s = session(CharacterClass::Cleric);
        s.buy("health_potion").unwrap();
        assert!(matches!(
            s.equip("health_potion"),
            Err(InventoryError::InvalidItemType { .. })
        ));
        s.character.health = 50;
        s.use_item("health_potion").unwrap();
        assert_eq!(s.character.health, 80);
    }

    #[test]
    fn test_drop_item() {
        let mut s = session(CharacterClass::Rogue);
        s.buy("health_potion").unwrap();
        s.drop_item("health_potion").unwrap();
        assert!(s.character.inventory.is_empty());
        assert_eq!(s.character.gold, 75);
        assert!(matches!(
            s.drop_item("health_potion"),
            Err(InventoryError::ItemNotFound(_))
        ));
    }
}
