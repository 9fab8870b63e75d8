//! Error types shared across the game library.
//!
//! Each subsystem has its own enum so callers can match on exactly the
//! failures an operation can produce. [`GameError`] wraps all of them for
//! glue code that just wants to propagate with `?`.

use std::path::PathBuf;
use thiserror::Error;

/// Quest transition and lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestError {
    #[error("quest '{0}' not found")]
    QuestNotFound(String),

    #[error("quest '{0}' has already been completed")]
    QuestAlreadyCompleted(String),

    #[error("quest '{0}' is not active")]
    QuestNotActive(String),

    /// The quest's prerequisite has not been completed yet.
    #[error("quest '{quest_id}' requires '{prerequisite}' to be completed first")]
    QuestRequirementsNotMet {
        quest_id: String,
        prerequisite: String,
    },

    #[error("quest '{quest_id}' requires level {required} (character is level {current})")]
    InsufficientLevel {
        quest_id: String,
        required: u32,
        current: u32,
    },

    /// Raised only by the explicit catalog validation pass.
    #[error("prerequisite cycle detected starting at quest '{0}'")]
    PrerequisiteCycle(String),
}

/// Combat resolver failures and terminal death signals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error("unknown enemy type '{0}'")]
    InvalidTarget(String),

    /// A turn action was invoked after the battle ended.
    #[error("combat is not active")]
    CombatNotActive,

    /// The character tried to start a battle with no health left.
    #[error("{0} is already dead and cannot fight")]
    CharacterDead(String),

    /// The character was killed during the encounter.
    #[error("{0} has died in battle")]
    CharacterDied(String),
}

/// Character record failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CharacterError {
    #[error("invalid character class '{0}' (expected Warrior, Mage, Rogue or Cleric)")]
    InvalidClass(String),

    #[error("invalid character name: {0}")]
    InvalidName(String),

    #[error("{0} is dead")]
    CharacterDead(String),

    #[error("not enough gold: need {needed}, have {available}")]
    InsufficientGold { needed: u32, available: u32 },
}

/// Inventory, equipment and shop failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("inventory is full ({0} slots)")]
    InventoryFull(usize),

    #[error("item '{0}' not found")]
    ItemNotFound(String),

    #[error("item '{item_id}' cannot be used that way (it is a {actual})")]
    InvalidItemType { item_id: String, actual: String },

    #[error("item '{item_id}' cannot be equipped: {reason}")]
    InvalidEquipmentEffect { item_id: String, reason: String },

    #[error("not enough gold: need {needed}, have {available}")]
    InsufficientGold { needed: u32, available: u32 },
}

/// Failures while reading the quest and item data files.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("data file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid data on line {line}: {reason}")]
    InvalidFormat { line: usize, reason: String },

    #[error("record starting on line {line} is missing field {field}")]
    MissingField { line: usize, field: &'static str },

    #[error("duplicate id '{0}'")]
    DuplicateId(String),
}

/// Failures in the flat-file character store.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no saved character named '{0}'")]
    CharacterNotFound(String),

    #[error("save file could not be read: {0}")]
    Corrupted(#[source] std::io::Error),

    #[error("invalid save data: {0}")]
    InvalidData(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures loading `config.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Umbrella error for session-level glue.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Quest(#[from] QuestError),

    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Character(#[from] CharacterError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Save(#[from] SaveError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quest_error_messages_name_the_quest() {
        let err = QuestError::QuestRequirementsNotMet {
            quest_id: "slay_dragon".to_string(),
            prerequisite: "find_sword".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("slay_dragon"));
        assert!(msg.contains("find_sword"));
    }

    #[test]
    fn test_game_error_wraps_subsystem_errors() {
        let err: GameError = CombatError::CombatNotActive.into();
        assert!(matches!(err, GameError::Combat(CombatError::CombatNotActive)));
        assert_eq!(err.to_string(), "combat is not active");
    }
}
