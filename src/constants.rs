// Character creation constants
pub const STARTING_LEVEL: u32 = 1;
pub const STARTING_GOLD: u32 = 100;
pub const MAX_NAME_LENGTH: usize = 16;

// Experience and progression constants
pub const XP_PER_LEVEL: u32 = 100;
pub const LEVEL_UP_MAX_HEALTH: u32 = 10;
pub const LEVEL_UP_STRENGTH: u32 = 2;
pub const LEVEL_UP_MAGIC: u32 = 2;

// Inventory and shop constants
pub const MAX_INVENTORY_SIZE: usize = 20;
pub const SELL_PRICE_DIVISOR: u32 = 2;

// Combat constants
pub const MIN_DAMAGE: u32 = 1;
pub const DEFENSE_DIVISOR: u32 = 4;
pub const ESCAPE_CHANCE: f64 = 0.5;
pub const ROGUE_CRIT_CHANCE: f64 = 0.5;
pub const WARRIOR_STRIKE_MULTIPLIER: u32 = 2;
pub const MAGE_FIREBALL_MULTIPLIER: u32 = 2;
pub const ROGUE_CRIT_MULTIPLIER: u32 = 3;
pub const CLERIC_HEAL_AMOUNT: u32 = 30;

// Enemy level bands (inclusive upper bounds)
pub const GOBLIN_MAX_LEVEL: u32 = 2;
pub const ORC_MAX_LEVEL: u32 = 5;

// Data and save file constants
pub const QUESTS_FILE_NAME: &str = "quests.txt";
pub const ITEMS_FILE_NAME: &str = "items.txt";
pub const SAVE_FILE_SUFFIX: &str = "_save.txt";
pub const NO_PREREQUISITE: &str = "NONE";
