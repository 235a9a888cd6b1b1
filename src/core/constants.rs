use std::time::Duration;

// Floor layout
pub const DOORS_PER_FLOOR: usize = 3;
pub const BOSS_FLOOR_INTERVAL: u32 = 25;

// Rare door odds, rolled in this order; a later success overwrites an earlier one
pub const MONSTER_DOOR_CHANCE: f64 = 0.18;
pub const MERCHANT_DOOR_CHANCE: f64 = 0.08;
pub const TRAP_DOOR_CHANCE: f64 = 0.10;
pub const STRANGER_DOOR_CHANCE: f64 = 0.10;
pub const SHRINE_DOOR_CHANCE: f64 = 0.07;
pub const CURSED_DOOR_CHANCE: f64 = 0.05;

// Loot room: 0..=2 gold
pub const LOOT_GOLD_ROLLS: u32 = 3;

// Trap: 3..=7 damage
pub const TRAP_DAMAGE_MIN: u32 = 3;
pub const TRAP_DAMAGE_ROLLS: u32 = 5;

// Stranger: 6..=11 healing
pub const STRANGER_HEAL_MIN: u32 = 6;
pub const STRANGER_HEAL_ROLLS: u32 = 6;

// Shrine
pub const SHRINE_HP_BASE: u32 = 4;
pub const SHRINE_HP_FLOOR_DIVISOR: u32 = 5;
pub const SHRINE_POWER_BASE: u32 = 1;
pub const SHRINE_POWER_FLOOR_DIVISOR: u32 = 10;

// Cursed room
pub const CURSE_DAMAGE: u32 = 8;
pub const CURSE_BOON_CHANCE: f64 = 0.5;
pub const CURSE_HP_BASE: u32 = 6;
pub const CURSE_HP_FLOOR_DIVISOR: u32 = 4;
pub const CURSE_POWER_BONUS: u32 = 2;
pub const CURSE_ITEM_COUNT: usize = 2;

// Monster stats
pub const MONSTER_HP_BASE: u32 = 8;
pub const MONSTER_HP_ROLLS: u32 = 4;
pub const MONSTER_POWER_BASE: u32 = 1;
pub const MONSTER_POWER_FLOOR_DIVISOR: u32 = 3;
pub const BOSS_HP_BASE: u32 = 40;
pub const BOSS_HP_PER_FLOOR: u32 = 2;
pub const BOSS_POWER_BASE: u32 = 4;

// Victory rewards
pub const MONSTER_GOLD_BASE: u32 = 8;
pub const MONSTER_GOLD_ROLLS: u32 = 8;
pub const BOSS_HP_REWARD_BASE: u32 = 10;
pub const BOSS_HP_REWARD_FLOOR_DIVISOR: u32 = 4;
pub const BOSS_POWER_REWARD_BASE: u32 = 2;
pub const BOSS_POWER_REWARD_FLOOR_DIVISOR: u32 = 30;
pub const BOSS_ITEM_COUNT: usize = 3;

// Inventory and leaderboard
pub const INVENTORY_SLOTS: usize = 3;
pub const LEADERBOARD_SIZE: usize = 10;
pub const LEADERBOARD_FILE: &str = "leaderboard.json";

// Presentation pacing
pub const MONSTER_TURN_DELAY: Duration = Duration::from_millis(500);
pub const BOSS_ENTRY_DELAY: Duration = Duration::from_millis(100);

// Narrative log
pub const GAME_LOG_CAPACITY: usize = 50;
