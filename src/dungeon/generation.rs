//! Per-floor door generation.

use super::types::{DoorSet, DoorType};
use crate::core::constants::{
    BOSS_FLOOR_INTERVAL, CURSED_DOOR_CHANCE, DOORS_PER_FLOOR, MERCHANT_DOOR_CHANCE,
    MONSTER_DOOR_CHANCE, SHRINE_DOOR_CHANCE, STRANGER_DOOR_CHANCE, TRAP_DOOR_CHANCE,
};
use crate::core::rng::RandomSource;

/// Rare doors in roll order. Later successes overwrite earlier ones that
/// landed on the same slot, which lowers the odds of the early entries.
pub const RARE_DOOR_ODDS: [(DoorType, f64); 6] = [
    (DoorType::Monster, MONSTER_DOOR_CHANCE),
    (DoorType::Merchant, MERCHANT_DOOR_CHANCE),
    (DoorType::Trap, TRAP_DOOR_CHANCE),
    (DoorType::Stranger, STRANGER_DOOR_CHANCE),
    (DoorType::Shrine, SHRINE_DOOR_CHANCE),
    (DoorType::Cursed, CURSED_DOOR_CHANCE),
];

/// Rolls the three doors for `floor`.
///
/// Starts from all loot, then each rare door gets one Bernoulli trial and on
/// success overwrites a uniformly chosen slot. Boss floors finally force one
/// uniformly chosen slot to `Boss`.
pub fn generate_doors(floor: u32, rng: &mut impl RandomSource) -> DoorSet {
    let mut doors = DoorSet::all_loot();

    for (door, chance) in RARE_DOOR_ODDS {
        if rng.chance(chance) {
            doors.set(rng.pick_index(DOORS_PER_FLOOR), door);
        }
    }

    if floor % BOSS_FLOOR_INTERVAL == 0 {
        doors.set(rng.pick_index(DOORS_PER_FLOOR), DoorType::Boss);
    }

    tracing::debug!(floor, doors = ?doors.doors(), "generated doors");
    doors
}
