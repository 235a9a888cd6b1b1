//! Resolution of the non-combat doors.

use super::types::{EventOutcome, ShrineChoice};
use crate::core::constants::*;
use crate::core::log::LogKind;
use crate::core::rng::RandomSource;
use crate::core::run_state::RunState;
use crate::economy::{add_random_item, Pickup};

/// Empty room with 0-2 scattered coins.
pub fn resolve_loot(state: &mut RunState, rng: &mut impl RandomSource) -> EventOutcome {
    let mut outcome = EventOutcome::new("Empty Room", "Dust, cobwebs, maybe a rat.");
    let gold = rng.roll_below(LOOT_GOLD_ROLLS);
    if gold > 0 {
        state.gold += gold;
        outcome.say(
            LogKind::Loot,
            format!("You find a few scattered coins (+{} gold).", gold),
        );
    } else {
        outcome.say(LogKind::Neutral, "The room is picked clean. No gold here.");
    }
    outcome
}

/// Hidden trap dealing 3-7 damage; may end the run.
pub fn resolve_trap(state: &mut RunState, rng: &mut impl RandomSource) -> EventOutcome {
    let mut outcome = EventOutcome::new("Trap!", "Rusty blades and spikes everywhere.");
    let damage = TRAP_DAMAGE_MIN + rng.roll_below(TRAP_DAMAGE_ROLLS);
    outcome.say(
        LogKind::Trap,
        format!("A hidden trap springs! You take {} damage.", damage),
    );
    if state.take_damage(damage) {
        state.mark_dead();
        outcome.run_ended = true;
        outcome.say(LogKind::Trap, "You died to a trap.");
    }
    outcome
}

/// Hooded stranger healing 6-11, capped at max HP.
pub fn resolve_stranger(state: &mut RunState, rng: &mut impl RandomSource) -> EventOutcome {
    let mut outcome = EventOutcome::new("Kind Stranger", "Not everyone in the dungeon is hostile.");
    let heal = STRANGER_HEAL_MIN + rng.roll_below(STRANGER_HEAL_ROLLS);
    state.heal(heal);
    outcome.say(
        LogKind::Stranger,
        format!("A hooded stranger patches you up. +{} HP.", heal),
    );
    outcome
}

pub fn shrine_hp_boost(floor: u32) -> u32 {
    SHRINE_HP_BASE + floor / SHRINE_HP_FLOOR_DIVISOR
}

pub fn shrine_power_boost(floor: u32) -> u32 {
    SHRINE_POWER_BASE + floor / SHRINE_POWER_FLOOR_DIVISOR
}

/// Shrine blessing chosen by the player.
pub fn resolve_shrine(state: &mut RunState, choice: ShrineChoice) -> EventOutcome {
    let mut outcome = EventOutcome::new("Ancient Shrine", "An eerie altar hums with power.");
    match choice {
        ShrineChoice::Hp => {
            let boost = shrine_hp_boost(state.floor);
            state.raise_max_hp(boost);
            outcome.say(
                LogKind::Good,
                format!("The shrine blesses your body. +{} max HP.", boost),
            );
        }
        ShrineChoice::Power => {
            let boost = shrine_power_boost(state.floor);
            state.power += boost;
            outcome.say(
                LogKind::Good,
                format!("The shrine fills your muscles with strength. +{} power.", boost),
            );
        }
        ShrineChoice::Neither => {
            outcome.say(LogKind::Neutral, "You hesitate and the shrine goes dark.");
        }
    }
    outcome
}

pub fn curse_hp_boost(floor: u32) -> u32 {
    CURSE_HP_BASE + floor / CURSE_HP_FLOOR_DIVISOR
}

/// Cursed room gamble.
///
/// Accepting costs 8 HP up front. Survivors get either a permanent stat boost
/// or two random items, even odds.
pub fn resolve_cursed(
    state: &mut RunState,
    accept: bool,
    rng: &mut impl RandomSource,
) -> EventOutcome {
    let mut outcome = EventOutcome::new("Cursed Door", "You feel a bad vibe from this room.");
    if !accept {
        outcome.say(LogKind::Neutral, "You step back from the cursed energy.");
        return outcome;
    }

    outcome.say(
        LogKind::Trap,
        format!("The curse burns your flesh. -{} HP.", CURSE_DAMAGE),
    );
    if state.take_damage(CURSE_DAMAGE) {
        state.mark_dead();
        outcome.run_ended = true;
        outcome.say(LogKind::Trap, "The curse kills you.");
        return outcome;
    }

    if rng.chance(CURSE_BOON_CHANCE) {
        let hp_boost = curse_hp_boost(state.floor);
        state.raise_max_hp(hp_boost);
        state.power += CURSE_POWER_BONUS;
        outcome.say(
            LogKind::Good,
            format!(
                "You endure the curse and grow stronger! +{} max HP, +{} power.",
                hp_boost, CURSE_POWER_BONUS
            ),
        );
    } else {
        for _ in 0..CURSE_ITEM_COUNT {
            match add_random_item(state, rng) {
                Pickup::Found { item, .. } => {
                    outcome.say(LogKind::Item, format!("Found item: {}", item.name))
                }
                Pickup::InventoryFull => outcome.say(LogKind::Trap, "Inventory full!"),
            }
        }
        outcome.say(LogKind::Item, "The curse leaves behind strange artifacts.");
    }
    outcome
}
