//! Victory rewards for monsters and bosses.

use crate::core::constants::{
    BOSS_HP_REWARD_BASE, BOSS_HP_REWARD_FLOOR_DIVISOR, BOSS_ITEM_COUNT, BOSS_POWER_REWARD_BASE,
    BOSS_POWER_REWARD_FLOOR_DIVISOR, MONSTER_GOLD_BASE, MONSTER_GOLD_ROLLS,
};
use crate::core::rng::RandomSource;
use crate::core::run_state::RunState;
use crate::economy::{add_random_item, Pickup};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VictoryReward {
    Gold(u32),
    Boss {
        max_hp: u32,
        power: u32,
        pickups: Vec<Pickup>,
    },
}

/// `8 + floor/2 + roll(0..8)` gold.
pub fn monster_gold(floor: u32, rng: &mut impl RandomSource) -> u32 {
    MONSTER_GOLD_BASE + floor / 2 + rng.roll_below(MONSTER_GOLD_ROLLS)
}

pub fn boss_hp_boost(floor: u32) -> u32 {
    BOSS_HP_REWARD_BASE + floor / BOSS_HP_REWARD_FLOOR_DIVISOR
}

pub fn boss_power_boost(floor: u32) -> u32 {
    BOSS_POWER_REWARD_BASE + floor / BOSS_POWER_REWARD_FLOOR_DIVISOR
}

/// Pays out a won fight into the run.
pub fn grant_victory_reward(
    state: &mut RunState,
    is_boss: bool,
    rng: &mut impl RandomSource,
) -> VictoryReward {
    if !is_boss {
        let gold = monster_gold(state.floor, rng);
        state.gold += gold;
        return VictoryReward::Gold(gold);
    }

    let max_hp = boss_hp_boost(state.floor);
    let power = boss_power_boost(state.floor);
    state.raise_max_hp(max_hp);
    state.power += power;
    let pickups = (0..BOSS_ITEM_COUNT)
        .map(|_| add_random_item(state, rng))
        .collect();
    VictoryReward::Boss {
        max_hp,
        power,
        pickups,
    }
}
