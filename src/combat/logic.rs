//! Turn-based fight resolution.

use super::types::*;
use crate::core::constants::{
    BOSS_HP_BASE, BOSS_HP_PER_FLOOR, BOSS_POWER_BASE, MONSTER_HP_BASE, MONSTER_HP_ROLLS,
    MONSTER_POWER_BASE, MONSTER_POWER_FLOOR_DIVISOR,
};
use crate::core::error::ActionError;
use crate::core::rng::RandomSource;
use crate::core::run_state::RunState;
use crate::rewards::{grant_victory_reward, VictoryReward};

/// Rolls monster (or boss) stats for `floor`. Returns (hp, power).
pub fn roll_monster_stats(floor: u32, is_boss: bool, rng: &mut impl RandomSource) -> (u32, u32) {
    if is_boss {
        return (
            BOSS_HP_BASE + floor * BOSS_HP_PER_FLOOR,
            BOSS_POWER_BASE + floor / 2,
        );
    }
    let hp = MONSTER_HP_BASE + rng.roll_below(MONSTER_HP_ROLLS) + floor / 2;
    let power_rolls = (floor / MONSTER_POWER_FLOOR_DIVISOR).max(1);
    let power = MONSTER_POWER_BASE + rng.roll_below(power_rolls);
    (hp, power)
}

/// Attack damage for the given power: `power/2 + roll(0..power) + 1`.
pub fn roll_attack_damage(power: u32, rng: &mut impl RandomSource) -> u32 {
    power / 2 + rng.roll_below(power) + 1
}

/// Applies defend then shield halving, in that order, never below 1.
pub fn mitigate_monster_damage(base: u32, defended: bool, shielded: bool) -> u32 {
    let mut damage = base;
    if defended {
        damage /= 2;
    }
    if shielded {
        damage /= 2;
    }
    damage.max(1)
}

/// Opens a fight against the player's current stats. The player always
/// moves first.
pub fn start_combat(state: &RunState, is_boss: bool, rng: &mut impl RandomSource) -> CombatState {
    let (monster_hp, monster_power) = roll_monster_stats(state.floor, is_boss, rng);
    tracing::debug!(
        floor = state.floor,
        is_boss,
        monster_hp,
        monster_power,
        "combat started"
    );
    CombatState {
        player_hp: state.hp(),
        player_power: state.power,
        monster_hp,
        monster_power,
        player_defending: false,
        buff_bonus: 0,
        buff_turns_remaining: 0,
        shield_turns_remaining: 0,
        is_boss,
        phase: CombatPhase::AwaitingPlayerAction,
    }
}

impl CombatState {
    /// Resolves the player's half of an exchange.
    ///
    /// Ticks the buff timer first, then attacks or braces. A killing blow ends
    /// the fight at once; otherwise the monster's turn is scheduled and the
    /// defend flag is cleared on the state (the stance rides on the schedule).
    pub fn player_turn(
        &mut self,
        action: PlayerAction,
        rng: &mut impl RandomSource,
    ) -> Result<PlayerTurnReport, ActionError> {
        match self.phase {
            CombatPhase::AwaitingPlayerAction => {}
            CombatPhase::ResolvingMonsterAction => return Err(ActionError::NotPlayerTurn),
            CombatPhase::FinishedVictory | CombatPhase::FinishedDefeat => {
                return Err(ActionError::NoCombat)
            }
        }

        let buff_expired = self.tick_buff();

        let damage = match action {
            PlayerAction::Defend => {
                self.player_defending = true;
                None
            }
            PlayerAction::Attack => {
                let dealt = roll_attack_damage(self.player_power, rng);
                self.monster_hp = self.monster_hp.saturating_sub(dealt);
                if self.monster_hp == 0 {
                    self.phase = CombatPhase::FinishedVictory;
                    return Ok(PlayerTurnReport {
                        action,
                        damage: Some(dealt),
                        buff_expired,
                        next: AfterPlayerTurn::Victory,
                    });
                }
                Some(dealt)
            }
        };

        let defended = std::mem::take(&mut self.player_defending);
        self.phase = CombatPhase::ResolvingMonsterAction;
        Ok(PlayerTurnReport {
            action,
            damage,
            buff_expired,
            next: AfterPlayerTurn::MonsterTurn(ScheduledMonsterTurn::new(defended)),
        })
    }

    /// Resolves a scheduled monster hit. A fight that already ended (e.g. a
    /// bomb landed in the meantime) swallows the turn.
    pub fn monster_turn(
        &mut self,
        turn: ScheduledMonsterTurn,
        rng: &mut impl RandomSource,
    ) -> Option<MonsterTurnReport> {
        if self.phase != CombatPhase::ResolvingMonsterAction {
            return None;
        }

        let base_damage = rng.roll_below(self.monster_power) + 1;
        let damage = mitigate_monster_damage(base_damage, turn.defended, self.shielded());
        self.player_hp = self.player_hp.saturating_sub(damage);

        let outcome = if self.player_hp == 0 {
            self.phase = CombatPhase::FinishedDefeat;
            Some(CombatOutcome::Defeat)
        } else {
            self.phase = CombatPhase::AwaitingPlayerAction;
            None
        };

        Some(MonsterTurnReport {
            base_damage,
            damage,
            outcome,
        })
    }

    /// Counts the buff down one player turn. Returns true when it expires,
    /// at which point its bonus comes back off player power.
    fn tick_buff(&mut self) -> bool {
        if self.buff_turns_remaining == 0 {
            return false;
        }
        self.buff_turns_remaining -= 1;
        if self.buff_turns_remaining > 0 {
            return false;
        }
        self.player_power = self.player_power.saturating_sub(self.buff_bonus);
        self.buff_bonus = 0;
        true
    }

    /// Applies a damage item. Returns true when it kills the monster.
    pub fn strike_with_item(&mut self, amount: u32) -> bool {
        if self.finished() {
            return false;
        }
        self.monster_hp = self.monster_hp.saturating_sub(amount);
        if self.monster_hp == 0 {
            self.phase = CombatPhase::FinishedVictory;
            return true;
        }
        false
    }

    /// Adds a power buff once; the timer restarts instead of stacking.
    pub fn activate_buff(&mut self, power: u32, turns: u32) {
        self.buff_bonus += power;
        self.player_power += power;
        self.buff_turns_remaining = turns;
    }

    pub fn activate_shield(&mut self, turns: u32) {
        self.shield_turns_remaining = turns;
    }
}

/// Result of closing out a finished fight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatConclusion {
    Victory(VictoryReward),
    Defeat,
}

/// Writes a finished fight back into the run: HP and rewards on a win,
/// death on a loss. Returns `None` while the fight is still going.
pub fn conclude_combat(
    state: &mut RunState,
    combat: &CombatState,
    rng: &mut impl RandomSource,
) -> Option<CombatConclusion> {
    let outcome = combat.outcome()?;
    tracing::debug!(?outcome, is_boss = combat.is_boss, "combat finished");
    match outcome {
        CombatOutcome::Victory => {
            state.set_hp(combat.player_hp);
            let reward = grant_victory_reward(state, combat.is_boss, rng);
            Some(CombatConclusion::Victory(reward))
        }
        CombatOutcome::Defeat => {
            state.mark_dead();
            Some(CombatConclusion::Defeat)
        }
    }
}
