use crate::core::constants::MONSTER_TURN_DELAY;
use std::time::Duration;

/// Where a fight currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatPhase {
    AwaitingPlayerAction,
    ResolvingMonsterAction,
    FinishedVictory,
    FinishedDefeat,
}

/// Whose move it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Player,
    Monster,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Attack,
    Defend,
}

/// How a finished fight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    Victory,
    Defeat,
}

/// State of one fight. Lives only while the fight does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatState {
    pub player_hp: u32,
    pub player_power: u32,
    pub monster_hp: u32,
    pub monster_power: u32,
    pub player_defending: bool,
    pub buff_bonus: u32,
    pub buff_turns_remaining: u32,
    /// Read by monster hits but never counted down.
    pub shield_turns_remaining: u32,
    pub is_boss: bool,
    pub(crate) phase: CombatPhase,
}

impl CombatState {
    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn turn(&self) -> Turn {
        match self.phase {
            CombatPhase::ResolvingMonsterAction => Turn::Monster,
            _ => Turn::Player,
        }
    }

    pub fn finished(&self) -> bool {
        matches!(
            self.phase,
            CombatPhase::FinishedVictory | CombatPhase::FinishedDefeat
        )
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        match self.phase {
            CombatPhase::FinishedVictory => Some(CombatOutcome::Victory),
            CombatPhase::FinishedDefeat => Some(CombatOutcome::Defeat),
            _ => None,
        }
    }

    pub fn shielded(&self) -> bool {
        self.shield_turns_remaining > 0
    }
}

/// Monster turn queued behind a player action.
///
/// Carries the player's defend stance for this exchange, so the stance can be
/// cleared on the combat state before the monster acts. Resolve it with
/// [`CombatState::monster_turn`] once [`delay`](Self::delay) has passed, or
/// [`cancel`](Self::cancel) it to hand the turn back to the player.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a scheduled monster turn must be resolved or cancelled"]
pub struct ScheduledMonsterTurn {
    pub(crate) delay: Duration,
    pub(crate) defended: bool,
}

impl ScheduledMonsterTurn {
    pub(crate) fn new(defended: bool) -> Self {
        Self {
            delay: MONSTER_TURN_DELAY,
            defended,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn defended(&self) -> bool {
        self.defended
    }

    /// Drops the pending hit and returns control to the player.
    pub fn cancel(self, combat: &mut CombatState) {
        if combat.phase == CombatPhase::ResolvingMonsterAction {
            combat.phase = CombatPhase::AwaitingPlayerAction;
        }
    }
}

/// What happened after the player committed an action.
#[derive(Debug, PartialEq, Eq)]
pub enum AfterPlayerTurn {
    /// The monster fell; its turn is skipped.
    Victory,
    MonsterTurn(ScheduledMonsterTurn),
}

#[derive(Debug, PartialEq, Eq)]
pub struct PlayerTurnReport {
    pub action: PlayerAction,
    /// Damage dealt by an attack; `None` when defending.
    pub damage: Option<u32>,
    pub buff_expired: bool,
    pub next: AfterPlayerTurn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterTurnReport {
    pub base_damage: u32,
    pub damage: u32,
    pub outcome: Option<CombatOutcome>,
}
