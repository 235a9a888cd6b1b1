//! The session: single owner of a run, its fight and its merchant.

use super::decisions::DecisionProvider;
use super::render::{Renderer, SessionView};
use crate::character::Role;
use crate::combat::{
    conclude_combat, start_combat, AfterPlayerTurn, CombatConclusion, CombatState,
    PlayerAction, PlayerTurnReport, ScheduledMonsterTurn,
};
use crate::core::constants::BOSS_ENTRY_DELAY;
use crate::core::error::ActionError;
use crate::core::log::{GameLog, LogKind};
use crate::core::rng::RandomSource;
use crate::core::run_state::RunState;
use crate::dungeon::{generate_doors, DoorSet, DoorType};
use crate::economy::{parse_slot, purchase, use_item, ItemUse, Pickup, Purchase};
use crate::events::{
    resolve_cursed, resolve_loot, resolve_shrine, resolve_stranger, resolve_trap, EventOutcome,
    RoomStatus, ShrineChoice,
};
use crate::items::{merchant_stock, MerchantKind};
use crate::leaderboard::{LeaderboardEntry, LeaderboardStore};
use crate::rewards::VictoryReward;

const TITLE_STATUS: RoomStatus = RoomStatus {
    title: "Loot Tower",
    text: "Pick a role and start climbing.",
};

const FLOOR_STATUS: RoomStatus = RoomStatus {
    title: "Three Doors",
    text: "Pick one. Behind it: gold, monsters, or worse.",
};

const MONSTER_STATUS: RoomStatus = RoomStatus {
    title: "Monster!",
    text: "Something lunges out of the dark.",
};

const MERCHANT_STATUS: RoomStatus = RoomStatus {
    title: "Merchant",
    text: "A cloaked trader spreads out their wares.",
};

const BOSS_STATUS: RoomStatus = RoomStatus {
    title: "Boss Door",
    text: "A trader waits by the gate. Behind it, the floor's guardian.",
};

const DEAD_STATUS: RoomStatus = RoomStatus {
    title: "You Died",
    text: "The tower claims another climber.",
};

/// Result of committing a player action.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Exchange {
    /// The monster survived and will strike once the turn's delay passes.
    Pending(ScheduledMonsterTurn),
    /// The action ended the fight.
    Finished(CombatConclusion),
}

/// Drives one player's runs.
///
/// Every operation checks its preconditions first and refuses with an
/// [`ActionError`] without touching state; refusals are also narrated into
/// the log. The renderer sees a fresh snapshot after every change.
pub struct Session<R, D> {
    rng: R,
    decisions: D,
    renderer: Box<dyn Renderer>,
    leaderboard: Box<dyn LeaderboardStore>,
    run: Option<RunState>,
    doors: DoorSet,
    combat: Option<CombatState>,
    merchant: Option<MerchantKind>,
    status: RoomStatus,
    log: GameLog,
}

impl<R: RandomSource, D: DecisionProvider> Session<R, D> {
    pub fn new(
        rng: R,
        decisions: D,
        renderer: impl Renderer + 'static,
        leaderboard: impl LeaderboardStore + 'static,
    ) -> Self {
        Self {
            rng,
            decisions,
            renderer: Box::new(renderer),
            leaderboard: Box::new(leaderboard),
            run: None,
            doors: DoorSet::all_loot(),
            combat: None,
            merchant: None,
            status: TITLE_STATUS,
            log: GameLog::new(),
        }
    }

    pub fn run(&self) -> Option<&RunState> {
        self.run.as_ref()
    }

    pub fn combat(&self) -> Option<&CombatState> {
        self.combat.as_ref()
    }

    pub fn merchant(&self) -> Option<MerchantKind> {
        self.merchant
    }

    /// Door contents for this floor. Front ends must not reveal them.
    pub fn doors(&self) -> &DoorSet {
        &self.doors
    }

    pub fn status(&self) -> RoomStatus {
        self.status
    }

    pub fn log(&self) -> &GameLog {
        &self.log
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn decisions_mut(&mut self) -> &mut D {
        &mut self.decisions
    }

    /// Current board, richest first.
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.leaderboard.load()
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            run: self.run.as_ref(),
            combat: self.combat.as_ref(),
            merchant: self.merchant,
            status: self.status,
            log: &self.log,
        }
    }

    /// Asks for a role and begins a fresh run on floor 1.
    pub async fn start_run(&mut self) -> Role {
        let answer = self.decisions.choose_role().await;
        let role = Role::parse_or_default(answer.as_deref());
        let run = RunState::new(role);

        self.doors = generate_doors(run.floor, &mut self.rng);
        self.run = Some(run);
        self.combat = None;
        self.merchant = None;
        self.status = FLOOR_STATUS;
        self.log.clear();
        self.log
            .push(LogKind::Neutral, format!("New run started as a {}!", role));
        tracing::debug!(?role, "run started");
        self.render();
        role
    }

    /// Abandons the current run and starts another. The leaderboard is kept.
    pub async fn restart(&mut self) -> Role {
        self.start_run().await
    }

    /// Opens door `index` on the current floor.
    pub async fn choose_door(&mut self, index: usize) -> Result<DoorType, ActionError> {
        let checked = self.check_door(index);
        let door = self.narrate(checked)?;
        let Some(run) = self.run.as_mut() else {
            return Err(ActionError::NoActiveRun);
        };
        run.chosen_this_floor = true;
        tracing::debug!(floor = run.floor, index, ?door, "door opened");

        let outcome = match door {
            DoorType::Loot => resolve_loot(run, &mut self.rng),
            DoorType::Trap => resolve_trap(run, &mut self.rng),
            DoorType::Stranger => resolve_stranger(run, &mut self.rng),
            DoorType::Shrine => {
                let answer = self.decisions.shrine_choice(run.floor).await;
                resolve_shrine(run, ShrineChoice::parse(answer.as_deref()))
            }
            DoorType::Cursed => {
                let accept = self.decisions.confirm_cursed().await.unwrap_or(false);
                resolve_cursed(run, accept, &mut self.rng)
            }
            DoorType::Merchant => {
                self.open_merchant(MerchantKind::Standard);
                return Ok(door);
            }
            DoorType::Monster => {
                self.begin_combat(false);
                return Ok(door);
            }
            DoorType::Boss => {
                self.open_merchant(MerchantKind::Special);
                self.log.push(LogKind::Boss, "The guardian stirs behind the gate...");
                self.render();
                tokio::time::sleep(BOSS_ENTRY_DELAY).await;
                self.begin_combat(true);
                return Ok(door);
            }
        };

        self.apply_event(outcome).await;
        Ok(door)
    }

    fn check_door(&self, index: usize) -> Result<DoorType, ActionError> {
        let run = live(self.run.as_ref())?;
        if self.merchant.is_some() {
            return Err(ActionError::MerchantOpen);
        }
        if self.combat.is_some() {
            return Err(ActionError::CombatInProgress);
        }
        if run.chosen_this_floor {
            return Err(ActionError::DoorAlreadyChosen);
        }
        self.doors.get(index).ok_or(ActionError::NoSuchDoor(index))
    }

    async fn apply_event(&mut self, outcome: EventOutcome) {
        self.status = outcome.status;
        self.log.extend(outcome.log);
        self.render();
        if outcome.run_ended {
            self.end_run().await;
        }
    }

    fn open_merchant(&mut self, kind: MerchantKind) {
        self.merchant = Some(kind);
        let greeting = match kind {
            MerchantKind::Standard => {
                self.status = MERCHANT_STATUS;
                "A merchant waves you over."
            }
            MerchantKind::Special => {
                self.status = BOSS_STATUS;
                "A merchant with rare gear blocks the way to the boss."
            }
        };
        self.log.push(LogKind::Merchant, greeting);
        self.render();
    }

    fn begin_combat(&mut self, is_boss: bool) {
        let Some(run) = self.run.as_ref() else {
            return;
        };
        let combat = start_combat(run, is_boss, &mut self.rng);
        if is_boss {
            self.log.push(
                LogKind::Boss,
                format!(
                    "A BOSS appears! HP {}, power {}.",
                    combat.monster_hp, combat.monster_power
                ),
            );
        } else {
            self.status = MONSTER_STATUS;
            self.log.push(
                LogKind::Bad,
                format!(
                    "A monster attacks! HP {}, power {}.",
                    combat.monster_hp, combat.monster_power
                ),
            );
        }
        self.combat = Some(combat);
        self.render();
    }

    /// Buys offer `index` from the open merchant.
    pub fn buy(&mut self, index: usize) -> Result<Purchase, ActionError> {
        let result = self.try_buy(index);
        let bought = self.narrate(result)?;
        let line = match bought {
            Purchase::Weapon { weapon, cost } => (
                LogKind::Gear,
                format!(
                    "You buy {} for {} gold. Power is now {}.",
                    weapon.name, cost, weapon.power
                ),
            ),
            Purchase::Armor { armor, cost } => (
                LogKind::Gear,
                format!(
                    "You buy {} for {} gold. +{} max HP.",
                    armor.name, cost, armor.hp_bonus
                ),
            ),
            Purchase::Stored { item, cost, .. } => (
                LogKind::Merchant,
                format!("You buy {} for {} gold.", item.name, cost),
            ),
        };
        self.log.push(line.0, line.1);
        self.render();
        Ok(bought)
    }

    fn try_buy(&mut self, index: usize) -> Result<Purchase, ActionError> {
        let run = live_mut(self.run.as_mut())?;
        let kind = self.merchant.ok_or(ActionError::MerchantClosed)?;
        purchase(run, kind, index)
    }

    /// Keeps asking which offer to buy until the player walks away, then
    /// closes the merchant. Refused purchases are narrated and the player may
    /// pick again.
    pub async fn browse_merchant(&mut self) -> Result<(), ActionError> {
        let checked = self.check_merchant();
        let kind = self.narrate(checked)?;
        loop {
            let gold = self.run.as_ref().map_or(0, |run| run.gold);
            let choice = self
                .decisions
                .merchant_choice(kind, merchant_stock(kind), gold)
                .await;
            let Some(index) = choice else {
                break;
            };
            self.buy(index).ok();
        }
        self.leave_merchant()
    }

    pub fn leave_merchant(&mut self) -> Result<(), ActionError> {
        let checked = self.check_merchant();
        self.narrate(checked)?;
        self.merchant = None;
        self.log.push(LogKind::Merchant, "You leave the merchant.");
        self.render();
        Ok(())
    }

    fn check_merchant(&self) -> Result<MerchantKind, ActionError> {
        live(self.run.as_ref())?;
        self.merchant.ok_or(ActionError::MerchantClosed)
    }

    pub async fn attack(&mut self) -> Result<Option<CombatConclusion>, ActionError> {
        self.act(PlayerAction::Attack).await
    }

    pub async fn defend(&mut self) -> Result<Option<CombatConclusion>, ActionError> {
        self.act(PlayerAction::Defend).await
    }

    /// Plays one full exchange: the player's action, then, if the monster
    /// survived, its delayed answer. Returns how the fight ended, or `None`
    /// if it goes on.
    pub async fn act(
        &mut self,
        action: PlayerAction,
    ) -> Result<Option<CombatConclusion>, ActionError> {
        match self.commit_action(action)? {
            Exchange::Finished(conclusion) => Ok(Some(conclusion)),
            Exchange::Pending(turn) => {
                tokio::time::sleep(turn.delay()).await;
                Ok(self.resolve_monster_turn(turn).await)
            }
        }
    }

    /// Resolves only the player's half of an exchange. A pending monster
    /// turn must be handed back to [`resolve_monster_turn`](Self::resolve_monster_turn)
    /// or [`cancel_monster_turn`](Self::cancel_monster_turn), or the fight
    /// never returns to the player. Kept inside the crate for that reason.
    pub(crate) fn commit_action(&mut self, action: PlayerAction) -> Result<Exchange, ActionError> {
        let result = self.try_player_turn(action);
        let report = self.narrate(result)?;

        if report.buff_expired {
            self.log.push(LogKind::Item, "Your strength buff wears off.");
        }
        match report.damage {
            Some(damage) => self
                .log
                .push(LogKind::Neutral, format!("You hit for {} damage!", damage)),
            None => self.log.push(LogKind::Neutral, "You raise your guard."),
        }
        self.render();

        match report.next {
            AfterPlayerTurn::MonsterTurn(turn) => Ok(Exchange::Pending(turn)),
            AfterPlayerTurn::Victory => self
                .settle_combat()
                .map(Exchange::Finished)
                .ok_or(ActionError::NoCombat),
        }
    }

    fn try_player_turn(&mut self, action: PlayerAction) -> Result<PlayerTurnReport, ActionError> {
        live(self.run.as_ref())?;
        let combat = self.combat.as_mut().ok_or(ActionError::NoCombat)?;
        combat.player_turn(action, &mut self.rng)
    }

    /// Lets a pending monster turn land. Ends the run if it kills the player.
    pub(crate) async fn resolve_monster_turn(
        &mut self,
        turn: ScheduledMonsterTurn,
    ) -> Option<CombatConclusion> {
        let combat = self.combat.as_mut()?;
        let report = combat.monster_turn(turn, &mut self.rng)?;

        let line = if report.damage < report.base_damage {
            format!(
                "The monster hits you for {} ({} blocked).",
                report.damage,
                report.base_damage - report.damage
            )
        } else {
            format!("The monster hits you for {}!", report.damage)
        };
        self.log.push(LogKind::Bad, line);
        self.render();

        report.outcome?;
        let conclusion = self.settle_combat();
        if conclusion == Some(CombatConclusion::Defeat) {
            self.end_run().await;
        }
        conclusion
    }

    /// Drops a pending monster turn; the player acts again.
    pub(crate) fn cancel_monster_turn(&mut self, turn: ScheduledMonsterTurn) {
        let Some(combat) = self.combat.as_mut() else {
            return;
        };
        turn.cancel(combat);
        self.log.push(LogKind::Neutral, "The monster hesitates.");
        self.render();
    }

    /// Writes a finished fight back into the run and tears it down.
    fn settle_combat(&mut self) -> Option<CombatConclusion> {
        let run = self.run.as_mut()?;
        let combat = self.combat.as_ref()?;
        let conclusion = conclude_combat(run, combat, &mut self.rng)?;
        self.combat = None;

        match &conclusion {
            CombatConclusion::Victory(VictoryReward::Gold(gold)) => self.log.push(
                LogKind::Loot,
                format!("The monster falls. +{} gold.", gold),
            ),
            CombatConclusion::Victory(VictoryReward::Boss {
                max_hp,
                power,
                pickups,
            }) => {
                self.log.push(
                    LogKind::Boss,
                    format!(
                        "The boss is slain! +{} max HP, +{} power.",
                        max_hp, power
                    ),
                );
                for pickup in pickups {
                    match pickup {
                        Pickup::Found { item, .. } => self
                            .log
                            .push(LogKind::Item, format!("Found item: {}", item.name)),
                        Pickup::InventoryFull => self.log.push(LogKind::Trap, "Inventory full!"),
                    }
                }
            }
            CombatConclusion::Defeat => self.log.push(LogKind::Bad, "You were slain."),
        }
        self.render();
        Some(conclusion)
    }

    /// Uses the item in `slot`. Empty or invalid slots do nothing. Never
    /// costs a combat turn.
    pub async fn use_item(&mut self, slot: usize) -> Result<Option<ItemUse>, ActionError> {
        let checked = live(self.run.as_ref()).map(|_| ());
        self.narrate(checked)?;
        let Some(run) = self.run.as_mut() else {
            return Err(ActionError::NoActiveRun);
        };
        let Some(used) = use_item(run, self.combat.as_mut(), slot) else {
            return Ok(None);
        };

        let line = match used {
            ItemUse::Healed { item, amount } => {
                format!("You use {} and recover {} HP.", item.name, amount)
            }
            ItemUse::Struck { item, amount, .. } => {
                format!("You use {}. It deals {} damage!", item.name, amount)
            }
            ItemUse::Buffed { item, power, turns } => format!(
                "You use {}. +{} power for {} turns.",
                item.name, power, turns
            ),
            ItemUse::Shielded { item, turns } => format!(
                "You use {}. A shield shimmers around you for {} turns.",
                item.name, turns
            ),
            ItemUse::Wasted { item } => {
                format!("You use {}, but nothing happens.", item.name)
            }
        };
        self.log.push(LogKind::Item, line);
        self.render();

        if let ItemUse::Struck { killed: true, .. } = used {
            if self.settle_combat() == Some(CombatConclusion::Defeat) {
                self.end_run().await;
            }
        }
        Ok(Some(used))
    }

    /// Asks which slot to use, then uses it.
    pub async fn use_item_prompt(&mut self) -> Result<Option<ItemUse>, ActionError> {
        let checked = live(self.run.as_ref()).map(|_| ());
        self.narrate(checked)?;
        let answer = self.decisions.item_slot().await;
        match parse_slot(answer.as_deref()) {
            Some(slot) => self.use_item(slot).await,
            None => Ok(None),
        }
    }

    /// Climbs to the next floor. Returns the new floor number.
    pub fn next_floor(&mut self) -> Result<u32, ActionError> {
        let checked = self.check_next_floor();
        self.narrate(checked)?;
        let Some(run) = self.run.as_mut() else {
            return Err(ActionError::NoActiveRun);
        };
        run.floor += 1;
        run.chosen_this_floor = false;
        let floor = run.floor;
        let boss_floor = run.is_boss_floor();

        self.doors = generate_doors(floor, &mut self.rng);
        self.status = FLOOR_STATUS;
        if boss_floor {
            self.log.push(
                LogKind::Boss,
                format!("Floor {}. Something huge breathes behind one of these doors.", floor),
            );
        } else {
            self.log
                .push(LogKind::Neutral, format!("You climb to floor {}.", floor));
        }
        tracing::debug!(floor, "next floor");
        self.render();
        Ok(floor)
    }

    fn check_next_floor(&self) -> Result<(), ActionError> {
        let run = live(self.run.as_ref())?;
        if self.merchant.is_some() {
            return Err(ActionError::MerchantOpen);
        }
        if self.combat.is_some() {
            return Err(ActionError::CombatInProgress);
        }
        if !run.chosen_this_floor {
            return Err(ActionError::DoorNotChosen);
        }
        Ok(())
    }

    /// Closes out a dead run and offers the leaderboard.
    async fn end_run(&mut self) {
        let Some(run) = self.run.as_ref() else {
            return;
        };
        let (gold, role) = (run.gold, run.role);
        self.status = DEAD_STATUS;
        self.log.push(
            LogKind::Bad,
            format!("Your run ends with {} gold.", gold),
        );
        tracing::debug!(gold, ?role, "run ended");
        self.render();

        let name = self
            .decisions
            .player_name(gold)
            .await
            .filter(|name| !name.is_empty());
        let Some(name) = name else {
            self.log.push(LogKind::Neutral, "Score not recorded.");
            self.render();
            return;
        };

        let entry = LeaderboardEntry::new(name.clone(), gold, role);
        match self.leaderboard.record(entry) {
            Ok(_) => self
                .log
                .push(LogKind::Good, format!("Score saved for {}.", name)),
            Err(err) => {
                tracing::warn!(%err, "failed to save leaderboard");
                self.log.push(LogKind::Bad, "Could not save the leaderboard.");
            }
        }
        self.render();
    }

    fn narrate<T>(&mut self, result: Result<T, ActionError>) -> Result<T, ActionError> {
        if let Err(err) = &result {
            tracing::debug!(%err, "action refused");
            let kind = match err {
                ActionError::NotEnoughGold { .. }
                | ActionError::InventoryFull
                | ActionError::NoSuchOffer(_)
                | ActionError::MerchantOpen => LogKind::Merchant,
                _ => LogKind::Neutral,
            };
            self.log.push(kind, sentence(&err.to_string()));
            self.render();
        }
        result
    }

    fn render(&mut self) {
        let view = SessionView {
            run: self.run.as_ref(),
            combat: self.combat.as_ref(),
            merchant: self.merchant,
            status: self.status,
            log: &self.log,
        };
        self.renderer.render(&view);
    }
}

fn live(run: Option<&RunState>) -> Result<&RunState, ActionError> {
    match run {
        None => Err(ActionError::NoActiveRun),
        Some(run) if run.dead => Err(ActionError::RunEnded),
        Some(run) => Ok(run),
    }
}

fn live_mut(run: Option<&mut RunState>) -> Result<&mut RunState, ActionError> {
    match run {
        None => Err(ActionError::NoActiveRun),
        Some(run) if run.dead => Err(ActionError::RunEnded),
        Some(run) => Ok(run),
    }
}

fn sentence(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).chain(['.']).collect(),
        None => String::new(),
    }
}
