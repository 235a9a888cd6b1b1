//! Integration test: whole runs driven through the session
//!
//! Every roll is scripted so each scenario replays exactly: door layouts,
//! event rolls, monster stats and hits. Timers run on tokio's paused clock.

use loot_tower::character::Role;
use loot_tower::combat::CombatConclusion;
use loot_tower::core::constants::{BOSS_ENTRY_DELAY, MONSTER_TURN_DELAY};
use loot_tower::core::error::ActionError;
use loot_tower::core::rng::ScriptedRandom;
use loot_tower::dungeon::{DoorType, RARE_DOOR_ODDS};
use loot_tower::economy::ItemUse;
use loot_tower::items::{MerchantKind, BASE_ITEMS};
use loot_tower::leaderboard::MemoryStore;
use loot_tower::session::{NullRenderer, ScriptedDecisions, Session};
use tokio::time::Instant;

type TestSession = Session<ScriptedRandom, ScriptedDecisions>;

/// Uniform values that land in door slot 0, 1 and 2.
const SLOT_ROLLS: [f64; 3] = [0.1, 0.5, 0.9];

fn new_session(decisions: ScriptedDecisions) -> TestSession {
    Session::new(
        ScriptedRandom::default(),
        decisions,
        NullRenderer,
        MemoryStore::new(),
    )
}

fn push(session: &mut TestSession, rolls: &[f64]) {
    for roll in rolls {
        session.rng_mut().push(*roll);
    }
}

/// Door-generation rolls: every rare trial misses except `door`, which lands
/// in `slot`.
fn floor_rolls(door: Option<(DoorType, usize)>) -> Vec<f64> {
    let mut rolls = Vec::new();
    for (kind, _) in RARE_DOOR_ODDS {
        match door {
            Some((wanted, slot)) if wanted == kind => {
                rolls.push(0.0);
                rolls.push(SLOT_ROLLS[slot]);
            }
            _ => rolls.push(0.99),
        }
    }
    rolls
}

/// Opens an empty loot door (no coins) and climbs, laying out the next
/// floor with `next`.
async fn loot_and_climb(session: &mut TestSession, next: Vec<f64>) {
    push(session, &[0.0]);
    assert_eq!(session.choose_door(0).await, Ok(DoorType::Loot));
    push(session, &next);
    session.next_floor().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_warrior_loot_then_monster() {
    let mut session = new_session(ScriptedDecisions::new().with_role("warrior"));
    push(&mut session, &floor_rolls(None));
    assert_eq!(session.start_run().await, Role::Warrior);

    // Floor 1: the loot room rolls zero coins.
    loot_and_climb(
        &mut session,
        floor_rolls(Some((DoorType::Monster, 1))),
    )
    .await;
    let run = session.run().unwrap();
    assert_eq!(run.floor, 2);
    assert_eq!(run.gold, 0);
    assert_eq!(session.doors().get(1), Some(DoorType::Monster));

    // Floor 2 monster: 8 + 0 + 2/2 = 9 HP, power 1.
    push(&mut session, &[0.0, 0.0]);
    assert_eq!(session.choose_door(1).await, Ok(DoorType::Monster));
    let combat = session.combat().unwrap();
    assert_eq!(combat.monster_hp, 9);
    assert_eq!(combat.monster_power, 1);
    assert!(!combat.is_boss);

    // 7/2 + 6 + 1 = 10 kills outright; gold 8 + 1 + 4.
    let started = Instant::now();
    push(&mut session, &[0.99, 0.5]);
    let result = session.attack().await.unwrap();
    assert!(matches!(result, Some(CombatConclusion::Victory(_))));
    assert!(started.elapsed() < MONSTER_TURN_DELAY);

    let run = session.run().unwrap();
    assert_eq!(run.gold, 13);
    assert_eq!(run.hp(), 30);
    assert!(session.combat().is_none());
    assert!(session.log().contains("+13 gold"));

    push(&mut session, &floor_rolls(None));
    assert_eq!(session.next_floor(), Ok(3));
}

#[tokio::test(start_paused = true)]
async fn test_monster_turn_waits_before_striking() {
    let mut session = new_session(ScriptedDecisions::new());
    push(&mut session, &floor_rolls(Some((DoorType::Monster, 0))));
    session.start_run().await;

    // 8 + 3 + 0 = 11 HP, power 1.
    push(&mut session, &[0.99, 0.0]);
    session.choose_door(0).await.unwrap();

    let started = Instant::now();
    // Hit for 3 + 0 + 1 = 4, monster answers for 1.
    push(&mut session, &[0.0, 0.0]);
    assert_eq!(session.attack().await, Ok(None));
    assert!(started.elapsed() >= MONSTER_TURN_DELAY);

    let combat = session.combat().unwrap();
    assert_eq!(combat.monster_hp, 7);
    assert_eq!(combat.player_hp, 29);
    // The run's own HP only changes when the fight is written back.
    assert_eq!(session.run().unwrap().hp(), 30);
    assert_eq!(
        session.next_floor(),
        Err(ActionError::CombatInProgress)
    );
}

#[tokio::test(start_paused = true)]
async fn test_boss_floor_merchant_then_fight_to_death() {
    let decisions = ScriptedDecisions::new().with_name("Ada");
    let mut session = new_session(decisions);
    push(&mut session, &floor_rolls(None));
    session.start_run().await;

    for floor in 2..=25 {
        let mut next = floor_rolls(None);
        if floor == 25 {
            next.push(SLOT_ROLLS[2]);
        }
        loot_and_climb(&mut session, next).await;
    }
    assert_eq!(session.run().unwrap().floor, 25);
    assert_eq!(session.doors().count(DoorType::Boss), 1);
    assert_eq!(session.doors().get(2), Some(DoorType::Boss));

    let started = Instant::now();
    assert_eq!(session.choose_door(2).await, Ok(DoorType::Boss));
    assert!(started.elapsed() >= BOSS_ENTRY_DELAY);
    assert_eq!(session.merchant(), Some(MerchantKind::Special));
    let combat = session.combat().unwrap();
    assert!(combat.is_boss);
    assert_eq!(combat.monster_hp, 90);
    assert_eq!(combat.monster_power, 16);

    // Excalibur is out of reach with no gold.
    assert!(matches!(
        session.buy(0),
        Err(ActionError::NotEnoughGold { cost: 180, gold: 0, .. })
    ));
    assert_eq!(session.next_floor(), Err(ActionError::MerchantOpen));
    session.leave_merchant().unwrap();
    assert_eq!(session.next_floor(), Err(ActionError::CombatInProgress));

    // Defending halves the 16-point hit.
    push(&mut session, &[0.99]);
    assert_eq!(session.defend().await, Ok(None));
    assert_eq!(session.combat().unwrap().player_hp, 22);

    push(&mut session, &[0.0, 0.99]);
    assert_eq!(session.attack().await, Ok(None));
    let combat = session.combat().unwrap();
    assert_eq!(combat.player_hp, 6);
    assert_eq!(combat.monster_hp, 86);

    push(&mut session, &[0.0, 0.99]);
    assert_eq!(
        session.attack().await,
        Ok(Some(CombatConclusion::Defeat))
    );

    let run = session.run().unwrap();
    assert!(run.dead);
    assert_eq!(run.hp(), 0);
    assert!(session.combat().is_none());

    let board = session.leaderboard();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].name, "Ada");
    assert_eq!(board[0].gold, 0);
    assert_eq!(board[0].role, Role::Warrior);
}

#[tokio::test(start_paused = true)]
async fn test_traps_kill_and_freeze_the_run() {
    let decisions = ScriptedDecisions::new().with_role("Mage").with_name("Zed");
    let mut session = new_session(decisions);
    let trap_floor = floor_rolls(Some((DoorType::Trap, 0)));
    push(&mut session, &trap_floor);
    session.start_run().await;

    // 7 damage per trap: 22 -> 15 -> 8 -> 1 -> dead.
    for _ in 0..3 {
        push(&mut session, &[0.99]);
        session.choose_door(0).await.unwrap();
        push(&mut session, &trap_floor);
        session.next_floor().unwrap();
    }
    assert_eq!(session.run().unwrap().hp(), 1);

    push(&mut session, &[0.99]);
    session.choose_door(0).await.unwrap();
    let run = session.run().unwrap();
    assert!(run.dead);
    assert_eq!(run.hp(), 0);
    assert!(session.log().contains("You died to a trap."));

    assert_eq!(session.next_floor(), Err(ActionError::RunEnded));
    assert_eq!(session.choose_door(1).await, Err(ActionError::RunEnded));
    assert_eq!(session.attack().await, Err(ActionError::RunEnded));
    assert_eq!(session.use_item(0).await, Err(ActionError::RunEnded));

    let board = session.leaderboard();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].name, "Zed");
    assert_eq!(board[0].gold, 10);
    assert_eq!(board[0].role, Role::Mage);

    // A fresh run keeps the board.
    push(&mut session, &floor_rolls(None));
    assert_eq!(session.restart().await, Role::Warrior);
    assert!(!session.run().unwrap().dead);
    assert_eq!(session.leaderboard().len(), 1);
}

/// Walks a fresh mage into traps until the run ends.
async fn die_to_traps(session: &mut TestSession) {
    let trap_floor = floor_rolls(Some((DoorType::Trap, 0)));
    push(session, &trap_floor);
    session.start_run().await;

    for _ in 0..4 {
        push(session, &[0.99]);
        session.choose_door(0).await.unwrap();
        if session.run().unwrap().dead {
            break;
        }
        push(session, &trap_floor);
        session.next_floor().unwrap();
    }
    assert!(session.run().unwrap().dead);
}

#[tokio::test(start_paused = true)]
async fn test_empty_name_is_not_recorded() {
    let decisions = ScriptedDecisions::new().with_role("mage").with_name("");
    let mut session = new_session(decisions);
    die_to_traps(&mut session).await;
    assert!(session.leaderboard().is_empty());
    assert!(session.log().contains("Score not recorded."));
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_name_is_not_recorded() {
    let decisions = ScriptedDecisions::new().with_role("mage");
    let mut session = new_session(decisions);
    die_to_traps(&mut session).await;
    assert!(session.leaderboard().is_empty());
    assert!(session.log().contains("Score not recorded."));
}

#[tokio::test(start_paused = true)]
async fn test_blank_name_is_recorded_as_given() {
    let decisions = ScriptedDecisions::new().with_role("mage").with_name("   ");
    let mut session = new_session(decisions);
    die_to_traps(&mut session).await;
    let board = session.leaderboard();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].name, "   ");
    assert_eq!(board[0].role, Role::Mage);
}

#[tokio::test(start_paused = true)]
async fn test_merchant_blocks_next_floor_until_left() {
    let decisions = ScriptedDecisions::new()
        .with_role("rogue")
        .with_purchases([Some(0), Some(7), None]);
    let mut session = new_session(decisions);
    push(&mut session, &floor_rolls(Some((DoorType::Merchant, 0))));
    session.start_run().await;

    assert_eq!(session.choose_door(0).await, Ok(DoorType::Merchant));
    assert_eq!(session.merchant(), Some(MerchantKind::Standard));
    assert_eq!(session.next_floor(), Err(ActionError::MerchantOpen));
    assert!(session
        .log()
        .contains("You must leave the merchant before continuing to the next floor."));

    // Mega Potion costs 40; the rogue has 30. Offer 7 does not exist.
    session.browse_merchant().await.unwrap();
    assert!(session.log().contains("Not enough gold for Mega Potion"));
    assert!(session.log().contains("The merchant has no offer 7"));
    assert_eq!(session.merchant(), None);
    assert_eq!(session.run().unwrap().gold, 30);

    assert_eq!(session.leave_merchant(), Err(ActionError::MerchantClosed));
    push(&mut session, &floor_rolls(None));
    assert_eq!(session.next_floor(), Ok(2));
}

#[tokio::test(start_paused = true)]
async fn test_cursed_items_carry_into_next_fight() {
    let decisions = ScriptedDecisions::new().with_cursed(true).with_slot("9");
    let mut session = new_session(decisions);
    push(&mut session, &floor_rolls(Some((DoorType::Cursed, 0))));
    session.start_run().await;

    // Curse burns 8, then the item branch: Health Potion, One-Shot Gun.
    push(&mut session, &[0.99, 0.0, 0.25]);
    session.choose_door(0).await.unwrap();
    let run = session.run().unwrap();
    assert_eq!(run.hp(), 22);
    assert_eq!(run.inventory.get(0), Some(&BASE_ITEMS[0]));
    assert_eq!(run.inventory.get(1), Some(&BASE_ITEMS[1]));

    push(&mut session, &floor_rolls(Some((DoorType::Monster, 0))));
    session.next_floor().unwrap();
    push(&mut session, &[0.0, 0.0]);
    session.choose_door(0).await.unwrap();

    // Healing mid-fight lands on the run's HP, not the fight's, and costs no turn.
    let used = session.use_item(0).await.unwrap();
    assert!(matches!(used, Some(ItemUse::Healed { amount: 8, .. })));
    assert_eq!(session.run().unwrap().hp(), 30);
    let combat = session.combat().unwrap();
    assert_eq!(combat.player_hp, 22);
    assert_eq!(combat.monster_hp, 9);

    // An out-of-range slot typed at the prompt is ignored.
    assert_eq!(session.use_item_prompt().await, Ok(None));
    assert_eq!(session.use_item(2).await, Ok(None));

    // The gun kills the 9 HP monster; gold 8 + 1 + 0. Victory writes the
    // fight's HP back, so the potion is gone for nothing.
    let used = session.use_item(1).await.unwrap();
    assert!(matches!(used, Some(ItemUse::Struck { killed: true, .. })));
    assert!(session.combat().is_none());
    let run = session.run().unwrap();
    assert_eq!(run.hp(), 22);
    assert_eq!(run.gold, 9);
    assert_eq!(run.inventory.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_shrine_blessing_from_decision() {
    let decisions = ScriptedDecisions::new().with_shrine("power");
    let mut session = new_session(decisions);
    push(&mut session, &floor_rolls(Some((DoorType::Shrine, 2))));
    session.start_run().await;

    assert_eq!(session.choose_door(2).await, Ok(DoorType::Shrine));
    assert_eq!(session.run().unwrap().power, 8);
    assert_eq!(session.status().title, "Ancient Shrine");

    // Cancelled answers walk away.
    push(&mut session, &floor_rolls(Some((DoorType::Shrine, 0))));
    session.next_floor().unwrap();
    session.choose_door(0).await.unwrap();
    let run = session.run().unwrap();
    assert_eq!(run.power, 8);
    assert_eq!(run.max_hp(), 30);
}
