//! Picking up and using consumables.

use crate::combat::CombatState;
use crate::core::constants::INVENTORY_SLOTS;
use crate::core::rng::RandomSource;
use crate::core::run_state::RunState;
use crate::items::{Item, ItemEffect, BASE_ITEMS};

/// Result of trying to pick up a random item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pickup {
    Found { item: Item, slot: usize },
    InventoryFull,
}

/// Adds one uniformly chosen base item to the first empty slot.
/// A full inventory rolls nothing and changes nothing.
pub fn add_random_item(state: &mut RunState, rng: &mut impl RandomSource) -> Pickup {
    if state.inventory.is_full() {
        return Pickup::InventoryFull;
    }
    let item = BASE_ITEMS[rng.pick_index(BASE_ITEMS.len())];
    match state.inventory.insert(item) {
        Ok(slot) => Pickup::Found { item, slot },
        Err(_) => Pickup::InventoryFull,
    }
}

/// Parses a slot typed by the player. Anything but `0..3` is ignored.
pub fn parse_slot(input: Option<&str>) -> Option<usize> {
    input?
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|slot| *slot < INVENTORY_SLOTS)
}

/// What using an item did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemUse {
    Healed { item: Item, amount: u32 },
    Struck { item: Item, amount: u32, killed: bool },
    Buffed { item: Item, power: u32, turns: u32 },
    Shielded { item: Item, turns: u32 },
    /// Combat-only item used outside a fight. Still consumed.
    Wasted { item: Item },
}

impl ItemUse {
    pub fn item(&self) -> Item {
        match *self {
            ItemUse::Healed { item, .. }
            | ItemUse::Struck { item, .. }
            | ItemUse::Buffed { item, .. }
            | ItemUse::Shielded { item, .. }
            | ItemUse::Wasted { item } => item,
        }
    }
}

/// Consumes the item in `slot`. Returns `None` for an empty or invalid slot.
///
/// Heals always land on the run's HP, even mid-fight, where the fight's HP
/// overwrites them once it concludes. Damage, buff and shield items need a
/// running fight; without one they are used up for nothing.
pub fn use_item(
    state: &mut RunState,
    combat: Option<&mut CombatState>,
    slot: usize,
) -> Option<ItemUse> {
    let item = state.inventory.take(slot)?;
    let combat = combat.filter(|c| !c.finished());

    let used = match (item.effect, combat) {
        (ItemEffect::Heal(value), _) => ItemUse::Healed {
            item,
            amount: state.heal(value),
        },
        (ItemEffect::Damage(value), Some(combat)) => ItemUse::Struck {
            item,
            amount: value,
            killed: combat.strike_with_item(value),
        },
        (ItemEffect::Buff { power, turns }, Some(combat)) => {
            combat.activate_buff(power, turns);
            ItemUse::Buffed { item, power, turns }
        }
        (ItemEffect::Shield { turns }, Some(combat)) => {
            combat.activate_shield(turns);
            ItemUse::Shielded { item, turns }
        }
        (_, None) => ItemUse::Wasted { item },
    };
    tracing::debug!(item = item.name, slot, ?used, "item used");
    Some(used)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Role;
    use crate::combat::{conclude_combat, start_combat, CombatOutcome};
    use crate::core::rng::ScriptedRandom;

    fn fill_inventory(state: &mut RunState) {
        for item in BASE_ITEMS.iter().take(INVENTORY_SLOTS) {
            state.inventory.insert(*item).unwrap();
        }
    }

    #[test]
    fn test_pickup_uses_first_empty_slot() {
        let mut state = RunState::new(Role::Warrior);
        let mut rng = ScriptedRandom::new([0.85]);
        assert_eq!(
            add_random_item(&mut state, &mut rng),
            Pickup::Found {
                item: BASE_ITEMS[4],
                slot: 0
            }
        );
    }

    #[test]
    fn test_pickup_when_full_changes_nothing() {
        let mut state = RunState::new(Role::Warrior);
        fill_inventory(&mut state);
        let before = state.inventory.clone();
        let mut rng = ScriptedRandom::new([0.5]);
        assert_eq!(add_random_item(&mut state, &mut rng), Pickup::InventoryFull);
        assert_eq!(state.inventory, before);
        assert_eq!(rng.remaining(), 1);
    }

    #[test]
    fn test_parse_slot() {
        assert_eq!(parse_slot(Some("0")), Some(0));
        assert_eq!(parse_slot(Some(" 2 ")), Some(2));
        assert_eq!(parse_slot(Some("3")), None);
        assert_eq!(parse_slot(Some("-1")), None);
        assert_eq!(parse_slot(Some("potion")), None);
        assert_eq!(parse_slot(None), None);
    }

    #[test]
    fn test_heal_outside_combat_clamps() {
        let mut state = RunState::new(Role::Warrior);
        state.take_damage(5);
        state.inventory.insert(BASE_ITEMS[0]).unwrap();
        let used = use_item(&mut state, None, 0).unwrap();
        assert_eq!(
            used,
            ItemUse::Healed {
                item: BASE_ITEMS[0],
                amount: 5
            }
        );
        assert_eq!(state.hp(), 30);
        assert!(state.inventory.get(0).is_none());
    }

    #[test]
    fn test_damage_item_outside_combat_is_consumed_for_nothing() {
        let mut state = RunState::new(Role::Warrior);
        state.inventory.insert(BASE_ITEMS[1]).unwrap();
        let used = use_item(&mut state, None, 0).unwrap();
        assert_eq!(used, ItemUse::Wasted { item: BASE_ITEMS[1] });
        assert_eq!(state.inventory.count(), 0);
    }

    #[test]
    fn test_empty_or_invalid_slot_is_ignored() {
        let mut state = RunState::new(Role::Warrior);
        let before = state.clone();
        assert!(use_item(&mut state, None, 1).is_none());
        assert!(use_item(&mut state, None, 9).is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn test_damage_item_in_combat_can_win() {
        let mut state = RunState::new(Role::Warrior);
        state.inventory.insert(BASE_ITEMS[1]).unwrap();
        let mut rng = ScriptedRandom::default();
        let mut combat = start_combat(&state, false, &mut rng);

        let used = use_item(&mut state, Some(&mut combat), 0).unwrap();
        assert_eq!(
            used,
            ItemUse::Struck {
                item: BASE_ITEMS[1],
                amount: 30,
                killed: true
            }
        );
        assert_eq!(combat.outcome(), Some(CombatOutcome::Victory));
    }

    #[test]
    fn test_buff_and_shield_in_combat() {
        let mut state = RunState::new(Role::Warrior);
        state.inventory.insert(BASE_ITEMS[2]).unwrap();
        state.inventory.insert(BASE_ITEMS[3]).unwrap();
        let mut rng = ScriptedRandom::default();
        let mut combat = start_combat(&state, true, &mut rng);

        use_item(&mut state, Some(&mut combat), 0);
        use_item(&mut state, Some(&mut combat), 1);

        assert_eq!(combat.player_power, 12);
        assert_eq!(combat.buff_bonus, 5);
        assert_eq!(combat.buff_turns_remaining, 3);
        assert_eq!(combat.shield_turns_remaining, 3);
        assert_eq!(state.inventory.count(), 0);
    }

    #[test]
    fn test_shield_overwrites_rather_than_adds() {
        let mut state = RunState::new(Role::Warrior);
        state.inventory.insert(BASE_ITEMS[3]).unwrap();
        let mut rng = ScriptedRandom::default();
        let mut combat = start_combat(&state, true, &mut rng);
        combat.activate_shield(1);
        use_item(&mut state, Some(&mut combat), 0);
        assert_eq!(combat.shield_turns_remaining, 3);
    }

    #[test]
    fn test_heal_in_combat_leaves_fight_hp_alone() {
        let mut state = RunState::new(Role::Warrior);
        state.take_damage(20);
        state.inventory.insert(BASE_ITEMS[0]).unwrap();
        let mut rng = ScriptedRandom::default();
        let mut combat = start_combat(&state, false, &mut rng);
        combat.player_hp = 4;

        let used = use_item(&mut state, Some(&mut combat), 0).unwrap();
        assert_eq!(
            used,
            ItemUse::Healed {
                item: BASE_ITEMS[0],
                amount: 20
            }
        );
        assert_eq!(combat.player_hp, 4);
        assert_eq!(state.hp(), 30);
    }

    #[test]
    fn test_heal_in_combat_is_lost_on_victory() {
        let mut state = RunState::new(Role::Warrior);
        state.take_damage(20);
        state.inventory.insert(BASE_ITEMS[0]).unwrap();
        state.inventory.insert(BASE_ITEMS[1]).unwrap();
        let mut rng = ScriptedRandom::default();
        let mut combat = start_combat(&state, false, &mut rng);

        use_item(&mut state, Some(&mut combat), 0);
        assert_eq!(state.hp(), 30);
        use_item(&mut state, Some(&mut combat), 1);
        assert_eq!(combat.outcome(), Some(CombatOutcome::Victory));

        conclude_combat(&mut state, &combat, &mut rng);
        assert_eq!(state.hp(), 10);
    }
}
