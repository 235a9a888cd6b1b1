//! Mutable state of a single run.

use crate::character::Role;
use crate::core::constants::{BOSS_FLOOR_INTERVAL, INVENTORY_SLOTS};
use crate::core::error::ActionError;
use crate::items::{Armor, Item, Weapon};

/// Fixed three-slot consumable bag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    slots: [Option<Item>; INVENTORY_SLOTS],
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    pub fn is_full(&self) -> bool {
        self.first_empty().is_none()
    }

    /// Places the item in the first empty slot and returns that slot.
    pub fn insert(&mut self, item: Item) -> Result<usize, ActionError> {
        let slot = self.first_empty().ok_or(ActionError::InventoryFull)?;
        self.slots[slot] = Some(item);
        Ok(slot)
    }

    pub fn get(&self, slot: usize) -> Option<&Item> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Empties the slot, returning what was in it.
    pub fn take(&mut self, slot: usize) -> Option<Item> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    pub fn slots(&self) -> &[Option<Item>; INVENTORY_SLOTS] {
        &self.slots
    }

    pub fn count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

/// Everything that persists across floors for one run.
///
/// `hp` never exceeds `max_hp`; both only move through the methods below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    pub floor: u32,
    hp: u32,
    max_hp: u32,
    pub power: u32,
    pub gold: u32,
    pub role: Role,
    pub weapon: Option<Weapon>,
    pub armor: Option<Armor>,
    pub inventory: Inventory,
    pub chosen_this_floor: bool,
    pub dead: bool,
}

impl RunState {
    pub fn new(role: Role) -> Self {
        let stats = role.stats();
        Self {
            floor: 1,
            hp: stats.hp,
            max_hp: stats.hp,
            power: stats.power,
            gold: stats.gold,
            role,
            weapon: None,
            armor: None,
            inventory: Inventory::new(),
            chosen_this_floor: false,
            dead: false,
        }
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn is_boss_floor(&self) -> bool {
        self.floor % BOSS_FLOOR_INTERVAL == 0
    }

    /// Heals up to `max_hp`. Returns the HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    /// Applies damage, flooring HP at 0. Returns true when HP hits 0.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.hp = self.hp.saturating_sub(amount);
        self.hp == 0
    }

    /// Raises max HP and current HP by the same amount.
    pub fn raise_max_hp(&mut self, amount: u32) {
        self.max_hp = self.max_hp.saturating_add(amount);
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    /// Sets HP from a finished fight, clamped to `max_hp`.
    pub fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(self.max_hp);
    }

    /// Terminal transition: HP to 0 and no further play.
    pub fn mark_dead(&mut self) {
        self.hp = 0;
        self.dead = true;
    }
}
