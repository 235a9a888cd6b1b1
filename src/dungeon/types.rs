//! Door types and the per-floor door set.

use crate::core::constants::DOORS_PER_FLOOR;

/// What waits behind a door. Hidden until the door is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoorType {
    /// Empty room, a few coins at most
    Loot,
    /// Regular fight
    Monster,
    /// Shop with standard stock
    Merchant,
    /// Hidden blades, 3-7 damage
    Trap,
    /// Kind stranger, heals 6-11
    Stranger,
    /// Choose +max HP or +power
    Shrine,
    /// Gamble 8 HP for a big reward
    Cursed,
    /// Boss fight with special stock, guaranteed on boss floors
    Boss,
}

impl DoorType {
    pub fn is_combat(&self) -> bool {
        matches!(self, DoorType::Monster | DoorType::Boss)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DoorType::Loot => "loot",
            DoorType::Monster => "monster",
            DoorType::Merchant => "merchant",
            DoorType::Trap => "trap",
            DoorType::Stranger => "stranger",
            DoorType::Shrine => "shrine",
            DoorType::Cursed => "cursed",
            DoorType::Boss => "boss",
        }
    }
}

/// The three doors offered on one floor, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorSet {
    doors: [DoorType; DOORS_PER_FLOOR],
}

impl DoorSet {
    pub fn new(doors: [DoorType; DOORS_PER_FLOOR]) -> Self {
        Self { doors }
    }

    pub fn all_loot() -> Self {
        Self::new([DoorType::Loot; DOORS_PER_FLOOR])
    }

    pub fn get(&self, index: usize) -> Option<DoorType> {
        self.doors.get(index).copied()
    }

    pub(crate) fn set(&mut self, index: usize, door: DoorType) {
        self.doors[index] = door;
    }

    pub fn doors(&self) -> &[DoorType; DOORS_PER_FLOOR] {
        &self.doors
    }

    pub fn count(&self, door: DoorType) -> usize {
        self.doors.iter().filter(|d| **d == door).count()
    }
}

impl Default for DoorSet {
    fn default() -> Self {
        Self::all_loot()
    }
}
