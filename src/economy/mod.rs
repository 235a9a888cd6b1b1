//! Inventory, consumables and merchant trade.

pub mod inventory;
pub mod merchant;

pub use inventory::*;
pub use merchant::*;
