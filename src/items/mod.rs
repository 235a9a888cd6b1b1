//! Consumables, gear and merchant stock.

pub mod catalog;
pub mod types;

pub use catalog::*;
pub use types::*;
