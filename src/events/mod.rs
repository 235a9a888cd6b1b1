//! Traps, strangers, shrines, curses and empty rooms.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
