//! Floors and the doors they offer.

pub mod generation;
pub mod types;

pub use generation::*;
pub use types::*;
