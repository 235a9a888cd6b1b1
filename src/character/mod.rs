//! Playable roles and their starting stats.

pub mod role;

pub use role::*;
