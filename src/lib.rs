//! Loot Tower - a floor-by-floor dungeon crawl.
//!
//! Game rules live in plain modules; [`session::Session`] ties them into a
//! playable run behind a decision provider and a renderer.

pub mod character;
pub mod combat;
pub mod core;
pub mod dungeon;
pub mod economy;
pub mod events;
pub mod items;
pub mod leaderboard;
pub mod rewards;
pub mod session;
pub mod utils;
