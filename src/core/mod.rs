//! Run state and the shared plumbing every system builds on.

pub mod constants;
pub mod error;
pub mod log;
pub mod rng;
pub mod run_state;

pub use constants::*;
pub use error::*;
pub use log::*;
pub use rng::*;
pub use run_state::*;
