//! Top-ten board of finished runs.

pub mod store;
pub mod types;

pub use store::*;
pub use types::*;
