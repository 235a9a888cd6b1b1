//! Utility modules: build info and persistence helpers.

pub mod build_info;
pub mod persistence;

pub use build_info::*;
