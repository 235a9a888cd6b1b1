//! Session driver and the boundaries it talks through.

pub mod decisions;
pub mod driver;
pub mod render;

pub use decisions::*;
pub use driver::*;
pub use render::*;
