//! Utility modules

pub mod amount;
pub mod memory;
pub mod validation;

pub use amount::*;
pub use memory::*;
pub use validation::*;
