//! Ledger module containing the account chart, entry construction and conversion

pub mod account;
pub mod converter;
pub mod entry;
pub mod pipeline;

pub use account::*;
pub use converter::*;
pub use entry::*;
pub use pipeline::*;
