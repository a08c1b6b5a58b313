//! Broker export decoding and ledger import encoding

pub mod dinero;
pub mod nordnet;

pub use dinero::{DineroFile, DineroWriter};
pub use nordnet::NordnetReader;
