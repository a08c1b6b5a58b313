//! # Nordnet to Dinero
//!
//! Converts a Nordnet transaction export into a voucher-grouped ledger import
//! file for Dinero.
//!
//! ## Features
//!
//! - **Conversion**: purchases with fee splitting, dividends paired with
//!   their withholding tax, and broker interest, each under its own voucher
//! - **Observable drops**: unrecognized rows and orphaned tax rows are
//!   counted in a [`ConversionReport`] and logged
//! - **Formats**: UTF-16LE tab separated Nordnet exports in, semicolon
//!   separated Dinero imports out, Danish number formatting at both edges
//! - **Source/sink abstraction**: trait-based input and output
//!
//! ## Quick Start
//!
//! ```rust
//! use nordnet_dinero::{Converter, Transaction, TransactionType};
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//!
//! let transactions = vec![Transaction::new(
//!     NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
//!     "X".to_string(),
//!     "DK1".to_string(),
//!     TransactionType::Purchase,
//!     BigDecimal::from(-1000),
//!     BigDecimal::from(-15),
//! )];
//!
//! let conversion = Converter::new(&transactions, 17).unwrap().convert();
//! assert_eq!(conversion.entries.len(), 2);
//! assert_eq!(conversion.next_voucher(), 18);
//! ```

pub mod formats;
pub mod ledger;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use formats::{DineroFile, DineroWriter, NordnetReader};
pub use ledger::*;
pub use traits::*;
pub use types::*;
