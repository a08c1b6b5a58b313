//! Core types and data structures for the conversion

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Voucher ("bilag") number shared by every entry of one economic event
pub type VoucherNumber = u32;

/// Kind of a broker transaction row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Purchase of securities
    Purchase,
    /// Dividend payout
    Dividend,
    /// Withholding tax on a dividend
    DividendTax,
    /// Interest paid on the depot cash balance
    Interest,
    /// Anything else; the raw broker code is kept for diagnostics
    Other(String),
}

impl TransactionType {
    /// Map a Nordnet `Transaktionstype` code to a transaction type
    pub fn from_nordnet_code(code: &str) -> Self {
        match code.trim() {
            "KØBT" => TransactionType::Purchase,
            "UDB." => TransactionType::Dividend,
            "UDBYTTESKAT" => TransactionType::DividendTax,
            "DEPOTRENTE" => TransactionType::Interest,
            other => TransactionType::Other(other.to_string()),
        }
    }
}

/// One event row read from the broker export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Booking date
    pub date: NaiveDate,
    /// Security name
    pub company: String,
    /// ISIN of the security
    pub isin: String,
    pub transaction_type: TransactionType,
    /// Free text supplied by the broker
    pub text: String,
    /// Total amount, signed from the depot's point of view
    pub total: BigDecimal,
    /// Fees, usually zero or negative
    pub fee: BigDecimal,
    pub count: Option<BigDecimal>,
    pub price: Option<BigDecimal>,
}

impl Transaction {
    /// Create a transaction with no text, count or price
    pub fn new(
        date: NaiveDate,
        company: String,
        isin: String,
        transaction_type: TransactionType,
        total: BigDecimal,
        fee: BigDecimal,
    ) -> Self {
        Self {
            date,
            company,
            isin,
            transaction_type,
            text: String::new(),
            total,
            fee,
            count: None,
            price: None,
        }
    }

    /// Net amount booked for this row: total plus fee
    pub fn net_amount(&self) -> BigDecimal {
        &self.total + &self.fee
    }

    /// Whether the row carries a non-zero fee
    pub fn has_fee(&self) -> bool {
        self.fee != BigDecimal::from(0)
    }
}

/// One output line in the destination ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub voucher: VoucherNumber,
    pub date: NaiveDate,
    pub description: String,
    /// Primary account code
    pub account: String,
    pub account_vat_type: String,
    /// Counter account code
    pub counter_account: String,
    pub counter_vat_type: String,
    pub amount: BigDecimal,
    /// Amount in foreign currency, zero under the current rules
    pub foreign_amount: Option<BigDecimal>,
}

/// Counters describing the outcome of one conversion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Transactions handed to the converter
    pub transactions_read: usize,
    /// Vouchers allocated
    pub vouchers_allocated: usize,
    /// Ledger entries emitted
    pub entries_emitted: usize,
    /// Dividend tax rows merged into their dividend voucher
    pub paired_dividend_taxes: usize,
    /// Rows of a type the converter does not book
    pub dropped_unrecognized: usize,
    /// Dividend tax rows without an immediately preceding dividend
    pub dropped_orphan_taxes: usize,
    /// First voucher number available to the run
    pub first_voucher: VoucherNumber,
    /// Next unused voucher number after the run
    pub next_voucher: VoucherNumber,
}

impl ConversionReport {
    /// Total number of rows that produced no entry
    pub fn dropped(&self) -> usize {
        self.dropped_unrecognized + self.dropped_orphan_taxes
    }
}

/// Errors that can occur while reading, converting or writing
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Decode error in row {row}, field {field}: {message}")]
    Decode {
        row: usize,
        field: &'static str,
        message: String,
    },
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;
