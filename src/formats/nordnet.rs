//! Nordnet transaction export reader
//!
//! Nordnet exports are tab separated, UTF-16LE encoded (usually with a BOM)
//! and list the newest transaction first. Columns are matched by their Danish
//! header names; unknown columns are ignored.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::UTF_16LE;
use encoding_rs_io::DecodeReaderBytesBuilder;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

use crate::traits::TransactionSource;
use crate::types::*;
use crate::utils::amount::{parse_danish_amount, parse_optional_danish_amount};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize)]
struct NordnetRow {
    #[serde(rename = "Bogføringsdag")]
    date: String,
    #[serde(rename = "Værdipapirer", default)]
    company: String,
    #[serde(rename = "ISIN", default)]
    isin: String,
    #[serde(rename = "Transaktionstype")]
    transaction_type: String,
    #[serde(rename = "Transaktionstekst", default)]
    text: String,
    #[serde(rename = "Antal", default)]
    count: String,
    #[serde(rename = "Kurs", default)]
    price: String,
    #[serde(rename = "Samlede afgifter", default)]
    fee: String,
    #[serde(rename = "Beløb")]
    total: String,
}

impl NordnetRow {
    fn into_transaction(self, row: usize) -> ConvertResult<Transaction> {
        let decode_error = |field: &'static str, message: String| ConvertError::Decode {
            row,
            field,
            message,
        };

        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
            .map_err(|e| decode_error("Bogføringsdag", format!("{:?}: {}", self.date, e)))?;
        let total = parse_danish_amount(&self.total)
            .map_err(|e| decode_error("Beløb", format!("{:?}: {}", self.total, e)))?;
        let fee = parse_optional_danish_amount(&self.fee)
            .map_err(|e| decode_error("Samlede afgifter", format!("{:?}: {}", self.fee, e)))?
            .unwrap_or_else(|| BigDecimal::from(0));
        let count = parse_optional_danish_amount(&self.count)
            .map_err(|e| decode_error("Antal", format!("{:?}: {}", self.count, e)))?;
        let price = parse_optional_danish_amount(&self.price)
            .map_err(|e| decode_error("Kurs", format!("{:?}: {}", self.price, e)))?;

        Ok(Transaction {
            date,
            company: self.company,
            isin: self.isin,
            transaction_type: TransactionType::from_nordnet_code(&self.transaction_type),
            text: self.text,
            total,
            fee,
            count,
            price,
        })
    }
}

/// Reader for Nordnet transaction exports
pub struct NordnetReader<R: Read> {
    reader: R,
}

impl<R: Read> NordnetReader<R> {
    /// Wrap a reader yielding the raw UTF-16LE bytes of an export
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl NordnetReader<BufReader<File>> {
    /// Open an export file
    pub fn open<P: AsRef<Path>>(path: P) -> ConvertResult<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> TransactionSource for NordnetReader<R> {
    /// Rows are returned in file order, newest first for a Nordnet export
    fn read_transactions(&mut self) -> ConvertResult<Vec<Transaction>> {
        // A BOM, when present, overrides the default and is stripped
        let transcoded = DecodeReaderBytesBuilder::new()
            .encoding(Some(UTF_16LE))
            .build(&mut self.reader);

        let mut rdr = ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .trim(Trim::All)
            .from_reader(transcoded);

        let headers = rdr.headers()?.clone();
        let mut record = StringRecord::new();
        let mut transactions = Vec::new();

        while rdr.read_record(&mut record)? {
            if record.iter().all(|field| field.is_empty()) {
                continue;
            }
            let row = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(transactions.len() + 2);
            let raw: NordnetRow = record.deserialize(Some(&headers))?;
            transactions.push(raw.into_transaction(row)?);
        }

        debug!(rows = transactions.len(), "read nordnet export");
        Ok(transactions)
    }
}
