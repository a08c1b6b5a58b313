//! Dinero ledger import writer
//!
//! Dinero imports semicolon separated files with Danish headers, dates as
//! `DD/MM/YYYY` and amounts with a decimal comma.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::traits::LedgerSink;
use crate::types::*;
use crate::utils::amount::format_danish_amount;

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Column headers in output order
pub const HEADERS: [&str; 9] = [
    "Bilag nr.",
    "Dato",
    "Tekst",
    "Konto",
    "Konto momstype",
    "Beløb",
    "Beløb udenlandsk valuta",
    "Modkonto",
    "Modkonto momstype",
];

#[derive(Debug, Serialize)]
struct DineroRow<'a> {
    voucher: VoucherNumber,
    date: String,
    description: &'a str,
    account: &'a str,
    account_vat_type: &'a str,
    amount: String,
    foreign_amount: String,
    counter_account: &'a str,
    counter_vat_type: &'a str,
}

impl<'a> From<&'a LedgerEntry> for DineroRow<'a> {
    fn from(entry: &'a LedgerEntry) -> Self {
        Self {
            voucher: entry.voucher,
            date: entry.date.format(DATE_FORMAT).to_string(),
            description: &entry.description,
            account: &entry.account,
            account_vat_type: &entry.account_vat_type,
            amount: format_danish_amount(&entry.amount),
            foreign_amount: entry
                .foreign_amount
                .as_ref()
                .map(format_danish_amount)
                .unwrap_or_default(),
            counter_account: &entry.counter_account,
            counter_vat_type: &entry.counter_vat_type,
        }
    }
}

/// Encode entries, header included, into a complete import file
pub fn encode_entries(entries: &[LedgerEntry]) -> ConvertResult<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(Vec::new());

    wtr.write_record(HEADERS)?;
    for entry in entries {
        wtr.serialize(DineroRow::from(entry))?;
    }

    wtr.into_inner()
        .map_err(|e| ConvertError::Io(e.into_error()))
}

/// Writer producing Dinero import files
///
/// The whole file is encoded in memory before anything reaches the
/// underlying writer.
pub struct DineroWriter<W: Write> {
    writer: W,
}

impl<W: Write> DineroWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Return the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LedgerSink for DineroWriter<W> {
    fn write_entries(&mut self, entries: &[LedgerEntry]) -> ConvertResult<()> {
        let encoded = encode_entries(entries)?;
        self.writer.write_all(&encoded)?;
        self.writer.flush()?;

        debug!(entries = entries.len(), bytes = encoded.len(), "wrote dinero import");
        Ok(())
    }
}

/// Sink writing a Dinero import file at a path
///
/// The file is only created once the entries are encoded, so a failed run
/// leaves an existing file untouched.
#[derive(Debug, Clone)]
pub struct DineroFile {
    path: PathBuf,
}

impl DineroFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl LedgerSink for DineroFile {
    fn write_entries(&mut self, entries: &[LedgerEntry]) -> ConvertResult<()> {
        let encoded = encode_entries(entries)?;
        let mut file = BufWriter::new(File::create(&self.path)?);
        file.write_all(&encoded)?;
        file.flush()?;

        debug!(path = %self.path.display(), entries = entries.len(), "wrote dinero import");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn entry(voucher: VoucherNumber, description: &str, amount: &str) -> LedgerEntry {
        LedgerEntry {
            voucher,
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            description: description.to_string(),
            account: "55020".to_string(),
            account_vat_type: "Ingen moms".to_string(),
            counter_account: "51515".to_string(),
            counter_vat_type: "Ingen moms".to_string(),
            amount: BigDecimal::from_str(amount).unwrap(),
            foreign_amount: Some(BigDecimal::from(0)),
        }
    }

    #[test]
    fn test_encode_entries() {
        let entries = vec![
            entry(17, "Purchase of X, ISIN: DK1", "-1015"),
            entry(17, "Brokerage fee", "15"),
        ];
        let output = String::from_utf8(encode_entries(&entries).unwrap()).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines[0],
            "Bilag nr.;Dato;Tekst;Konto;Konto momstype;Beløb;Beløb udenlandsk valuta;Modkonto;Modkonto momstype"
        );
        assert_eq!(
            lines[1],
            "17;05/03/2024;Purchase of X, ISIN: DK1;55020;Ingen moms;-1015,00;0,00;51515;Ingen moms"
        );
        assert_eq!(
            lines[2],
            "17;05/03/2024;Brokerage fee;55020;Ingen moms;15,00;0,00;51515;Ingen moms"
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_absent_foreign_amount_is_empty() {
        let mut without_foreign = entry(1, "Broker interest", "0.5");
        without_foreign.foreign_amount = None;
        let output = String::from_utf8(encode_entries(&[without_foreign]).unwrap()).unwrap();

        assert!(output.contains("1;05/03/2024;Broker interest;55020;Ingen moms;0,50;;51515;"));
    }

    #[test]
    fn test_empty_ledger_has_header_only() {
        let mut writer = DineroWriter::new(Vec::new());
        writer.write_entries(&[]).unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(output.lines().count(), 1);
        assert!(output.starts_with("Bilag nr.;"));
    }

    #[test]
    fn test_description_with_separator_is_quoted() {
        let output =
            String::from_utf8(encode_entries(&[entry(2, "A;B", "1")]).unwrap()).unwrap();
        assert!(output.contains(";\"A;B\";"));
    }
}
