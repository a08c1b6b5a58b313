//! Traits for source and sink abstraction

use crate::types::*;

/// Source of broker transactions
///
/// Implementations decode a broker export (file, buffer, fixture) into
/// typed transactions. Rows are returned in the order the source stores them;
/// ordering for conversion is handled by the pipeline.
pub trait TransactionSource {
    /// Read every transaction, failing on the first malformed row
    fn read_transactions(&mut self) -> ConvertResult<Vec<Transaction>>;
}

/// Destination for ledger entries
///
/// Implementations must either persist all entries or none of them.
pub trait LedgerSink {
    /// Write the full, ordered set of entries
    fn write_entries(&mut self, entries: &[LedgerEntry]) -> ConvertResult<()>;
}

impl<T: TransactionSource + ?Sized> TransactionSource for &mut T {
    fn read_transactions(&mut self) -> ConvertResult<Vec<Transaction>> {
        (**self).read_transactions()
    }
}

impl<T: LedgerSink + ?Sized> LedgerSink for &mut T {
    fn write_entries(&mut self, entries: &[LedgerEntry]) -> ConvertResult<()> {
        (**self).write_entries(entries)
    }
}
