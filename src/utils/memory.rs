//! In-memory source and sink implementations for testing

use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// Transaction source backed by a vector
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    transactions: Vec<Transaction>,
}

impl MemorySource {
    /// Create a source returning the given transactions in order
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }
}

impl TransactionSource for MemorySource {
    fn read_transactions(&mut self) -> ConvertResult<Vec<Transaction>> {
        Ok(self.transactions.clone())
    }
}

/// Ledger sink collecting entries in memory
///
/// Clones share the same buffer, so a test can hand one clone to a pipeline
/// and inspect the entries through another.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<RwLock<Vec<LedgerEntry>>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the written entries
    pub fn entries(&self) -> Vec<LedgerEntry> {
        self.entries.read().unwrap().clone()
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }
}

impl LedgerSink for MemorySink {
    fn write_entries(&mut self, entries: &[LedgerEntry]) -> ConvertResult<()> {
        self.entries.write().unwrap().extend_from_slice(entries);
        Ok(())
    }
}
