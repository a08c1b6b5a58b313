//! Pipeline orchestrating source, converter and sink

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ledger::account::AccountChart;
use crate::ledger::converter::Converter;
use crate::traits::*;
use crate::types::*;

/// Order in which a source delivers its transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceOrder {
    /// Newest transaction first, as Nordnet exports them
    #[default]
    NewestFirst,
    /// Oldest transaction first
    OldestFirst,
}

/// Settings for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Next unused voucher number in the destination ledger
    pub starting_voucher: VoucherNumber,
    pub source_order: SourceOrder,
    pub chart: AccountChart,
}

impl PipelineOptions {
    /// Options with the default chart and a newest-first source
    pub fn new(starting_voucher: VoucherNumber) -> Self {
        Self {
            starting_voucher,
            source_order: SourceOrder::default(),
            chart: AccountChart::default(),
        }
    }
}

/// Pipeline reading transactions, converting them and writing ledger entries
pub struct Pipeline<S: TransactionSource, K: LedgerSink> {
    source: S,
    sink: K,
    options: PipelineOptions,
}

impl<S: TransactionSource, K: LedgerSink> Pipeline<S, K> {
    /// Create a new pipeline
    pub fn new(source: S, sink: K, options: PipelineOptions) -> Self {
        Self {
            source,
            sink,
            options,
        }
    }

    /// Run the conversion end to end
    ///
    /// Nothing is written unless every row decodes.
    pub fn run(mut self) -> ConvertResult<ConversionReport> {
        self.options.chart.validate()?;

        let mut transactions = self.source.read_transactions()?;
        if self.options.source_order == SourceOrder::NewestFirst {
            transactions.reverse();
        }

        let conversion = Converter::with_chart(
            &transactions,
            self.options.starting_voucher,
            self.options.chart.clone(),
        )?
        .convert();

        self.sink.write_entries(&conversion.entries)?;

        let report = conversion.report;
        info!(
            transactions = report.transactions_read,
            vouchers = report.vouchers_allocated,
            entries = report.entries_emitted,
            paired_taxes = report.paired_dividend_taxes,
            dropped_unrecognized = report.dropped_unrecognized,
            dropped_orphan_taxes = report.dropped_orphan_taxes,
            next_voucher = report.next_voucher,
            "conversion finished"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory::{MemorySink, MemorySource};
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;

    fn transaction(day: u32, transaction_type: TransactionType, total: i32) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            "Y".to_string(),
            "DK2".to_string(),
            transaction_type,
            BigDecimal::from(total),
            BigDecimal::from(0),
        )
    }

    #[test]
    fn test_newest_first_source_is_reversed() {
        // As exported: tax row above its dividend
        let source = MemorySource::new(vec![
            transaction(2, TransactionType::DividendTax, -15),
            transaction(2, TransactionType::Dividend, 100),
        ]);
        let sink = MemorySink::new();

        let report = Pipeline::new(source, sink.clone(), PipelineOptions::new(1))
            .run()
            .unwrap();

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].amount, BigDecimal::from(100));
        assert_eq!(entries[1].amount, BigDecimal::from(-15));
        assert!(entries.iter().all(|e| e.voucher == 1));
        assert_eq!(report.next_voucher, 2);
        assert_eq!(report.paired_dividend_taxes, 1);
    }

    #[test]
    fn test_oldest_first_source_is_kept() {
        let source = MemorySource::new(vec![
            transaction(2, TransactionType::DividendTax, -15),
            transaction(2, TransactionType::Dividend, 100),
        ]);
        let sink = MemorySink::new();
        let options = PipelineOptions {
            source_order: SourceOrder::OldestFirst,
            ..PipelineOptions::new(1)
        };

        let report = Pipeline::new(source, sink.clone(), options).run().unwrap();

        assert_eq!(sink.entries().len(), 1);
        assert_eq!(report.dropped_orphan_taxes, 1);
    }

    #[test]
    fn test_exhausted_voucher_range_writes_nothing() {
        let source = MemorySource::new(vec![transaction(1, TransactionType::Interest, 1)]);
        let sink = MemorySink::new();

        let result = Pipeline::new(source, sink.clone(), PipelineOptions::new(VoucherNumber::MAX))
            .run();

        assert!(matches!(result, Err(ConvertError::Config(_))));
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn test_invalid_chart_writes_nothing() {
        let source = MemorySource::new(vec![transaction(1, TransactionType::Interest, 1)]);
        let sink = MemorySink::new();
        let options = PipelineOptions {
            chart: AccountChart {
                primary: String::new(),
                ..AccountChart::default()
            },
            ..PipelineOptions::new(1)
        };

        let result = Pipeline::new(source, sink.clone(), options).run();

        assert!(matches!(result, Err(ConvertError::Config(_))));
        assert!(sink.entries().is_empty());
    }
}
