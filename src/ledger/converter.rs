//! Single pass conversion of broker transactions into ledger entries
//!
//! The converter walks an oldest-first slice of transactions with a one-row
//! lookahead cursor. Purchases, dividends and interest each get their own
//! voucher. A dividend tax row is booked only when it directly follows its
//! dividend, in which case it shares the dividend's voucher. Every other row
//! is dropped, counted in the [`ConversionReport`] and logged.

use bigdecimal::BigDecimal;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::ledger::account::{AccountChart, AccountRole};
use crate::ledger::entry::{descriptions, EntryBuilder};
use crate::types::*;

/// One-row lookahead cursor over an immutable slice
#[derive(Debug, Clone)]
pub struct TransactionCursor<'a> {
    transactions: &'a [Transaction],
    position: usize,
}

impl<'a> TransactionCursor<'a> {
    pub fn new(transactions: &'a [Transaction]) -> Self {
        Self {
            transactions,
            position: 0,
        }
    }

    /// Return the transaction at the cursor and move past it
    pub fn advance(&mut self) -> Option<&'a Transaction> {
        let transaction = self.transactions.get(self.position)?;
        self.position += 1;
        Some(transaction)
    }

    /// Return the transaction at the cursor without moving
    pub fn peek(&self) -> Option<&'a Transaction> {
        self.transactions.get(self.position)
    }

    /// Number of transactions consumed so far
    pub fn position(&self) -> usize {
        self.position
    }
}

/// Why a transaction produced no entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// Type the converter does not book
    UnrecognizedType,
    /// Dividend tax row not directly preceded by its dividend
    OrphanDividendTax,
}

/// Dispatch decision for a transaction reached by the main loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Purchase,
    Dividend,
    Interest,
    Ignored(IgnoreReason),
}

impl Classification {
    /// Classify a transaction type as seen by the main loop
    ///
    /// A paired dividend tax row is consumed by the dividend branch and never
    /// reaches this point, so any dividend tax classified here is orphaned.
    pub fn of(transaction_type: &TransactionType) -> Self {
        match transaction_type {
            TransactionType::Purchase => Classification::Purchase,
            TransactionType::Dividend => Classification::Dividend,
            TransactionType::Interest => Classification::Interest,
            TransactionType::DividendTax => {
                Classification::Ignored(IgnoreReason::OrphanDividendTax)
            }
            TransactionType::Other(_) => Classification::Ignored(IgnoreReason::UnrecognizedType),
        }
    }

    /// Whether this classification allocates a voucher
    pub fn is_booked(&self) -> bool {
        !matches!(self, Classification::Ignored(_))
    }
}

/// Result of a finished conversion
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// Entries in emission order
    pub entries: Vec<LedgerEntry>,
    pub report: ConversionReport,
}

impl Conversion {
    /// Next unused voucher number after the run
    pub fn next_voucher(&self) -> VoucherNumber {
        self.report.next_voucher
    }

    /// Sum of entry amounts per voucher
    pub fn voucher_totals(&self) -> BTreeMap<VoucherNumber, BigDecimal> {
        let mut totals: BTreeMap<VoucherNumber, BigDecimal> = BTreeMap::new();
        for entry in &self.entries {
            *totals
                .entry(entry.voucher)
                .or_insert_with(|| BigDecimal::from(0)) += &entry.amount;
        }
        totals
    }
}

/// Number of vouchers a conversion of `transactions` allocates
///
/// Dividend tax rows never allocate, paired or not, so this is the count of
/// booked types.
pub fn vouchers_required(transactions: &[Transaction]) -> usize {
    transactions
        .iter()
        .filter(|t| Classification::of(&t.transaction_type).is_booked())
        .count()
}

/// Converter from broker transactions to ledger entries
pub struct Converter<'a> {
    cursor: TransactionCursor<'a>,
    chart: AccountChart,
    next_voucher: VoucherNumber,
    entries: Vec<LedgerEntry>,
    report: ConversionReport,
}

impl<'a> Converter<'a> {
    /// Create a converter using the default account chart
    ///
    /// `transactions` must be ordered oldest first. `starting_voucher` is the
    /// next unused voucher number in the destination ledger. Fails when the
    /// vouchers needed, and the next free one after them, do not fit in a
    /// [`VoucherNumber`].
    pub fn new(
        transactions: &'a [Transaction],
        starting_voucher: VoucherNumber,
    ) -> ConvertResult<Self> {
        Self::with_chart(transactions, starting_voucher, AccountChart::default())
    }

    /// Create a converter with a custom account chart
    pub fn with_chart(
        transactions: &'a [Transaction],
        starting_voucher: VoucherNumber,
        chart: AccountChart,
    ) -> ConvertResult<Self> {
        let required = vouchers_required(transactions);
        VoucherNumber::try_from(required)
            .ok()
            .and_then(|count| starting_voucher.checked_add(count))
            .ok_or_else(|| {
                ConvertError::Config(format!(
                    "starting voucher {} leaves no room for {} vouchers",
                    starting_voucher, required
                ))
            })?;

        Ok(Self {
            cursor: TransactionCursor::new(transactions),
            chart,
            next_voucher: starting_voucher,
            entries: Vec::with_capacity(transactions.len()),
            report: ConversionReport {
                transactions_read: transactions.len(),
                first_voucher: starting_voucher,
                next_voucher: starting_voucher,
                ..Default::default()
            },
        })
    }

    /// Next voucher number the converter would allocate
    pub fn next_voucher(&self) -> VoucherNumber {
        self.next_voucher
    }

    /// Convert every transaction
    pub fn convert(mut self) -> Conversion {
        while let Some(transaction) = self.cursor.advance() {
            match Classification::of(&transaction.transaction_type) {
                Classification::Purchase => self.convert_purchase(transaction),
                Classification::Dividend => self.convert_dividend(transaction),
                Classification::Interest => self.convert_interest(transaction),
                Classification::Ignored(reason) => self.ignore(transaction, reason),
            }
        }

        self.report.entries_emitted = self.entries.len();
        self.report.next_voucher = self.next_voucher;

        Conversion {
            entries: self.entries,
            report: self.report,
        }
    }

    fn allocate_voucher(&mut self) -> VoucherNumber {
        let voucher = self.next_voucher;
        // Range checked on construction
        self.next_voucher += 1;
        self.report.vouchers_allocated += 1;
        voucher
    }

    fn convert_purchase(&mut self, transaction: &Transaction) {
        let voucher = self.allocate_voucher();
        debug!(voucher, isin = %transaction.isin, "booking purchase");

        let purchase = EntryBuilder::new(&self.chart, voucher, transaction.date)
            .description(descriptions::purchase(transaction))
            .counter(AccountRole::Securities)
            .amount(transaction.net_amount())
            .build();
        self.entries.push(purchase);

        if transaction.has_fee() {
            let fee = EntryBuilder::new(&self.chart, voucher, transaction.date)
                .description(descriptions::brokerage_fee())
                .counter(AccountRole::BrokerageFee)
                .amount(-transaction.fee.clone())
                .build();
            self.entries.push(fee);
        }
    }

    fn convert_dividend(&mut self, transaction: &Transaction) {
        let voucher = self.allocate_voucher();
        debug!(voucher, isin = %transaction.isin, "booking dividend");

        let dividend = EntryBuilder::new(&self.chart, voucher, transaction.date)
            .description(descriptions::dividend(transaction))
            .counter(AccountRole::DividendIncome)
            .amount(transaction.net_amount())
            .build();
        self.entries.push(dividend);

        // The withholding tax row must directly follow its dividend
        let paired_tax = self
            .cursor
            .peek()
            .filter(|next| next.transaction_type == TransactionType::DividendTax);

        if let Some(tax) = paired_tax {
            self.cursor.advance();
            self.report.paired_dividend_taxes += 1;
            debug!(voucher, isin = %tax.isin, "pairing dividend tax");

            let tax_entry = EntryBuilder::new(&self.chart, voucher, tax.date)
                .description(descriptions::dividend_tax(tax))
                .counter(AccountRole::DividendTax)
                .amount(tax.net_amount())
                .build();
            self.entries.push(tax_entry);
        }
    }

    fn convert_interest(&mut self, transaction: &Transaction) {
        let voucher = self.allocate_voucher();
        debug!(voucher, "booking interest");

        let interest = EntryBuilder::new(&self.chart, voucher, transaction.date)
            .description(descriptions::interest())
            .counter(AccountRole::InterestIncome)
            .amount(transaction.net_amount())
            .build();
        self.entries.push(interest);
    }

    fn ignore(&mut self, transaction: &Transaction, reason: IgnoreReason) {
        match reason {
            IgnoreReason::UnrecognizedType => {
                self.report.dropped_unrecognized += 1;
                warn!(
                    position = self.cursor.position(),
                    date = %transaction.date,
                    transaction_type = ?transaction.transaction_type,
                    "dropping transaction of unrecognized type"
                );
            }
            IgnoreReason::OrphanDividendTax => {
                self.report.dropped_orphan_taxes += 1;
                warn!(
                    position = self.cursor.position(),
                    date = %transaction.date,
                    isin = %transaction.isin,
                    "dropping dividend tax without a preceding dividend"
                );
            }
        }
    }
}
