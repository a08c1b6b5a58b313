//! Ledger entry construction

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::ledger::account::{AccountChart, AccountRole};
use crate::types::*;

/// Builder for ledger entries booked against the chart's primary account
#[derive(Debug)]
pub struct EntryBuilder<'a> {
    chart: &'a AccountChart,
    voucher: VoucherNumber,
    date: NaiveDate,
    description: String,
    counter: AccountRole,
    amount: BigDecimal,
}

impl<'a> EntryBuilder<'a> {
    /// Start an entry under a voucher
    pub fn new(chart: &'a AccountChart, voucher: VoucherNumber, date: NaiveDate) -> Self {
        Self {
            chart,
            voucher,
            date,
            description: String::new(),
            counter: AccountRole::Primary,
            amount: BigDecimal::from(0),
        }
    }

    /// Set the entry text
    pub fn description(mut self, description: String) -> Self {
        self.description = description;
        self
    }

    /// Set the counter account by role
    pub fn counter(mut self, role: AccountRole) -> Self {
        self.counter = role;
        self
    }

    /// Set the amount
    pub fn amount(mut self, amount: BigDecimal) -> Self {
        self.amount = amount;
        self
    }

    /// Build the entry
    pub fn build(self) -> LedgerEntry {
        LedgerEntry {
            voucher: self.voucher,
            date: self.date,
            description: self.description,
            account: self.chart.code(AccountRole::Primary).to_string(),
            account_vat_type: self.chart.vat_type.clone(),
            counter_account: self.chart.code(self.counter).to_string(),
            counter_vat_type: self.chart.vat_type.clone(),
            amount: self.amount,
            foreign_amount: Some(BigDecimal::from(0)),
        }
    }
}

/// Entry texts written to the ledger
pub mod descriptions {
    use crate::types::Transaction;

    pub fn purchase(transaction: &Transaction) -> String {
        format!(
            "Purchase of {}, ISIN: {}",
            transaction.company, transaction.isin
        )
    }

    pub fn brokerage_fee() -> String {
        "Brokerage fee".to_string()
    }

    pub fn dividend(transaction: &Transaction) -> String {
        format!(
            "Dividend - {}, ISIN: {}",
            transaction.company, transaction.isin
        )
    }

    pub fn dividend_tax(transaction: &Transaction) -> String {
        format!(
            "Dividend tax - {}, ISIN: {}",
            transaction.company, transaction.isin
        )
    }

    pub fn interest() -> String {
        "Broker interest".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_builder() {
        let chart = AccountChart::default();
        let entry = EntryBuilder::new(&chart, 4, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
            .description("Broker interest".to_string())
            .counter(AccountRole::InterestIncome)
            .amount(BigDecimal::from(12))
            .build();

        assert_eq!(entry.voucher, 4);
        assert_eq!(entry.account, "55020");
        assert_eq!(entry.counter_account, "9200");
        assert_eq!(entry.account_vat_type, "Ingen moms");
        assert_eq!(entry.counter_vat_type, "Ingen moms");
        assert_eq!(entry.amount, BigDecimal::from(12));
        assert_eq!(entry.foreign_amount, Some(BigDecimal::from(0)));
    }
}
