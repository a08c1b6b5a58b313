//! Account chart used when booking broker transactions

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

use crate::types::*;
use crate::utils::validation::{validate_account_code, validate_vat_type};

/// Role an account plays in a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountRole {
    /// The broker's cash account, primary side of every entry
    Primary,
    /// Holding of purchased securities
    Securities,
    /// Expense account for brokerage fees
    BrokerageFee,
    /// Income account for dividends
    DividendIncome,
    /// Account for withheld dividend tax
    DividendTax,
    /// Income account for interest
    InterestIncome,
}

/// Account codes and VAT type written to the destination ledger
///
/// Every field has a default matching a standard Danish Dinero setup, so a
/// JSON chart only needs to name the codes that differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountChart {
    pub primary: String,
    pub securities: String,
    pub brokerage_fee: String,
    pub dividend_income: String,
    pub dividend_tax: String,
    pub interest_income: String,
    /// VAT type applied to both sides of every entry
    pub vat_type: String,
}

impl Default for AccountChart {
    fn default() -> Self {
        Self {
            primary: "55020".to_string(),
            securities: "51515".to_string(),
            brokerage_fee: "7220".to_string(),
            dividend_income: "9020".to_string(),
            dividend_tax: "54055".to_string(),
            interest_income: "9200".to_string(),
            vat_type: "Ingen moms".to_string(),
        }
    }
}

impl AccountChart {
    /// Account code for a role
    pub fn code(&self, role: AccountRole) -> &str {
        match role {
            AccountRole::Primary => &self.primary,
            AccountRole::Securities => &self.securities,
            AccountRole::BrokerageFee => &self.brokerage_fee,
            AccountRole::DividendIncome => &self.dividend_income,
            AccountRole::DividendTax => &self.dividend_tax,
            AccountRole::InterestIncome => &self.interest_income,
        }
    }

    /// Load a chart from JSON and validate it
    pub fn from_json_reader<R: Read>(reader: R) -> ConvertResult<Self> {
        let chart: AccountChart = serde_json::from_reader(reader)
            .map_err(|e| ConvertError::Config(format!("invalid account chart: {}", e)))?;
        chart.validate()?;
        Ok(chart)
    }

    /// Load a chart from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConvertResult<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }

    /// Check every account code and the VAT type
    pub fn validate(&self) -> ConvertResult<()> {
        for role in [
            AccountRole::Primary,
            AccountRole::Securities,
            AccountRole::BrokerageFee,
            AccountRole::DividendIncome,
            AccountRole::DividendTax,
            AccountRole::InterestIncome,
        ] {
            validate_account_code(self.code(role)).map_err(|e| match e {
                ConvertError::Config(message) => {
                    ConvertError::Config(format!("{:?} account: {}", role, message))
                }
                other => other,
            })?;
        }
        validate_vat_type(&self.vat_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_chart() {
        let chart = AccountChart::default();
        assert_eq!(chart.code(AccountRole::Primary), "55020");
        assert_eq!(chart.code(AccountRole::Securities), "51515");
        assert_eq!(chart.code(AccountRole::BrokerageFee), "7220");
        assert_eq!(chart.code(AccountRole::DividendIncome), "9020");
        assert_eq!(chart.code(AccountRole::DividendTax), "54055");
        assert_eq!(chart.code(AccountRole::InterestIncome), "9200");
        assert!(chart.validate().is_ok());
    }

    #[test]
    fn test_partial_json_chart() {
        let json = r#"{ "primary": "55030", "vat_type": "Uden moms" }"#;
        let chart = AccountChart::from_json_reader(json.as_bytes()).unwrap();

        assert_eq!(chart.primary, "55030");
        assert_eq!(chart.vat_type, "Uden moms");
        assert_eq!(chart.securities, "51515");
    }

    #[test]
    fn test_invalid_json_chart() {
        let json = r#"{ "securities": "" }"#;
        let result = AccountChart::from_json_reader(json.as_bytes());
        assert!(matches!(result, Err(ConvertError::Config(_))));

        let result = AccountChart::from_json_reader("not json".as_bytes());
        assert!(matches!(result, Err(ConvertError::Config(_))));
    }
}
