//! Danish number formatting at the input and output boundaries
//!
//! Nordnet writes `1.234,50`: `.` groups thousands and `,` separates
//! decimals. Dinero expects `1234,50` with exactly two decimals.

use bigdecimal::{BigDecimal, ParseBigDecimalError, RoundingMode};
use std::str::FromStr;

/// Parse a Danish formatted amount such as `-1.234,50`
pub fn parse_danish_amount(value: &str) -> Result<BigDecimal, ParseBigDecimalError> {
    let normalized = value.trim().replace('.', "").replace(',', ".");
    BigDecimal::from_str(&normalized)
}

/// Parse a Danish formatted amount, treating a blank field as absent
pub fn parse_optional_danish_amount(
    value: &str,
) -> Result<Option<BigDecimal>, ParseBigDecimalError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_danish_amount(value).map(Some)
}

/// Render an amount with two decimals and a decimal comma
///
/// Rounds half to even. Anything that rounds to zero renders as `0,00`,
/// without a sign.
pub fn format_danish_amount(amount: &BigDecimal) -> String {
    let rounded = amount.with_scale_round(2, RoundingMode::HalfEven);
    let (cents, _) = rounded.abs().as_bigint_and_exponent();
    let digits = format!("{:0>3}", cents.to_string());
    let (units, decimals) = digits.split_at(digits.len() - 2);

    let sign = if rounded < BigDecimal::from(0) { "-" } else { "" };
    format!("{}{},{}", sign, units, decimals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_danish_amount() {
        assert_eq!(
            parse_danish_amount("1.234,50").unwrap(),
            BigDecimal::from_str("1234.50").unwrap()
        );
        assert_eq!(
            parse_danish_amount(" -15,00 ").unwrap(),
            BigDecimal::from_str("-15").unwrap()
        );
        assert_eq!(
            parse_danish_amount("1.000.000").unwrap(),
            BigDecimal::from(1_000_000)
        );
        assert!(parse_danish_amount("abc").is_err());
        assert!(parse_danish_amount("").is_err());
    }

    #[test]
    fn test_parse_optional_danish_amount() {
        assert_eq!(parse_optional_danish_amount("  ").unwrap(), None);
        assert_eq!(
            parse_optional_danish_amount("12,5").unwrap(),
            Some(BigDecimal::from_str("12.5").unwrap())
        );
    }

    #[test]
    fn test_format_danish_amount() {
        let amount = |s: &str| BigDecimal::from_str(s).unwrap();

        assert_eq!(format_danish_amount(&amount("-1015")), "-1015,00");
        assert_eq!(format_danish_amount(&amount("15.5")), "15,50");
        assert_eq!(format_danish_amount(&amount("0")), "0,00");
        assert_eq!(format_danish_amount(&amount("1234567.891")), "1234567,89");
        assert_eq!(format_danish_amount(&amount("-0.5")), "-0,50");
        assert_eq!(format_danish_amount(&amount("0.07")), "0,07");
    }

    #[test]
    fn test_format_sub_cent_amounts() {
        let amount = |s: &str| BigDecimal::from_str(s).unwrap();

        assert_eq!(format_danish_amount(&amount("0.001")), "0,00");
        assert_eq!(format_danish_amount(&amount("-0.004")), "0,00");
        assert_eq!(format_danish_amount(&amount("0.005")), "0,00");
        assert_eq!(format_danish_amount(&amount("0.015")), "0,02");
        assert_eq!(format_danish_amount(&amount("-0.006")), "-0,01");
    }
}
