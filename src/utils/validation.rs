//! Validation utilities

use crate::types::*;

/// Validate that an account code is a short run of ASCII digits
pub fn validate_account_code(code: &str) -> ConvertResult<()> {
    if code.trim().is_empty() {
        return Err(ConvertError::Config(
            "Account code cannot be empty".to_string(),
        ));
    }

    if code.len() > 10 {
        return Err(ConvertError::Config(
            "Account code cannot exceed 10 characters".to_string(),
        ));
    }

    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConvertError::Config(format!(
            "Account code '{}' can only contain digits",
            code
        )));
    }

    Ok(())
}

/// Validate that a VAT type is present
pub fn validate_vat_type(vat_type: &str) -> ConvertResult<()> {
    if vat_type.trim().is_empty() {
        return Err(ConvertError::Config(
            "VAT type cannot be empty".to_string(),
        ));
    }

    // Written unquoted into a semicolon separated file by some importers
    if vat_type.contains(';') {
        return Err(ConvertError::Config(
            "VAT type cannot contain ';'".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_code() {
        assert!(validate_account_code("55020").is_ok());
        assert!(validate_account_code("").is_err());
        assert!(validate_account_code("  ").is_err());
        assert!(validate_account_code("55-020").is_err());
        assert!(validate_account_code("12345678901").is_err());
    }

    #[test]
    fn test_vat_type() {
        assert!(validate_vat_type("Ingen moms").is_ok());
        assert!(validate_vat_type("").is_err());
        assert!(validate_vat_type("a;b").is_err());
    }
}
