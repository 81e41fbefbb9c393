//! Request bodies accepted by the HTTP layer, validated with `validator`.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

pub mod access;
pub mod expenses;
pub mod inventory;
pub mod people;
pub mod production;

lazy_static! {
    /// National id / tax number: letters, digits and dashes
    static ref DOCUMENT_RE: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]{3,18}[A-Za-z0-9]$").unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"^\+?[0-9(][0-9 ()-]{5,18}[0-9]$").unwrap();
    /// Largest value a `DECIMAL(14, 3)` column holds
    pub(crate) static ref MAX_COLUMN_VALUE: Decimal = Decimal::new(99_999_999_999_999, 3);
}

pub(crate) fn validate_document(value: &str) -> Result<(), ValidationError> {
    if DOCUMENT_RE.is_match(value) {
        return Ok(());
    }
    let mut err = ValidationError::new("document");
    err.message = Some("Document must be 5-20 letters, digits or dashes".into());
    Err(err)
}

pub(crate) fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(value) {
        return Ok(());
    }
    let mut err = ValidationError::new("phone");
    err.message = Some("Invalid phone number".into());
    Err(err)
}

fn decimal_in_column_range(value: &Decimal) -> Result<(), ValidationError> {
    if *value > *MAX_COLUMN_VALUE {
        let mut err = ValidationError::new("decimal_max");
        err.message = Some(format!("Must not exceed {}", *MAX_COLUMN_VALUE).into());
        return Err(err);
    }
    Ok(())
}

pub(crate) fn validate_decimal_min_zero(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        let mut err = ValidationError::new("decimal_min_zero");
        err.message = Some("Must not be negative".into());
        return Err(err);
    }
    decimal_in_column_range(value)
}

pub(crate) fn validate_decimal_positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        let mut err = ValidationError::new("decimal_positive");
        err.message = Some("Must be greater than zero".into());
        return Err(err);
    }
    decimal_in_column_range(value)
}

/// Body of `PATCH /:id/status` for flag-carrying resources
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StatusRequest {
    pub status: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("1020304050", true)]
    #[case("CC-778899", true)]
    #[case("900.123.456", false)]
    #[case("12", false)]
    #[case("-12345", false)]
    fn documents(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(validate_document(value).is_ok(), ok);
    }

    #[rstest]
    #[case("+57 300 123 4567", true)]
    #[case("(604) 444-1234", true)]
    #[case("call me", false)]
    #[case("123", false)]
    fn phones(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(validate_phone(value).is_ok(), ok);
    }

    #[test]
    fn decimals() {
        assert!(validate_decimal_min_zero(&dec!(0)).is_ok());
        assert!(validate_decimal_min_zero(&dec!(-0.01)).is_err());
        assert!(validate_decimal_positive(&dec!(0)).is_err());
        assert!(validate_decimal_positive(&dec!(0.001)).is_ok());
    }

    #[rstest]
    #[case(dec!(99999999999.999), true)]
    #[case(dec!(100000000000), false)]
    #[case(dec!(79228162514264337593543950335), false)]
    fn decimals_fit_their_columns(#[case] value: Decimal, #[case] ok: bool) {
        assert_eq!(validate_decimal_positive(&value).is_ok(), ok);
        assert_eq!(validate_decimal_min_zero(&value).is_ok(), ok);
    }
}
