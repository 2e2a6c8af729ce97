//! Fixtures
//!
//! YAML item lists used to seed a cart or a catalog.

use std::{fs, path::Path};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::iso::{Currency, EUR, GBP, INR, USD};
use thiserror::Error;

use crate::cart::CartError;

pub mod items;

pub use items::{ItemFixture, ItemsFixture};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Quantity of zero
    #[error("Item {0} has a quantity of zero")]
    ZeroQuantity(String),

    /// Two items share an id
    #[error("Duplicate item id: {0}")]
    DuplicateItem(String),

    /// Cart creation error
    #[error("Failed to create cart: {0}")]
    Cart(#[from] CartError),
}

/// Look up a supported currency by ISO code
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for codes other than GBP, USD, EUR and INR.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        "INR" => Ok(INR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}

/// Parse price string (e.g., "499 INR") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = parse_currency(currency_code)?;

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::from(10_i64.pow(currency.exponent)))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

/// Read an items fixture from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_items(path: impl AsRef<Path>) -> Result<ItemsFixture, FixtureError> {
    ItemsFixture::from_yaml(&fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("499INR");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_price_rejects_bad_amount() {
        let result = parse_price("lots INR");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_accepts_supported_currencies() -> Result<(), FixtureError> {
        let (inr_minor, inr) = parse_price("1249 INR")?;
        let (usd_minor, usd) = parse_price("1.00 USD")?;
        let (eur_minor, eur) = parse_price("2.50 EUR")?;

        assert_eq!(inr_minor, 124_900);
        assert_eq!(inr, INR);
        assert_eq!(usd_minor, 100);
        assert_eq!(usd, USD);
        assert_eq!(eur_minor, 250);
        assert_eq!(eur, EUR);

        Ok(())
    }

    #[test]
    fn load_items_reports_missing_file() {
        let result = load_items("does/not/exist.yml");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }
}
