//! Pricing

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::items::CartItem;

/// Errors that can occur while calculating line or cart totals.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// No items were provided, so currency could not be determined.
    #[error("no items provided; cannot determine currency")]
    NoItems,

    /// Unit price multiplied by quantity does not fit in minor units.
    #[error("line total for item {0} overflows")]
    Overflow(String),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// How digits of the integer part are grouped when formatting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigitGrouping {
    /// Groups of three: `1,234,567`.
    Thousands,

    /// Last three digits, then groups of two: `12,34,567`.
    Indian,
}

impl DigitGrouping {
    /// Grouping convention used for amounts in the given currency.
    pub fn for_currency(currency: &Currency) -> Self {
        match currency.iso_alpha_code {
            "INR" => DigitGrouping::Indian,
            _ => DigitGrouping::Thousands,
        }
    }

    /// Whether a separator goes before the digit at `index`, counting from the least
    /// significant digit.
    fn separator_before(self, index: usize) -> bool {
        match self {
            DigitGrouping::Thousands => index > 0 && index % 3 == 0,
            DigitGrouping::Indian => index == 3 || (index > 3 && (index - 3) % 2 == 0),
        }
    }
}

/// Calculates unit price × quantity for a cart line
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the product does not fit in minor units.
pub fn line_total(item: &CartItem) -> Result<Money<'static, Currency>, PricingError> {
    let unit = item.unit_price();

    let minor = unit
        .to_minor_units()
        .checked_mul(i64::from(item.quantity().get()))
        .ok_or_else(|| PricingError::Overflow(item.id().to_string()))?;

    Ok(Money::from_minor(minor, unit.currency()))
}

/// Calculates the total price of a list of cart items
///
/// # Errors
///
/// - [`PricingError::NoItems`]: No items were provided, so currency could not be determined.
/// - [`PricingError::Overflow`]: A line total overflowed.
/// - [`PricingError::Money`]: Wrapped money arithmetic or currency mismatch error.
pub fn total_price(items: &[CartItem]) -> Result<Money<'static, Currency>, PricingError> {
    let first = items.first().ok_or(PricingError::NoItems)?;

    items.iter().try_fold(
        Money::from_minor(0, first.unit_price().currency()),
        |acc, item| Ok(acc.add(line_total(item)?)?),
    )
}

/// Format an amount as a currency string with zero decimal places, e.g. `₹1,23,456`.
///
/// Amounts are rounded half away from zero to whole major units.
pub fn format_price(money: &Money<'_, Currency>) -> String {
    let currency = money.currency();

    let major = Decimal::new(money.to_minor_units(), currency.exponent)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    let units = major.abs().to_u128().unwrap_or_default();
    let sign = if major.is_sign_negative() && units != 0 {
        "-"
    } else {
        ""
    };

    let grouped = group_digits(&units.to_string(), DigitGrouping::for_currency(currency));

    format!("{sign}{}{grouped}", currency.symbol)
}

fn group_digits(digits: &str, grouping: DigitGrouping) -> String {
    let mut reversed: Vec<char> = Vec::with_capacity(digits.len() + digits.len() / 2);

    for (index, digit) in digits.chars().rev().enumerate() {
        if grouping.separator_before(index) {
            reversed.push(',');
        }

        reversed.push(digit);
    }

    reversed.into_iter().rev().collect()
}
