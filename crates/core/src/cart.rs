//! Cart

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    items::CartItem,
    pricing::{PricingError, line_total, total_price},
};

/// Errors related to cart construction.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// An item's currency differs from the cart currency (index, item currency, cart currency).
    #[error("Item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),
}

/// An ordered, single-currency snapshot of the cart.
#[derive(Clone, Debug, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
    currency: &'static Currency,
}

impl Cart {
    /// Create a new, empty cart.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Create a new cart with the given items.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if any item is priced in a different currency.
    pub fn with_items(
        items: impl Into<Vec<CartItem>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let items = items.into();

        items.iter().enumerate().try_for_each(|(i, item)| {
            let item_currency = item.unit_price().currency();
            if item_currency == currency {
                Ok(())
            } else {
                Err(CartError::CurrencyMismatch(
                    i,
                    item_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ))
            }
        })?;

        Ok(Cart { items, currency })
    }

    /// Add an item, merging its quantity into an existing line with the same id.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the item is priced in a different currency.
    pub fn add(&mut self, item: CartItem) -> Result<(), CartError> {
        let item_currency = item.unit_price().currency();

        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                self.items.len(),
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(existing) = self.items.iter_mut().find(|line| line.id() == item.id()) {
            *existing = existing.with_added_quantity(item.quantity());
        } else {
            self.items.push(item);
        }

        Ok(())
    }

    /// Calculate the total of the cart.
    ///
    /// # Errors
    ///
    /// Returns a `PricingError` if there was a money arithmetic or overflow error.
    pub fn total(&self) -> Result<Money<'static, Currency>, PricingError> {
        if self.is_empty() {
            return Ok(Money::from_minor(0, self.currency));
        }

        total_price(&self.items)
    }

    /// Items paired with their line totals, in cart order.
    ///
    /// # Errors
    ///
    /// Returns a `PricingError` if any line total overflows.
    pub fn lines(&self) -> Result<Vec<(&CartItem, Money<'static, Currency>)>, PricingError> {
        self.items
            .iter()
            .map(|item| Ok((item, line_total(item)?)))
            .collect()
    }

    /// Get the items in the cart.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Iterate over the items in the cart.
    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total number of units across all lines.
    pub fn unit_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity().get()))
            .sum()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Remove every item from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use super::*;

    fn line(id: &str, minor: i64, quantity: u32) -> TestResult<CartItem> {
        let quantity = NonZeroU32::new(quantity).ok_or("quantity must be positive")?;

        Ok(CartItem::new(
            id,
            format!("Product {id}"),
            Money::from_minor(minor, iso::INR),
            quantity,
            format!("/images/{id}.jpg"),
        ))
    }

    fn test_items() -> TestResult<[CartItem; 3]> {
        Ok([
            line("a", 10_000, 1)?,
            line("b", 20_000, 2)?,
            line("c", 30_000, 3)?,
        ])
    }

    #[test]
    fn new_with_currency() {
        let cart = Cart::new(iso::INR);

        assert_eq!(cart.currency(), iso::INR);
        assert!(cart.is_empty());
    }

    #[test]
    fn with_items_currency_mismatch_errors() -> TestResult {
        let items = [
            line("a", 100, 1)?,
            CartItem::new("b", "B", Money::from_minor(100, iso::USD), NonZeroU32::MIN, ""),
        ];

        let result = Cart::with_items(items, iso::INR);

        assert_eq!(
            result.err(),
            Some(CartError::CurrencyMismatch(
                1,
                iso::USD.iso_alpha_code,
                iso::INR.iso_alpha_code
            ))
        );

        Ok(())
    }

    #[test]
    fn with_items_all_same_currency_succeeds() -> TestResult {
        let cart = Cart::with_items(test_items()?, iso::INR)?;

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.unit_count(), 6);
        assert_eq!(cart.currency(), iso::INR);

        Ok(())
    }

    #[test]
    fn total_is_sum_of_price_times_quantity() -> TestResult {
        let cart = Cart::with_items(test_items()?, iso::INR)?;

        assert_eq!(cart.total()?, Money::from_minor(140_000, iso::INR));

        Ok(())
    }

    #[test]
    fn total_with_no_items_is_zero() -> TestResult {
        let cart = Cart::new(iso::INR);

        assert_eq!(cart.total()?, Money::from_minor(0, iso::INR));

        Ok(())
    }

    #[test]
    fn lines_keep_cart_order() -> TestResult {
        let cart = Cart::with_items(test_items()?, iso::INR)?;

        let lines = cart.lines()?;
        let ids: Vec<&str> = lines.iter().map(|(item, _)| item.id()).collect();
        let totals: Vec<i64> = lines.iter().map(|(_, total)| total.to_minor_units()).collect();

        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(totals, [10_000, 40_000, 90_000]);

        Ok(())
    }

    #[test]
    fn add_merges_same_id() -> TestResult {
        let mut cart = Cart::new(iso::INR);

        cart.add(line("a", 100, 1)?)?;
        cart.add(line("b", 200, 1)?)?;
        cart.add(line("a", 100, 2)?)?;

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items().first().map(|item| item.quantity().get()), Some(3));

        Ok(())
    }

    #[test]
    fn add_rejects_other_currency() -> TestResult {
        let mut cart = Cart::new(iso::INR);

        let result = cart.add(CartItem::new(
            "b",
            "B",
            Money::from_minor(100, iso::GBP),
            NonZeroU32::MIN,
            "",
        ));

        assert!(matches!(result, Err(CartError::CurrencyMismatch(0, "GBP", "INR"))));
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn clear_empties_cart() -> TestResult {
        let mut cart = Cart::with_items(test_items()?, iso::INR)?;

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.currency(), iso::INR);

        Ok(())
    }
}
