//! Item Fixtures

use std::{collections::HashSet, num::NonZeroU32};

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::{
    cart::Cart,
    fixtures::{FixtureError, parse_price},
    items::CartItem,
};

/// Wrapper for items in YAML
#[derive(Debug, Deserialize)]
pub struct ItemsFixture {
    /// Items, in order
    pub items: Vec<ItemFixture>,
}

/// Item Fixture
#[derive(Debug, Deserialize)]
pub struct ItemFixture {
    /// Product identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Unit price (e.g., "499 INR")
    pub price: String,

    /// Number of units
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Image reference
    #[serde(default)]
    pub image: String,
}

fn default_quantity() -> u32 {
    1
}

impl TryFrom<ItemFixture> for CartItem {
    type Error = FixtureError;

    fn try_from(fixture: ItemFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;
        let quantity = NonZeroU32::new(fixture.quantity)
            .ok_or_else(|| FixtureError::ZeroQuantity(fixture.id.clone()))?;

        Ok(CartItem::new(
            fixture.id,
            fixture.name,
            Money::from_minor(minor_units, currency),
            quantity,
            fixture.image,
        ))
    }
}

impl ItemsFixture {
    /// Parse an items fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Convert every fixture into a cart item, keeping order.
    ///
    /// # Errors
    ///
    /// Returns an error if a price or quantity is invalid or two items share an id.
    pub fn into_items(self) -> Result<Vec<CartItem>, FixtureError> {
        let mut seen = HashSet::new();

        self.items
            .into_iter()
            .map(|fixture| {
                if !seen.insert(fixture.id.clone()) {
                    return Err(FixtureError::DuplicateItem(fixture.id));
                }

                CartItem::try_from(fixture)
            })
            .collect()
    }

    /// Build a cart in `currency` from the fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if any item is invalid or priced in another currency.
    pub fn into_cart(self, currency: &'static Currency) -> Result<Cart, FixtureError> {
        Ok(Cart::with_items(self.into_items()?, currency)?)
    }
}
