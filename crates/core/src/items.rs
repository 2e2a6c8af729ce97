//! Items

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};

/// A line in the cart: one product at a unit price and a quantity.
#[derive(Clone, Debug, PartialEq)]
pub struct CartItem {
    id: String,
    name: String,
    unit_price: Money<'static, Currency>,
    quantity: NonZeroU32,
    image: String,
}

impl CartItem {
    /// Creates a new cart item
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money<'static, Currency>,
        quantity: NonZeroU32,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            quantity,
            image: image.into(),
        }
    }

    /// Returns the product identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the price of a single unit
    pub fn unit_price(&self) -> &Money<'static, Currency> {
        &self.unit_price
    }

    /// Returns the quantity
    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    /// Returns the image reference
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Returns a copy of this item with the quantity increased by `by`, saturating at `u32::MAX`.
    #[must_use]
    pub fn with_added_quantity(&self, by: NonZeroU32) -> Self {
        Self {
            quantity: self.quantity.saturating_add(by.get()),
            ..self.clone()
        }
    }
}
