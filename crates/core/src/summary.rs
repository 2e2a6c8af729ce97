//! Order Summary
//!
//! The plain-text message handed to the messaging service. Uses the `*bold*` markup most chat
//! clients understand.

use std::fmt;

use crate::{
    cart::Cart,
    contact::ContactDetails,
    pricing::{PricingError, format_price},
};

/// Composed order summary text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderSummary {
    text: String,
}

impl OrderSummary {
    /// Compose the summary for a validated buyer and a cart snapshot.
    ///
    /// Items appear once each, in cart order. The notes block is only present when the buyer left
    /// a message.
    ///
    /// # Errors
    ///
    /// Returns a `PricingError` if a line or the cart total cannot be calculated.
    pub fn compose(
        store_name: &str,
        contact: &ContactDetails,
        cart: &Cart,
    ) -> Result<Self, PricingError> {
        let mut lines = vec![
            format!("*New Order from {store_name}*"),
            String::new(),
            "*Customer Details*".to_string(),
            format!("Name: {}", contact.name()),
            format!("Email: {}", contact.email()),
            format!("Phone: {}", contact.phone()),
            format!("Address: {}", contact.address()),
            format!("City: {}", contact.city()),
            format!("Pincode: {}", contact.pincode()),
            String::new(),
            "*Order Items*".to_string(),
        ];

        for (position, (item, line_total)) in cart.lines()?.into_iter().enumerate() {
            lines.push(format!(
                "{}. {} x {} - {}",
                position + 1,
                item.name(),
                item.quantity(),
                format_price(&line_total)
            ));
        }

        lines.push(String::new());
        lines.push(format!("*Total: {}*", format_price(&cart.total()?)));

        if let Some(message) = contact.message() {
            lines.push(String::new());
            lines.push("*Additional Notes*".to_string());
            lines.push(message.to_string());
        }

        Ok(Self {
            text: lines.join("\n"),
        })
    }

    /// The summary text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consume the summary, returning the text.
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for OrderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
