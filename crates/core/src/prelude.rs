//! Checkout prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError},
    collaborators::{
        CartStore, LinkOpener, MemoryCartStore, MemoryNavigator, Navigator, Notification,
        NotificationKind, Notifier, OpenLinkError, Route,
    },
    config::{CheckoutConfig, ConfigError, NotificationText, PageMeta},
    contact::{ContactDetails, ContactForm, Field},
    deep_link::{DeepLinkError, MessagingLink},
    fixtures::{FixtureError, ItemsFixture, load_items, parse_price},
    items::CartItem,
    page::{
        CheckoutError, CheckoutPage, CheckoutView, Collaborators, Submitted, SummaryLine,
        SummaryPane,
    },
    pricing::{PricingError, format_price, line_total, total_price},
    summary::OrderSummary,
    validation::{FieldError, Rule, Schema, ValidationErrors},
};
