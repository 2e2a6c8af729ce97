//! Checkout Page
//!
//! [`CheckoutPage::open`] takes one snapshot of the cart and everything the page shows or sends
//! is derived from it. An empty snapshot yields [`CheckoutView::EmptyCart`], which has no form and
//! cannot submit.

use std::{fmt, sync::Arc};

use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    cart::Cart,
    collaborators::{
        CartStore, LinkOpener, Navigator, NotificationKind, Notifier, OpenLinkError, Route,
    },
    config::CheckoutConfig,
    contact::{ContactForm, Field},
    deep_link::DeepLinkError,
    pricing::{PricingError, format_price},
    summary::OrderSummary,
    validation::{FieldError, Schema, ValidationErrors},
};

/// Errors from submitting the checkout form.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// One or more fields failed validation. Nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Line or cart totals could not be calculated.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The messaging link could not be built.
    #[error(transparent)]
    Link(#[from] DeepLinkError),

    /// The link handler reported that nothing was opened. The cart was kept.
    #[error("messaging link was not opened: {0}")]
    LinkNotOpened(OpenLinkError),
}

/// A cart line as rendered in the summary pane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryLine {
    /// Product identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Image reference
    pub image: String,

    /// Number of units
    pub quantity: u32,

    /// Formatted unit price
    pub unit_price: String,

    /// Formatted unit price × quantity
    pub line_total: String,
}

/// Render model for the order summary pane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryPane {
    /// Lines, in cart order
    pub lines: Vec<SummaryLine>,

    /// Units across all lines
    pub unit_count: u64,

    /// Formatted cart total
    pub total: String,
}

impl SummaryPane {
    fn from_cart(cart: &Cart) -> Result<Self, PricingError> {
        let lines = cart
            .lines()?
            .into_iter()
            .map(|(item, line_total)| SummaryLine {
                id: item.id().to_string(),
                name: item.name().to_string(),
                image: item.image().to_string(),
                quantity: item.quantity().get(),
                unit_price: format_price(item.unit_price()),
                line_total: format_price(&line_total),
            })
            .collect();

        Ok(Self {
            lines,
            unit_count: cart.unit_count(),
            total: format_price(&cart.total()?),
        })
    }
}

/// What the checkout route shows.
#[derive(Clone, Debug)]
pub enum CheckoutView {
    /// Nothing to check out; offer a way back to the catalog.
    EmptyCart {
        /// Call-to-action target
        catalog: Route,
    },

    /// Form and summary pane.
    Ready(CheckoutPage),
}

/// Everything the submission side effect touches.
pub struct Collaborators<'a> {
    /// Cart owner; cleared after a successful hand-off
    pub cart: &'a mut dyn CartStore,

    /// Router; sent home after a successful hand-off
    pub navigator: &'a dyn Navigator,

    /// Toast region
    pub notifier: &'a dyn Notifier,

    /// External URI handler
    pub links: &'a dyn LinkOpener,
}

impl fmt::Debug for Collaborators<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// Result of a successful hand-off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submitted {
    /// The text that was sent
    pub summary: OrderSummary,

    /// The link that was opened
    pub url: Url,
}

/// The checkout page for a non-empty cart snapshot.
#[derive(Clone, Debug)]
pub struct CheckoutPage {
    config: Arc<CheckoutConfig>,
    schema: Schema,
    cart: Cart,
    pane: SummaryPane,
}

impl CheckoutPage {
    /// Snapshot the cart and decide what to show.
    ///
    /// # Errors
    ///
    /// Returns a `PricingError` if the cart totals cannot be calculated.
    pub fn open(
        config: Arc<CheckoutConfig>,
        store: &dyn CartStore,
    ) -> Result<CheckoutView, PricingError> {
        let cart = store.snapshot();

        if cart.is_empty() {
            debug!("checkout opened with an empty cart");

            return Ok(CheckoutView::EmptyCart {
                catalog: config.catalog.clone(),
            });
        }

        let pane = SummaryPane::from_cart(&cart)?;

        debug!(lines = cart.len(), total = %pane.total, "checkout opened");

        Ok(CheckoutView::Ready(Self {
            config,
            schema: Schema::contact(),
            cart,
            pane,
        }))
    }

    /// The snapshot this page was opened with.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Summary pane render model.
    pub fn pane(&self) -> &SummaryPane {
        &self.pane
    }

    /// Form schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Page configuration.
    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Re-check one field after its value changed.
    pub fn revalidate(&self, form: &ContactForm, field: Field) -> Vec<FieldError> {
        self.schema.validate_field(field, form.value(field))
    }

    /// Leave the page the way the buyer came in.
    pub fn back(&self, navigator: &dyn Navigator) {
        navigator.back();
    }

    /// Validate the form and hand the order off to the messaging link.
    ///
    /// On success the link has been opened, the buyer notified, the cart cleared and the router
    /// sent to the home route. Nothing happens unless every field validates. If the link handler
    /// reports failure the buyer is told so and the cart is kept.
    ///
    /// # Errors
    ///
    /// Returns a `CheckoutError` describing which step stopped the hand-off.
    pub fn submit(
        &self,
        form: &ContactForm,
        mut collaborators: Collaborators<'_>,
    ) -> Result<Submitted, CheckoutError> {
        let contact = self.schema.validate(form)?;

        let summary = OrderSummary::compose(&self.config.store_name, &contact, &self.cart)?;
        let url = self.config.messaging.url_for(summary.as_str())?;

        if let Err(error) = collaborators.links.open(&url) {
            warn!(%error, "messaging link not opened; cart kept");

            collaborators
                .notifier
                .notify(self.config.link_blocked.to_notification(NotificationKind::Error));

            return Err(CheckoutError::LinkNotOpened(error));
        }

        info!(
            lines = self.cart.len(),
            total = %self.pane.total,
            recipient = self.config.messaging.recipient(),
            "order handed off"
        );

        collaborators
            .notifier
            .notify(self.config.order_sent.to_notification(NotificationKind::Success));
        collaborators.cart.clear();
        collaborators.navigator.go_to(&self.config.home);

        Ok(Submitted { summary, url })
    }
}
