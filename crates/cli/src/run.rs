//! One checkout run from files on disk.

use std::{fs, io::Write, path::Path, sync::Arc};

use checkout::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::{
    config::InputConfig,
    terminal::{LogNotifier, WriteLinkOpener},
};

/// Route the run starts from, so "back" has somewhere to go.
const CHECKOUT_ROUTE: &str = "/checkout";

/// Errors that stop a run.
#[derive(Debug, Error)]
pub(crate) enum RunError {
    /// Checkout configuration could not be loaded
    #[error("invalid checkout configuration: {0}")]
    Config(#[from] ConfigError),

    /// Cart file could not be loaded
    #[error("invalid cart: {0}")]
    Cart(#[from] FixtureError),

    /// Contact file could not be read
    #[error("failed to read contact file: {0}")]
    ContactIo(#[from] std::io::Error),

    /// Contact file is not valid YAML
    #[error("failed to parse contact file: {0}")]
    ContactYaml(#[from] serde_norway::Error),

    /// Cart totals could not be computed
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Hand-off failed after validation
    #[error(transparent)]
    Checkout(CheckoutError),
}

/// How a run ended.
#[derive(Debug)]
pub(crate) enum Outcome {
    /// The cart was empty; nothing to submit.
    EmptyCart {
        /// Where the buyer should go instead
        catalog: Route,
    },

    /// The form was rejected.
    Rejected(ValidationErrors),

    /// The order was handed off.
    Sent {
        /// What was sent
        submitted: Submitted,

        /// Where the navigator ended up
        landed: Option<Route>,
    },
}

/// Read a contact form from YAML.
pub(crate) fn load_contact(path: &Path) -> Result<ContactForm, RunError> {
    Ok(serde_norway::from_str(&fs::read_to_string(path)?)?)
}

/// Load the inputs and submit the checkout form, writing the link to `out`.
pub(crate) fn run<W: Write>(inputs: &InputConfig, out: W) -> Result<Outcome, RunError> {
    let config = Arc::new(CheckoutConfig::from_path(&inputs.config)?);
    let cart = load_items(&inputs.cart)?.into_cart(config.currency)?;
    let form = load_contact(&inputs.contact)?;

    debug!(
        config = %inputs.config.display(),
        items = cart.len(),
        "inputs loaded"
    );

    let mut store = MemoryCartStore::new(cart);

    let page = match CheckoutPage::open(Arc::clone(&config), &store)? {
        CheckoutView::EmptyCart { catalog } => return Ok(Outcome::EmptyCart { catalog }),
        CheckoutView::Ready(page) => page,
    };

    let navigator = MemoryNavigator::new(Route::new(CHECKOUT_ROUTE));
    let links = WriteLinkOpener::new(out);

    let result = page.submit(
        &form,
        Collaborators {
            cart: &mut store,
            navigator: &navigator,
            notifier: &LogNotifier,
            links: &links,
        },
    );

    match result {
        Ok(submitted) => Ok(Outcome::Sent {
            submitted,
            landed: navigator.current(),
        }),
        Err(CheckoutError::Validation(errors)) => Ok(Outcome::Rejected(errors)),
        Err(error) => Err(RunError::Checkout(error)),
    }
}
