//! Collaborators
//!
//! The checkout page does not own the cart, the router, the toast region or the link handler.
//! It talks to them through these traits.

use std::fmt;

use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::cart::Cart;

/// An absolute in-app path, e.g. `/` or `/products`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route(String);

impl Route {
    /// Create a route from a path.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The route path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tone of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Something went as planned.
    Success,

    /// Something needs the buyer's attention.
    Error,
}

/// A transient message for the buyer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Tone
    pub kind: NotificationKind,

    /// Headline
    pub title: String,

    /// Body text
    pub description: String,
}

/// The link handler refused or failed to open the URL.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum OpenLinkError {
    /// No new browsing context was created, e.g. a popup blocker intervened.
    #[error("the link was blocked")]
    Blocked,

    /// No link handler exists in this environment.
    #[error("no link handler available: {0}")]
    Unavailable(String),
}

/// Owner of the cart state.
#[automock]
pub trait CartStore {
    /// The current cart contents.
    fn snapshot(&self) -> Cart;

    /// Remove every item.
    fn clear(&mut self);
}

/// Router.
#[automock]
pub trait Navigator {
    /// Go back one step in history.
    fn back(&self);

    /// Go to an absolute path.
    fn go_to(&self, route: &Route);
}

/// Toast region.
#[automock]
pub trait Notifier {
    /// Show a message. Fire-and-forget.
    fn notify(&self, notification: Notification);
}

/// External URI handler.
#[automock]
pub trait LinkOpener {
    /// Open `url` in a new browsing context.
    ///
    /// # Errors
    ///
    /// Returns an `OpenLinkError` when the handler reports that nothing was opened. `Ok` does not
    /// mean the target application received anything.
    fn open(&self, url: &Url) -> Result<(), OpenLinkError>;
}

/// A cart store holding its cart in memory.
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryCartStore {
    cart: Cart,
}

impl MemoryCartStore {
    /// Wrap a cart.
    pub fn new(cart: Cart) -> Self {
        Self { cart }
    }
}

impl CartStore for MemoryCartStore {
    fn snapshot(&self) -> Cart {
        self.cart.clone()
    }

    fn clear(&mut self) {
        self.cart.clear();
    }
}

/// A navigator keeping its history in memory.
#[derive(Debug)]
pub struct MemoryNavigator {
    history: std::cell::RefCell<Vec<Route>>,
}

impl MemoryNavigator {
    /// Start at `route`.
    pub fn new(route: Route) -> Self {
        Self {
            history: std::cell::RefCell::new(vec![route]),
        }
    }

    /// The route currently shown.
    pub fn current(&self) -> Option<Route> {
        self.history.borrow().last().cloned()
    }
}

impl Navigator for MemoryNavigator {
    fn back(&self) {
        let mut history = self.history.borrow_mut();

        if history.len() > 1 {
            history.pop();
        }
    }

    fn go_to(&self, route: &Route) {
        self.history.borrow_mut().push(route.clone());
    }
}
