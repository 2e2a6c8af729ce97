//! Checkout Configuration
//!
//! Loaded from YAML:
//!
//! ```yaml
//! store_name: Loom & Thread
//! currency: INR
//! messaging:
//!   base_url: https://wa.me/
//!   recipient: "919876543210"
//! routes:
//!   home: /
//!   catalog: /products
//! page:
//!   title: Checkout | Loom & Thread
//!   description: Review your order and send it to us.
//! ```

use std::{fs, path::Path};

use rusty_money::iso::Currency;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    collaborators::{Notification, NotificationKind, Route},
    deep_link::{DeepLinkError, MessagingLink},
    fixtures::{FixtureError, parse_currency},
};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unsupported currency
    #[error(transparent)]
    Currency(#[from] FixtureError),

    /// Messaging link settings are invalid
    #[error(transparent)]
    Messaging(#[from] DeepLinkError),

    /// A route is not an absolute path
    #[error("route {0:?} must start with '/'")]
    RelativeRoute(String),
}

/// Document head metadata.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PageMeta {
    /// Document title
    pub title: String,

    /// Meta description
    pub description: String,
}

/// Title and description of a toast.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NotificationText {
    /// Headline
    pub title: String,

    /// Body text
    pub description: String,
}

impl NotificationText {
    fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    /// Build a notification of the given kind.
    pub fn to_notification(&self, kind: NotificationKind) -> Notification {
        Notification {
            kind,
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}

/// Messaging service settings
#[derive(Clone, Debug, Deserialize)]
pub struct MessagingFile {
    /// Service base URL, e.g. `https://wa.me/`
    pub base_url: String,

    /// Recipient identifier appended to the base URL
    pub recipient: String,
}

/// Route settings
#[derive(Clone, Debug, Deserialize)]
pub struct RoutesFile {
    /// Where the buyer lands after ordering
    #[serde(default = "default_home")]
    pub home: Route,

    /// Target of the empty-cart call to action
    #[serde(default = "default_catalog")]
    pub catalog: Route,
}

impl Default for RoutesFile {
    fn default() -> Self {
        Self {
            home: default_home(),
            catalog: default_catalog(),
        }
    }
}

/// Notification copy
#[derive(Clone, Debug, Deserialize)]
pub struct NotificationsFile {
    /// Shown after the messaging link opened
    #[serde(default = "default_order_sent")]
    pub order_sent: NotificationText,

    /// Shown when the link could not be opened
    #[serde(default = "default_link_blocked")]
    pub link_blocked: NotificationText,
}

impl Default for NotificationsFile {
    fn default() -> Self {
        Self {
            order_sent: default_order_sent(),
            link_blocked: default_link_blocked(),
        }
    }
}

/// Wrapper for the configuration in YAML
#[derive(Clone, Debug, Deserialize)]
pub struct CheckoutConfigFile {
    /// Store name shown in the order summary
    pub store_name: String,

    /// ISO currency code
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Messaging service settings
    pub messaging: MessagingFile,

    /// Route settings
    #[serde(default)]
    pub routes: RoutesFile,

    /// Document head metadata
    pub page: PageMeta,

    /// Notification copy
    #[serde(default)]
    pub notifications: NotificationsFile,
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_home() -> Route {
    Route::new("/")
}

fn default_catalog() -> Route {
    Route::new("/products")
}

fn default_order_sent() -> NotificationText {
    NotificationText::new(
        "Order sent!",
        "Your order details have been sent. We'll contact you shortly.",
    )
}

fn default_link_blocked() -> NotificationText {
    NotificationText::new(
        "Couldn't open the messaging app",
        "Allow pop-ups for this site and try again. Your cart has been kept.",
    )
}

/// Validated checkout configuration.
#[derive(Clone, Debug)]
pub struct CheckoutConfig {
    /// Store name shown in the order summary
    pub store_name: String,

    /// Currency every price is in
    pub currency: &'static Currency,

    /// Deep link builder
    pub messaging: MessagingLink,

    /// Post-order landing route
    pub home: Route,

    /// Empty-cart call to action route
    pub catalog: Route,

    /// Document head metadata
    pub page: PageMeta,

    /// Success toast
    pub order_sent: NotificationText,

    /// Blocked-link toast
    pub link_blocked: NotificationText,
}

impl CheckoutConfig {
    /// Parse and validate configuration YAML.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the YAML is malformed, the currency is unsupported, the
    /// messaging settings are invalid or a route is relative.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let file: CheckoutConfigFile = serde_norway::from_str(yaml)?;

        Self::try_from(file)
    }

    /// Read, parse and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or [`Self::from_yaml`] fails.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }
}

impl TryFrom<CheckoutConfigFile> for CheckoutConfig {
    type Error = ConfigError;

    fn try_from(file: CheckoutConfigFile) -> Result<Self, Self::Error> {
        for route in [&file.routes.home, &file.routes.catalog] {
            if !route.as_str().starts_with('/') {
                return Err(ConfigError::RelativeRoute(route.to_string()));
            }
        }

        Ok(Self {
            currency: parse_currency(&file.currency)?,
            messaging: MessagingLink::new(&file.messaging.base_url, &file.messaging.recipient)?,
            store_name: file.store_name,
            home: file.routes.home,
            catalog: file.routes.catalog,
            page: file.page,
            order_sent: file.notifications.order_sent,
            link_blocked: file.notifications.link_blocked,
        })
    }
}
