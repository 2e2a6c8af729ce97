//! Messaging Deep Links
//!
//! Links of the shape `https://<service>/<recipient>?text=<encoded text>`. The text is encoded as
//! a URI component: everything but ASCII alphanumerics and `-_.!~*()` is percent-encoded, so
//! spaces become `%20` and newlines `%0A`.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use thiserror::Error;
use url::Url;

const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'(')
    .remove(b')');

/// Errors building a messaging link.
#[derive(Debug, Error, PartialEq)]
pub enum DeepLinkError {
    /// The service base URL did not parse.
    #[error("invalid messaging base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// The service base URL is not `https`.
    #[error("messaging base URL must use https, got {0}")]
    InsecureScheme(String),

    /// The recipient is empty or not made of digits.
    #[error("messaging recipient must be a non-empty digit string, got {0:?}")]
    InvalidRecipient(String),
}

/// Builder for deep links to a fixed recipient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessagingLink {
    base: Url,
    recipient: String,
}

impl MessagingLink {
    /// Create a link builder for `recipient` on the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns a `DeepLinkError` if the base URL is not an absolute `https` URL or the recipient
    /// is not a digit string.
    pub fn new(base_url: &str, recipient: &str) -> Result<Self, DeepLinkError> {
        let mut base = Url::parse(base_url)?;

        if base.scheme() != "https" {
            return Err(DeepLinkError::InsecureScheme(base.scheme().to_string()));
        }

        if recipient.is_empty() || !recipient.chars().all(|c| c.is_ascii_digit()) {
            return Err(DeepLinkError::InvalidRecipient(recipient.to_string()));
        }

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        base.set_query(None);
        base.set_fragment(None);

        Ok(Self {
            base,
            recipient: recipient.to_string(),
        })
    }

    /// The recipient identifier.
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Build the link carrying `text`.
    ///
    /// # Errors
    ///
    /// Returns a `DeepLinkError` if the recipient cannot be joined onto the base URL.
    pub fn url_for(&self, text: &str) -> Result<Url, DeepLinkError> {
        let mut url = self.base.join(&self.recipient)?;

        let query = format!("text={}", utf8_percent_encode(text, URI_COMPONENT));
        url.set_query(Some(&query));

        Ok(url)
    }
}
