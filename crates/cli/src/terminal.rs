//! Terminal collaborators
//!
//! The "link handler" of a terminal is the person reading it: the link is written out and
//! counts as opened once the write succeeds.

use std::{cell::RefCell, io::Write};

use checkout::prelude::{LinkOpener, Notification, NotificationKind, Notifier, OpenLinkError};
use tracing::{info, warn};
use url::Url;

/// Reports notifications through `tracing`.
#[derive(Debug, Default)]
pub(crate) struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        let Notification {
            kind,
            title,
            description,
        } = notification;

        match kind {
            NotificationKind::Success => info!(%title, "{description}"),
            NotificationKind::Error => warn!(%title, "{description}"),
        }
    }
}

/// Writes each link to a sink, one per line.
#[derive(Debug)]
pub(crate) struct WriteLinkOpener<W> {
    out: RefCell<W>,
}

impl<W: Write> WriteLinkOpener<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> LinkOpener for WriteLinkOpener<W> {
    fn open(&self, url: &Url) -> Result<(), OpenLinkError> {
        let mut out = self.out.borrow_mut();

        writeln!(out, "{url}")
            .and_then(|()| out.flush())
            .map_err(|error| OpenLinkError::Unavailable(error.to_string()))
    }
}
