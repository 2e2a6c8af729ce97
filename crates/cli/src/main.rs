//! Checkout CLI
//!
//! Runs the checkout page against YAML files: the cart is snapshotted, the contact form
//! validated, and the messaging link for the order written to stdout.

use std::{
    io::{self, Write},
    process::ExitCode,
};

use tracing::{error, info, warn};

use crate::{
    config::CliConfig,
    run::{Outcome, run},
};

mod config;
mod observability;
mod run;
mod terminal;

/// Checkout CLI entry point
fn main() -> ExitCode {
    // Load configuration from .env and CLI arguments
    let config = CliConfig::load().unwrap_or_else(|e| e.exit());

    if let Err(e) = observability::init(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("Logging error: {e}");
        }

        return ExitCode::FAILURE;
    }

    match run(&config.inputs, io::stdout()) {
        Ok(Outcome::Sent { submitted, landed }) => {
            if config.show_summary
                && let Err(error) = writeln!(io::stdout(), "\n{}", submitted.summary)
            {
                warn!(%error, "failed to print order summary");
            }

            info!(?landed, "order handed off");

            ExitCode::SUCCESS
        }
        Ok(Outcome::EmptyCart { catalog }) => {
            warn!(%catalog, "your cart is empty, add some products first");

            ExitCode::FAILURE
        }
        Ok(Outcome::Rejected(errors)) => {
            for field_error in errors.iter() {
                error!(field = %field_error.field, "{}", field_error.message);
            }

            ExitCode::FAILURE
        }
        Err(e) => {
            error!("checkout failed: {e}");

            ExitCode::FAILURE
        }
    }
}
