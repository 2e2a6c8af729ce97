//! CLI configuration

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::config::observability::LoggingConfig;

pub(crate) mod observability;

/// Input files for one checkout run.
#[derive(Debug, Args)]
pub struct InputConfig {
    /// Checkout configuration YAML
    #[arg(
        short,
        long,
        env = "CHECKOUT_CONFIG",
        default_value = "fixtures/checkout/demo.yml"
    )]
    pub config: PathBuf,

    /// Cart items YAML
    #[arg(long, env = "CHECKOUT_CART", default_value = "fixtures/cart/demo.yml")]
    pub cart: PathBuf,

    /// Contact form YAML
    #[arg(long, env = "CHECKOUT_CONTACT", default_value = "fixtures/contact/demo.yml")]
    pub contact: PathBuf,
}

/// Checkout CLI configuration
#[derive(Debug, Parser)]
#[command(
    name = "checkout",
    about = "Check out a cart through a messaging deep link",
    long_about = None
)]
pub struct CliConfig {
    /// Input files.
    #[command(flatten)]
    pub inputs: InputConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Print the order summary before the link
    #[arg(long, env = "CHECKOUT_SHOW_SUMMARY", default_value_t = false)]
    pub show_summary: bool,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
