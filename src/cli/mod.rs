//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Resolve configuration (file, then flags)
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Network work happens in [`crate::loader`]; the
//! handlers only build the transport and page it runs against.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use crate::core::config::Config;
use crate::logging;
use crate::ui::output::Verbosity;
use anyhow::{Context as _, Result};

/// Settings shared by every command handler.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective configuration
    pub config: Config,
    /// Output verbosity
    pub verbosity: Verbosity,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    logging::init(verbosity);

    let config = Config::load(cli.config.as_deref())
        .context("Failed to load config")?
        .with_overrides(cli.server.clone(), cli.region.clone())
        .context("Invalid command-line option")?;

    if let Some(path) = config.loaded_from() {
        tracing::debug!(path = %path.display(), "config loaded");
    }

    let ctx = Context { config, verbosity };

    commands::dispatch(cli.command, &ctx).await
}
