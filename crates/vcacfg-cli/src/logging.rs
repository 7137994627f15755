//! Tracing setup for the binary

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{CliError, Result};

/// Initialize a stderr subscriber.
///
/// Verbose runs log at `debug`. Otherwise `RUST_LOG` decides, defaulting to
/// `warn`.
pub fn init(verbose: bool) -> Result<()> {
    let filter_layer = if verbose {
        EnvFilter::try_new("debug")
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))
    }
    .map_err(|e| CliError::user(format!("Invalid log filter: {}", e)))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {}", e)))?;

    tracing::debug!("verbose logging enabled");
    Ok(())
}
