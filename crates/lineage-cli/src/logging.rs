//! Logging setup for the `lineage` binary.

use color_eyre::eyre::{eyre, Result};
use lineage_core::LoggingConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. `verbose` forces debug output
/// for the lineage crates. Logs go to stderr so stdout stays valid JSON.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("lineage_core=debug,lineage_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
    };

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| eyre!("Failed to init logging: {}", e))?;
    } else {
        subscriber
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| eyre!("Failed to init logging: {}", e))?;
    }

    Ok(())
}
