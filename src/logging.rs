use tracing_subscriber::EnvFilter;

use crate::error::{NeoError, Result};

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Installs the global fmt subscriber, writing to stderr so exported data on
/// stdout stays clean.
pub fn init() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| NeoError::Logging(err.to_string()))
}
