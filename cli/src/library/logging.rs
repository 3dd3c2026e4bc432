use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

use crate::library::constant::DEFAULT_LOG_FILTER;

/// Console logging to stderr, `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("Failed to initialise logging: {}", err))
}
