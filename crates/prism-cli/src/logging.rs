use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Log to stderr so responses on stdout stay clean. `RUST_LOG` overrides the default level.
pub fn setup_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
