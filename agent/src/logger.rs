use anyhow::Context;
use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initializes the `tracing` subscriber, honoring `RUST_LOG` and defaulting
/// to `info` when it is unset.
pub fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("failed to init tracing")?;

    Ok(())
}
