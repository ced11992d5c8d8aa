use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Build the filter used by [`init_logging`]: `level` is the default
/// directive, `RUST_LOG` may refine it.
pub fn env_filter(log_level: &str) -> Result<EnvFilter> {
    Ok(EnvFilter::builder()
        .with_default_directive(log_level.parse()?)
        .from_env()?)
}

/// Install a global fmt subscriber. Meant for binaries embedding the relay;
/// libraries should leave subscriber setup to their host.
pub fn init_logging(log_level: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(env_filter(log_level)?)
        .try_init()?;
    Ok(())
}
