//! Tracing initialization.
//!
//! Logs go to stderr through a `tracing-subscriber` fmt layer so that command output on
//! stdout stays machine-readable. The filter comes from `RUST_LOG` when set, otherwise
//! from the configured `log_level`.
//!
//! ```bash
//! RUST_LOG=hubctl=debug hubctl projects create "Acme" --module ERP
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub fn init_telemetry(default_level: &str) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()?;

    tracing::debug!(default_level, "Telemetry initialized");

    Ok(())
}
