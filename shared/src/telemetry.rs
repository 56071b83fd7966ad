use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber. `RUST_LOG` overrides the default filter,
/// which logs everything at `info` and the calling crate at `debug`.
pub fn init(crate_name: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("info,{crate_name}=debug")));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .context("Failed to install tracing subscriber")
}

/// Initialise tracing for the calling crate.
#[macro_export]
macro_rules! init_tracing {
    () => {
        $crate::telemetry::init(env!("CARGO_CRATE_NAME"))
    };
}
