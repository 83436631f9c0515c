//! Tracing subscriber setup

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::ViajarteError;
use crate::config::LoggingConfig;

/// Filter from `RUST_LOG` when set, otherwise the configured level for this
/// crate and `warn` for dependencies
fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,viajarte={}", config.level)))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(config: &LoggingConfig) -> crate::Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(config));
    let result = match config.format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        _ => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
    };
    result.map_err(|e| ViajarteError::config(format!("Failed to install logging: {e}")))
}
