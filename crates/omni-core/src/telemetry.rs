//! Structured logging bootstrap.
//!
//! Production mode emits one JSON object per event for log shippers;
//! development mode prints human-readable, colourised output at a more
//! verbose default level.

use crate::{OmniError, OmniResult};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// JSON output at `info` when true, pretty output at `debug` otherwise.
    #[serde(default)]
    pub production: bool,

    /// Explicit filter directive (e.g. `"info,omni_storage=debug"`).
    #[serde(default)]
    pub level: Option<String>,

    /// Whether to include the event target in each line.
    #[serde(default = "default_with_target")]
    pub with_target: bool,
}

fn default_with_target() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            production: false,
            level: None,
            with_target: default_with_target(),
        }
    }
}

impl LoggingConfig {
    /// Returns the filter directive used when `RUST_LOG` is not set.
    #[must_use]
    pub fn effective_level(&self) -> &str {
        match &self.level {
            Some(level) => level,
            None if self.production => "info",
            None => "debug",
        }
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Fails if a global subscriber
/// has already been installed.
pub fn init_logging(config: &LoggingConfig) -> OmniResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.effective_level()))
        .map_err(|e| OmniError::Logging(format!("Invalid log filter: {}", e)))?;

    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.production {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(config.with_target)
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init()
    } else {
        registry
            .with(fmt::layer().pretty().with_ansi(true).with_target(config.with_target))
            .try_init()
    };

    installed.map_err(|e| OmniError::Logging(format!("Failed to install subscriber: {}", e)))?;

    tracing::info!(
        production = config.production,
        level = %config.effective_level(),
        "Logging initialized"
    );

    Ok(())
}
