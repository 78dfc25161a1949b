//! Tracing initialization for native hosts
//!
//! Browser builds log through `waitline-frontend`'s console writer instead.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level filter (e.g., "info", "waitline_http=debug")
    pub log_level: String,
    /// Include module targets in output
    #[serde(default = "default_true")]
    pub with_target: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            with_target: true,
        }
    }
}

impl LogConfig {
    /// Read the level from `WAITLINE_LOG`, defaulting to `info`
    pub fn from_env() -> Self {
        Self {
            log_level: std::env::var("WAITLINE_LOG").unwrap_or_else(|_| "info".to_string()),
            ..Self::default()
        }
    }

    pub fn dev() -> Self {
        Self {
            log_level: "debug".to_string(),
            ..Self::default()
        }
    }
}

/// Initialize tracing with the given configuration
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &LogConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(config.with_target);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

/// Initialize with configuration from the environment
pub fn init_default() -> Result<()> {
    init_tracing(&LogConfig::from_env())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails_instead_of_panicking() {
        let config = LogConfig::dev();
        let _ = init_tracing(&config);
        assert!(init_tracing(&config).is_err());
    }
}
