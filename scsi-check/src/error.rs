// SPDX-License-Identifier: GPL-3.0-only

use thiserror::Error;

/// Threshold-configuration errors.
///
/// These are the only fatal errors in the core: a configuration that
/// violates its invariants must be rejected before any device is evaluated.
/// Per-device and per-operation anomalies are recovered locally and never
/// surface as an `Err`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid levels for '{signal}': warn ({warn}) exceeds crit ({crit})")]
    InvalidLevels {
        signal: String,
        warn: f64,
        crit: f64,
    },

    #[error("negative level for '{signal}': {value}")]
    NegativeLevel { signal: String, value: f64 },

    #[error("unknown signal name: '{0}'")]
    UnknownSignal(String),

    #[error("configuration parse error: {0}")]
    Parse(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
