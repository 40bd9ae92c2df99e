// SPDX-License-Identifier: GPL-3.0-only

//! Threshold configuration
//!
//! Maps signal names to (warn, crit) level pairs. The configuration is
//! validated in full at load time and is immutable afterwards; evaluation
//! never mutates it, so one configuration can serve a whole batch of devices
//! across parallel workers.
//!
//! Signals without configured levels fall back to built-in defaults:
//! uncorrected errors alarm on any nonzero value (critical), corrected
//! counters alarm on any nonzero value (warning only), and the volume and
//! rate signals are skipped entirely unless explicitly configured.
//!
//! File format is TOML; keys are dotted signal names and must be quoted:
//!
//! ```toml
//! "read.corrected_eccfast" = { warn = 50000, crit = 500000 }
//! "write.uncorrected_errors" = { warn = 1, crit = 3 }
//! "read.uncorrected_errors_per_tb" = { warn = 0.5, crit = 2.0 }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use scsi_types::{Severity, SignalId, SignalKind};

use crate::error::{ConfigError, Result};

/// A (warn, crit) level pair; `crit` may be infinite ("warn only")
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdLevels {
    pub warn: f64,
    pub crit: f64,
}

impl ThresholdLevels {
    pub const fn new(warn: f64, crit: f64) -> Self {
        Self { warn, crit }
    }

    /// Classify an observed value against these levels.
    ///
    /// Both bounds are inclusive: a value exactly at `warn` is WARN, exactly
    /// at `crit` is CRITICAL. Never returns UNKNOWN.
    pub fn classify(&self, value: f64) -> Severity {
        if value >= self.crit {
            Severity::Critical
        } else if value >= self.warn {
            Severity::Warn
        } else {
            Severity::Ok
        }
    }
}

/// Built-in levels for signals the configuration does not cover.
///
/// Returns None for signal kinds that are skipped when unconfigured: the
/// per-TB rate (meaningless false precision on devices with little volume)
/// and the processed-volume counter (a measurement, not an alarm).
pub fn default_levels(kind: SignalKind) -> Option<ThresholdLevels> {
    match kind {
        // Uncorrected errors are never benign
        SignalKind::UncorrectedErrors => Some(ThresholdLevels::new(1.0, 1.0)),
        // Corrected errors indicate wear, not data loss: warn only
        SignalKind::CorrectedEccFast
        | SignalKind::CorrectedEccDelayed
        | SignalKind::CorrectedRereadsRewrites
        | SignalKind::AlgorithmInvocations => Some(ThresholdLevels::new(1.0, f64::INFINITY)),
        SignalKind::BytesProcessed | SignalKind::UncorrectedErrorsPerTb => None,
    }
}

/// Validated threshold configuration for one evaluation batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdConfig {
    levels: BTreeMap<SignalId, ThresholdLevels>,
}

impl ThresholdConfig {
    /// Build a configuration from (signal name, levels) entries, failing
    /// fast on any unknown name or invariant violation.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, ThresholdLevels)>,
        S: AsRef<str>,
    {
        let mut levels = BTreeMap::new();
        for (name, pair) in entries {
            let name = name.as_ref();
            let signal = SignalId::parse(name)
                .ok_or_else(|| ConfigError::UnknownSignal(name.to_string()))?;
            validate_levels(name, pair)?;
            levels.insert(signal, pair);
        }
        Ok(Self { levels })
    }

    /// Parse and validate a TOML configuration document
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let raw: BTreeMap<String, ThresholdLevels> = toml::from_str(input)?;
        Self::new(raw)
    }

    /// Load and validate a TOML configuration file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let input = std::fs::read_to_string(path)
            .with_context(|| format!("reading threshold configuration {}", path.display()))?;
        Self::from_toml_str(&input)
            .with_context(|| format!("loading threshold configuration {}", path.display()))
    }

    /// Levels to evaluate a signal against: configured, or the built-in
    /// default. None means the signal is skipped (not evaluated, not
    /// reported as OK).
    pub fn levels_for(&self, signal: SignalId) -> Option<ThresholdLevels> {
        self.levels
            .get(&signal)
            .copied()
            .or_else(|| default_levels(signal.kind))
    }

    /// Number of explicitly configured signals
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

fn validate_levels(signal: &str, pair: ThresholdLevels) -> Result<()> {
    for value in [pair.warn, pair.crit] {
        if value.is_nan() || value < 0.0 {
            return Err(ConfigError::NegativeLevel {
                signal: signal.to_string(),
                value,
            });
        }
    }
    if pair.warn > pair.crit {
        return Err(ConfigError::InvalidLevels {
            signal: signal.to_string(),
            warn: pair.warn,
            crit: pair.crit,
        });
    }
    Ok(())
}
