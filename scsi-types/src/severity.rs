// SPDX-License-Identifier: GPL-3.0-only

//! Monitoring severity scale
//!
//! A total order over the closed set of monitoring states. Escalation across
//! signals is `Ord::max`, so the derive order is load-bearing: OK < WARN <
//! CRITICAL < UNKNOWN. UNKNOWN is reserved for the no-data path and is never
//! produced by comparing a counter against levels.

use serde::{Deserialize, Serialize};

/// Monitoring state for one signal or one whole device
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Within tolerance
    Ok,

    /// Warn level reached, critical level not reached
    Warn,

    /// Critical level reached
    Critical,

    /// No usable data for the device (absorbing; not reachable from counters)
    Unknown,
}

impl Severity {
    /// Short uppercase form used in summaries and logs
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warn => "WARN",
            Self::Critical => "CRIT",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
