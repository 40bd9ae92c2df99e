// SPDX-License-Identifier: GPL-3.0-only

//! Error-counter data models
//!
//! These types represent one validated SCSI error-counter log: per-operation
//! counter sets plus the per-volume rates derived from them. All layers use
//! these as the single source of truth; the loosely-typed raw log never
//! travels past the normalizer.

use serde::{Deserialize, Serialize};

use crate::DeviceRecord;

/// Bytes in one binary terabyte (TiB), the denominator unit for rates
pub const BYTES_PER_TIB: u64 = 1 << 40;

/// Operation kinds reported by the SCSI error counter log.
///
/// The derive order (read < write < verify) is the fixed reporting order for
/// signals and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Read,
    Write,
    Verify,
}

impl OperationKind {
    /// All recognized operations, in reporting order
    pub const ALL: [OperationKind; 3] = [Self::Read, Self::Write, Self::Verify];

    /// Lowercase wire/metric name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Verify => "verify",
        }
    }

    /// Capitalized form for human-readable labels
    pub fn label(self) -> &'static str {
        match self {
            Self::Read => "Read",
            Self::Write => "Write",
            Self::Verify => "Verify",
        }
    }

    /// Parse a raw top-level log key
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "read" => Some(Self::Read),
            "write" => Some(Self::Write),
            "verify" => Some(Self::Verify),
            _ => None,
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fully validated counter set for a single operation.
///
/// Invariant: an instance only exists when all six fields were present and
/// non-negative in the raw log. Missing fields are never defaulted to zero;
/// that would make "no data" indistinguishable from "no errors".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationCounters {
    /// Errors corrected by the fast ECC path
    pub corrected_eccfast: u64,

    /// Errors corrected by the delayed ECC path
    pub corrected_eccdelayed: u64,

    /// Errors corrected by rereads (read/verify) or rewrites (write)
    pub corrected_rereads_rewrites: u64,

    /// Total invocations of the correction algorithm
    pub algorithm_invocations: u64,

    /// Volume processed by this operation, in bytes
    pub bytes_processed: u64,

    /// Errors the device could not correct
    pub uncorrected_errors: u64,
}

impl OperationCounters {
    /// Whether every counter (including the volume) is zero
    pub fn is_all_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Derive per-TiB rates, or None when no volume was processed.
    ///
    /// A near-zero denominator must never be misreported as "no errors per
    /// TB", so the rates are omitted entirely rather than forced to zero.
    pub fn rates(&self) -> Option<OperationRates> {
        if self.bytes_processed == 0 {
            return None;
        }
        let tib = self.bytes_processed as f64 / BYTES_PER_TIB as f64;
        Some(OperationRates {
            bytes_processed_tb: tib,
            corrected_eccfast_per_tb: self.corrected_eccfast as f64 / tib,
            corrected_eccdelayed_per_tb: self.corrected_eccdelayed as f64 / tib,
            corrected_rereads_rewrites_per_tb: self.corrected_rereads_rewrites as f64 / tib,
            algorithm_invocations_per_tb: self.algorithm_invocations as f64 / tib,
            uncorrected_errors_per_tb: self.uncorrected_errors as f64 / tib,
        })
    }
}

/// Per-volume rates for one operation, present only when volume was processed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperationRates {
    /// Volume processed, in binary terabytes
    pub bytes_processed_tb: f64,

    pub corrected_eccfast_per_tb: f64,
    pub corrected_eccdelayed_per_tb: f64,
    pub corrected_rereads_rewrites_per_tb: f64,
    pub algorithm_invocations_per_tb: f64,
    pub uncorrected_errors_per_tb: f64,
}

/// One validated operation within a device report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperationEntry {
    /// Which operation these counters belong to
    pub operation: OperationKind,

    /// The validated counter set
    pub counters: OperationCounters,

    /// Derived rates (None when `bytes_processed` is zero)
    pub rates: Option<OperationRates>,
}

impl OperationEntry {
    /// Build an entry, deriving the rates from the counters
    pub fn new(operation: OperationKind, counters: OperationCounters) -> Self {
        let rates = counters.rates();
        Self {
            operation,
            counters,
            rates,
        }
    }
}

/// One device's validated error report for a single evaluation pass.
///
/// Built fresh on every pass and discarded after evaluation; nothing is
/// persisted across passes. Contains at least one valid operation; the
/// zero-operation case is the distinct NoData outcome and never constructs
/// a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceErrorReport {
    /// The monitored unit
    pub device: DeviceRecord,

    /// Validated operations, in reporting order (read, write, verify)
    pub operations: Vec<OperationEntry>,
}

impl DeviceErrorReport {
    /// Look up one operation's entry
    pub fn operation(&self, kind: OperationKind) -> Option<&OperationEntry> {
        self.operations.iter().find(|e| e.operation == kind)
    }
}
