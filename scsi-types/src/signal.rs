// SPDX-License-Identifier: GPL-3.0-only

//! Signal identity and evaluation outcome models
//!
//! A signal is one observed value for one operation: either a raw counter or
//! a derived per-volume rate. Signal names are stable strings used both in
//! threshold configuration keys and in reports (`"read.corrected_eccfast"`,
//! `"write.uncorrected_errors_per_tb"`); metric names use the flat
//! underscore form the graphing layer expects (`"read_corrected_eccfast"`).

use serde::{Deserialize, Serialize};

use crate::{OperationKind, Severity};

/// The per-operation quantity a signal observes.
///
/// The derive order is the fixed sub-counter reporting order: ECC fast, ECC
/// delayed, rereads/rewrites, algorithm invocations, uncorrected errors,
/// then the volume and rate signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    #[serde(rename = "corrected_eccfast")]
    CorrectedEccFast,

    #[serde(rename = "corrected_eccdelayed")]
    CorrectedEccDelayed,

    #[serde(rename = "corrected_rereads_rewrites")]
    CorrectedRereadsRewrites,

    #[serde(rename = "algorithm_invocations")]
    AlgorithmInvocations,

    #[serde(rename = "uncorrected_errors")]
    UncorrectedErrors,

    #[serde(rename = "bytes_processed")]
    BytesProcessed,

    #[serde(rename = "uncorrected_errors_per_tb")]
    UncorrectedErrorsPerTb,
}

impl SignalKind {
    /// All signal kinds, in reporting order
    pub const ALL: [SignalKind; 7] = [
        Self::CorrectedEccFast,
        Self::CorrectedEccDelayed,
        Self::CorrectedRereadsRewrites,
        Self::AlgorithmInvocations,
        Self::UncorrectedErrors,
        Self::BytesProcessed,
        Self::UncorrectedErrorsPerTb,
    ];

    /// Stable name used in signal and configuration keys
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CorrectedEccFast => "corrected_eccfast",
            Self::CorrectedEccDelayed => "corrected_eccdelayed",
            Self::CorrectedRereadsRewrites => "corrected_rereads_rewrites",
            Self::AlgorithmInvocations => "algorithm_invocations",
            Self::UncorrectedErrors => "uncorrected_errors",
            Self::BytesProcessed => "bytes_processed",
            Self::UncorrectedErrorsPerTb => "uncorrected_errors_per_tb",
        }
    }

    /// Human-readable label fragment ("ECC fast", "uncorrected errors", ...)
    pub fn label(self) -> &'static str {
        match self {
            Self::CorrectedEccFast => "ECC fast",
            Self::CorrectedEccDelayed => "ECC delayed",
            Self::CorrectedRereadsRewrites => "rereads/rewrites",
            Self::AlgorithmInvocations => "algorithm invocations",
            Self::UncorrectedErrors => "uncorrected errors",
            Self::BytesProcessed => "bytes processed",
            Self::UncorrectedErrorsPerTb => "uncorrected errors per TB",
        }
    }

    /// Parse a stable name
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    /// Whether this signal observes a derived rate rather than a raw counter
    pub fn is_rate(self) -> bool {
        matches!(self, Self::UncorrectedErrorsPerTb)
    }
}

/// One signal: an operation plus the quantity observed for it.
///
/// Field order gives the derived `Ord` the reporting order: by operation
/// (read, write, verify), then by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SignalId {
    pub operation: OperationKind,
    pub kind: SignalKind,
}

impl SignalId {
    pub fn new(operation: OperationKind, kind: SignalKind) -> Self {
        Self { operation, kind }
    }

    /// Dotted signal name used in configuration and reports
    pub fn name(self) -> String {
        format!("{}.{}", self.operation.as_str(), self.kind.as_str())
    }

    /// Flat metric name for the graphing/export layer
    pub fn metric_name(self) -> String {
        format!("{}_{}", self.operation.as_str(), self.kind.as_str())
    }

    /// Human-readable label ("Read ECC fast")
    pub fn label(self) -> String {
        format!("{} {}", self.operation.label(), self.kind.label())
    }

    /// Parse a dotted signal name
    pub fn parse(name: &str) -> Option<Self> {
        let (op, kind) = name.split_once('.')?;
        Some(Self {
            operation: OperationKind::from_str(op)?,
            kind: SignalKind::from_str(kind)?,
        })
    }
}

impl std::fmt::Display for SignalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.operation.as_str(), self.kind.as_str())
    }
}

/// Evaluation outcome for one reported signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReport {
    /// Which signal this is
    pub signal: SignalId,

    /// Observed value (counter as f64, or rate)
    pub value: f64,

    /// Severity after threshold classification
    pub severity: Severity,

    /// Rendered one-line summary ("Read ECC fast: 5")
    pub summary: String,
}

/// One exported numeric measurement, independent of severity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Flat metric name ("read_corrected_eccfast")
    pub name: String,

    /// Metric value
    pub value: f64,
}

/// Immutable outcome of evaluating one device report.
///
/// NoData devices evaluate to `overall = Unknown` with empty signal and
/// measurement lists; that is a normal outcome for devices without a SCSI
/// error counter log, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Worst severity across all signals
    pub overall: Severity,

    /// Reported signals, sorted by (operation, kind); zero-valued OK signals
    /// are suppressed
    pub signals: Vec<SignalReport>,

    /// Every normalized counter and computed rate, regardless of severity
    pub measurements: Vec<Measurement>,

    /// One-line device summary for dashboards and logs
    pub summary: String,
}
