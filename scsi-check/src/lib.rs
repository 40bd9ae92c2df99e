// SPDX-License-Identifier: GPL-3.0-only

//! SCSI error-counter evaluation core
//!
//! Takes the raw per-operation error-counter log captured from a storage
//! device and a validated threshold configuration, and produces one
//! [`EvaluationResult`] per device: an overall severity, the breached or
//! noteworthy signals, and the full measurement set for metric export.
//!
//! The core is synchronous and stateless: no I/O, no retained state between
//! passes, no shared mutable data. Callers may evaluate many devices in
//! parallel against one shared [`ThresholdConfig`].
//!
//! Pipeline per device:
//!
//! 1. [`normalize::normalize`] validates the loosely-typed raw log into a
//!    [`DeviceErrorReport`] (or NoData)
//! 2. [`evaluate::evaluate`] classifies every signal and escalates to one
//!    device severity
//!
//! [`check_device`] runs both in one call.

// Error types
pub mod error;

pub mod config;
pub mod evaluate;
pub mod normalize;

// Re-export scsi-types models (canonical domain models)
pub use scsi_types;
pub use scsi_types::{
    DeviceErrorReport, DeviceRecord, EvaluationResult, Measurement, OperationCounters,
    OperationEntry, OperationKind, OperationRates, Severity, SignalId, SignalKind, SignalReport,
};

pub use config::{ThresholdConfig, ThresholdLevels, default_levels};
pub use error::{ConfigError, Result};
pub use evaluate::{check_device, evaluate, evaluate_report};
pub use normalize::{NormalizeOutcome, normalize};
