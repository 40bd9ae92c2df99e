// SPDX-License-Identifier: GPL-3.0-only

//! Canonical domain models for SCSI error-counter monitoring
//!
//! This crate defines the single source of truth for the types shared between
//! the evaluation core and its callers:
//!
//! - **scsi-check**: consumes [`DeviceRecord`] and raw counter logs, produces
//!   [`EvaluationResult`]
//! - collector/agent layers: build [`DeviceRecord`]s and hand over the raw
//!   error-counter log
//! - rendering layers: consume [`EvaluationResult`] for display and metric
//!   export
//!
//! The model is deliberately flat: one record per device, zero-to-three
//! validated operation entries per report, and an immutable evaluation
//! outcome. Nothing here performs I/O or holds state across passes.

pub mod common;
pub mod counters;
pub mod device;
pub mod severity;
pub mod signal;

pub use common::{bytes_to_pretty, count_pretty};
pub use counters::{
    BYTES_PER_TIB, DeviceErrorReport, OperationCounters, OperationEntry, OperationKind,
    OperationRates,
};
pub use device::DeviceRecord;
pub use severity::Severity;
pub use signal::{EvaluationResult, Measurement, SignalId, SignalKind, SignalReport};
