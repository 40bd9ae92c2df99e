// SPDX-License-Identifier: GPL-3.0-only

//! Counter normalization
//!
//! Turns the loosely-typed raw error-counter log (as captured from the
//! diagnostic utility and handed over as JSON) into validated
//! [`OperationCounters`] sets with derived per-volume rates.
//!
//! Validation is all-or-nothing per operation: an operation missing any of
//! its six sub-counters, or carrying a value that is not a non-negative
//! number, is excluded entirely. Missing numeric fields are never defaulted
//! to zero; that would make a device that reports nothing look like a
//! device that reports no errors.

use serde_json::Value;
use tracing::{debug, warn};

use scsi_types::{DeviceErrorReport, DeviceRecord, OperationCounters, OperationEntry, OperationKind};

/// Raw sub-counter keys, as emitted by smartctl's SCSI error counter log
mod raw_keys {
    pub const ECCFAST: &str = "errors_corrected_by_eccfast";
    pub const ECCDELAYED: &str = "errors_corrected_by_eccdelayed";
    pub const REREADS_REWRITES: &str = "errors_corrected_by_rereads_rewrites";
    pub const ALGORITHM_INVOCATIONS: &str = "correction_algorithm_invocations";
    pub const GIGABYTES_PROCESSED: &str = "gigabytes_processed";
    pub const BYTES_PROCESSED: &str = "bytes_processed";
    pub const UNCORRECTED: &str = "total_uncorrected_errors";
}

/// Outcome of normalizing one device's raw log
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizeOutcome {
    /// At least one operation validated; ready for evaluation
    Report(DeviceErrorReport),

    /// No usable counter data (unsupported device, absent or malformed log).
    /// Distinct from a valid all-zero report.
    NoData(DeviceRecord),
}

/// Normalize a raw error-counter log into a validated report.
///
/// The raw log is a mapping of operation name ("read", "write", "verify")
/// to a mapping of sub-counters; numbers may arrive as JSON numbers or as
/// strings. Unrecognized top-level keys are ignored; recognized operations
/// that fail validation are dropped with a warning and the rest still
/// evaluate.
pub fn normalize(device: DeviceRecord, raw: &Value) -> NormalizeOutcome {
    let Some(log) = raw.as_object() else {
        warn!(
            device = %device.device_path,
            "error counter log is not an object; no usable data"
        );
        return NormalizeOutcome::NoData(device);
    };

    let mut operations = Vec::new();
    for operation in OperationKind::ALL {
        let Some(entry) = log.get(operation.as_str()) else {
            continue;
        };
        if let Some(counters) = parse_operation(&device, operation, entry) {
            operations.push(OperationEntry::new(operation, counters));
        }
    }

    if operations.is_empty() {
        debug!(
            device = %device.device_path,
            "no valid operations in error counter log"
        );
        NormalizeOutcome::NoData(device)
    } else {
        NormalizeOutcome::Report(DeviceErrorReport { device, operations })
    }
}

/// Extract all six sub-counters for one operation, or None if any is
/// missing or malformed.
fn parse_operation(
    device: &DeviceRecord,
    operation: OperationKind,
    entry: &Value,
) -> Option<OperationCounters> {
    let Some(map) = entry.as_object() else {
        warn!(
            device = %device.device_path,
            %operation,
            "operation entry is not an object; excluding"
        );
        return None;
    };

    let field = |key: &str| -> Option<u64> {
        let value = map.get(key).and_then(counter_value);
        if value.is_none() {
            warn!(
                device = %device.device_path,
                %operation,
                key,
                "missing or malformed counter; excluding operation"
            );
        }
        value
    };

    Some(OperationCounters {
        corrected_eccfast: field(raw_keys::ECCFAST)?,
        corrected_eccdelayed: field(raw_keys::ECCDELAYED)?,
        corrected_rereads_rewrites: field(raw_keys::REREADS_REWRITES)?,
        algorithm_invocations: field(raw_keys::ALGORITHM_INVOCATIONS)?,
        bytes_processed: bytes_processed(device, operation, map)?,
        uncorrected_errors: field(raw_keys::UNCORRECTED)?,
    })
}

/// Volume processed by the operation, in bytes.
///
/// smartctl reports `gigabytes_processed` (often as a string, in GiB); a
/// collector may instead supply a pre-converted `bytes_processed` integer.
/// Either satisfies the field; absence of both excludes the operation.
fn bytes_processed(
    device: &DeviceRecord,
    operation: OperationKind,
    map: &serde_json::Map<String, Value>,
) -> Option<u64> {
    if let Some(value) = map.get(raw_keys::BYTES_PROCESSED) {
        let bytes = counter_value(value);
        if bytes.is_none() {
            warn!(
                device = %device.device_path,
                %operation,
                key = raw_keys::BYTES_PROCESSED,
                "malformed volume counter; excluding operation"
            );
        }
        return bytes;
    }

    let gigabytes = map.get(raw_keys::GIGABYTES_PROCESSED).and_then(float_value);
    match gigabytes {
        Some(gb) => Some((gb * (1u64 << 30) as f64).round() as u64),
        None => {
            warn!(
                device = %device.device_path,
                %operation,
                key = raw_keys::GIGABYTES_PROCESSED,
                "missing or malformed volume counter; excluding operation"
            );
            None
        }
    }
}

/// A non-negative integer counter, tolerating string-typed numbers
fn counter_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

/// A non-negative finite float, tolerating string-typed numbers
fn float_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite() && *v >= 0.0)
}
