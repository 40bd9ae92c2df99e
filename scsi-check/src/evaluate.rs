// SPDX-License-Identifier: GPL-3.0-only

//! Threshold evaluation
//!
//! Classifies every observed counter and rate against its (warn, crit)
//! levels and escalates to one overall device severity by running maximum.
//!
//! Reporting follows three tiers: zero-valued OK signals are suppressed from
//! the signal list (their zero still appears in the measurement set for
//! trend graphing), nonzero within-tolerance signals are listed at OK, and
//! breached signals are listed at their severity. A device with no usable
//! counter data evaluates to UNKNOWN with empty lists, a normal outcome for
//! unsupported devices, not an error.

use tracing::debug;

use scsi_types::{
    DeviceErrorReport, DeviceRecord, EvaluationResult, Measurement, OperationEntry, OperationKind,
    Severity, SignalId, SignalKind, SignalReport, bytes_to_pretty, count_pretty,
};

use crate::config::ThresholdConfig;
use crate::normalize::{self, NormalizeOutcome};

/// Normalize a raw error-counter log and evaluate it in one call.
///
/// This is the per-device entry point for batch callers; it never fails.
/// Devices without usable data come back as UNKNOWN.
pub fn check_device(
    device: DeviceRecord,
    raw: &serde_json::Value,
    config: &ThresholdConfig,
) -> EvaluationResult {
    evaluate(&normalize::normalize(device, raw), config)
}

/// Evaluate a normalization outcome against a validated configuration
pub fn evaluate(outcome: &NormalizeOutcome, config: &ThresholdConfig) -> EvaluationResult {
    match outcome {
        NormalizeOutcome::Report(report) => evaluate_report(report, config),
        NormalizeOutcome::NoData(device) => no_data_result(device),
    }
}

/// Evaluate one validated report.
///
/// Stateless and deterministic: the same report and configuration always
/// produce the same result.
pub fn evaluate_report(report: &DeviceErrorReport, config: &ThresholdConfig) -> EvaluationResult {
    let mut overall = Severity::Ok;
    let mut signals = Vec::new();
    let mut measurements = Vec::new();

    // Fixed reporting order regardless of how the report was assembled
    for operation in OperationKind::ALL {
        let Some(entry) = report.operation(operation) else {
            continue;
        };

        push_measurements(&mut measurements, entry);

        for kind in SignalKind::ALL {
            let signal = SignalId::new(operation, kind);
            let Some(value) = signal_value(entry, kind) else {
                // Rate undefined (zero volume): excluded, never reported as 0
                continue;
            };
            let Some(levels) = config.levels_for(signal) else {
                // No levels configured and no default: signal is skipped
                continue;
            };

            let severity = levels.classify(value);
            overall = overall.max(severity);

            if value == 0.0 && severity == Severity::Ok {
                debug!(signal = %signal, "zero-valued OK signal suppressed");
                continue;
            }

            signals.push(SignalReport {
                signal,
                value,
                severity,
                summary: render_signal(signal, value),
            });
        }
    }

    let summary = summary_line(report, overall, &signals);

    EvaluationResult {
        overall,
        signals,
        measurements,
        summary,
    }
}

/// UNKNOWN result for a device with no usable counter data
fn no_data_result(device: &DeviceRecord) -> EvaluationResult {
    EvaluationResult {
        overall: Severity::Unknown,
        signals: Vec::new(),
        measurements: Vec::new(),
        summary: format!("{}: no error counter data available", device.description()),
    }
}

/// Observed value for one signal, or None when it is undefined
fn signal_value(entry: &OperationEntry, kind: SignalKind) -> Option<f64> {
    let counters = &entry.counters;
    match kind {
        SignalKind::CorrectedEccFast => Some(counters.corrected_eccfast as f64),
        SignalKind::CorrectedEccDelayed => Some(counters.corrected_eccdelayed as f64),
        SignalKind::CorrectedRereadsRewrites => Some(counters.corrected_rereads_rewrites as f64),
        SignalKind::AlgorithmInvocations => Some(counters.algorithm_invocations as f64),
        SignalKind::UncorrectedErrors => Some(counters.uncorrected_errors as f64),
        SignalKind::BytesProcessed => Some(counters.bytes_processed as f64),
        SignalKind::UncorrectedErrorsPerTb => entry.rates.map(|r| r.uncorrected_errors_per_tb),
    }
}

/// Export every normalized counter and every computed rate for one operation
fn push_measurements(measurements: &mut Vec<Measurement>, entry: &OperationEntry) {
    let op = entry.operation.as_str();
    let counters = &entry.counters;

    let mut push = |name: String, value: f64| measurements.push(Measurement { name, value });

    push(
        format!("{op}_corrected_eccfast"),
        counters.corrected_eccfast as f64,
    );
    push(
        format!("{op}_corrected_eccdelayed"),
        counters.corrected_eccdelayed as f64,
    );
    push(
        format!("{op}_corrected_rereads_rewrites"),
        counters.corrected_rereads_rewrites as f64,
    );
    push(
        format!("{op}_algorithm_invocations"),
        counters.algorithm_invocations as f64,
    );
    push(
        format!("{op}_bytes_processed"),
        counters.bytes_processed as f64,
    );
    push(
        format!("{op}_uncorrected_errors"),
        counters.uncorrected_errors as f64,
    );

    if let Some(rates) = entry.rates {
        push(
            format!("{op}_corrected_eccfast_per_tb"),
            rates.corrected_eccfast_per_tb,
        );
        push(
            format!("{op}_corrected_eccdelayed_per_tb"),
            rates.corrected_eccdelayed_per_tb,
        );
        push(
            format!("{op}_corrected_rereads_rewrites_per_tb"),
            rates.corrected_rereads_rewrites_per_tb,
        );
        push(
            format!("{op}_algorithm_invocations_per_tb"),
            rates.algorithm_invocations_per_tb,
        );
        push(
            format!("{op}_uncorrected_errors_per_tb"),
            rates.uncorrected_errors_per_tb,
        );
    }
}

/// One-line rendering of a signal's observed value
fn render_signal(signal: SignalId, value: f64) -> String {
    match signal.kind {
        SignalKind::BytesProcessed => {
            format!("{}: {}", signal.label(), bytes_to_pretty(value as u64))
        }
        SignalKind::UncorrectedErrorsPerTb => format!("{}: {:.2}", signal.label(), value),
        _ => format!("{}: {}", signal.label(), count_pretty(value as u64)),
    }
}

/// Assemble the device summary: description, top-severity signal summaries
/// (or "no errors detected"), and the processed volume when known.
fn summary_line(
    report: &DeviceErrorReport,
    overall: Severity,
    signals: &[SignalReport],
) -> String {
    let mut parts = Vec::new();

    if overall > Severity::Ok {
        parts.extend(
            signals
                .iter()
                .filter(|s| s.severity == overall)
                .map(|s| s.summary.clone()),
        );
    } else {
        parts.push("no errors detected".to_string());
    }

    let total_bytes: u64 = report
        .operations
        .iter()
        .map(|e| e.counters.bytes_processed)
        .sum();
    if total_bytes > 0 {
        parts.push(format!("{} processed", bytes_to_pretty(total_bytes)));
    }

    format!("{}: {}", report.device.description(), parts.join(", "))
}
