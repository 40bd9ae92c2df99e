// SPDX-License-Identifier: GPL-3.0-only

//! End-to-end evaluation tests: raw collector JSON through normalization and
//! threshold evaluation.

use serde_json::json;

use scsi_check::{
    DeviceRecord, Severity, ThresholdConfig, check_device, scsi_types::BYTES_PER_TIB,
};

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn enterprise_drive() -> DeviceRecord {
    DeviceRecord {
        device_path: "/dev/sdb".to_string(),
        model: "SEAGATE ST8000NM0075".to_string(),
        serial: "ZA1E2F3G4H5J".to_string(),
        firmware: "E004".to_string(),
        capacity_bytes: 8 * 1024u64.pow(4),
    }
}

fn operation(eccfast: u64, uncorrected: u64, gigabytes: &str) -> serde_json::Value {
    json!({
        "errors_corrected_by_eccfast": eccfast,
        "errors_corrected_by_eccdelayed": 0,
        "errors_corrected_by_rereads_rewrites": 0,
        "correction_algorithm_invocations": eccfast,
        "gigabytes_processed": gigabytes,
        "total_uncorrected_errors": uncorrected,
    })
}

#[test]
fn healthy_drive_is_ok_with_full_measurements() {
    init_tracing();

    let raw = json!({
        "read": operation(0, 0, "5120.000"),
        "write": operation(0, 0, "1024.000"),
        "verify": operation(0, 0, "0.000"),
    });

    let result = check_device(enterprise_drive(), &raw, &ThresholdConfig::default());

    assert_eq!(result.overall, Severity::Ok);
    assert!(result.signals.is_empty());
    // 6 counters per operation, plus 5 rates for the two with volume
    assert_eq!(result.measurements.len(), 3 * 6 + 2 * 5);
    assert!(result.summary.contains("no errors detected"));
    assert!(result.summary.contains("SEAGATE ST8000NM0075"));
    assert!(result.summary.contains("S/N: 2F3G4H5J"));
}

#[test]
fn corrected_errors_escalate_to_warn() {
    init_tracing();

    // 5 TiB read with 5 corrected fast-ECC errors: 1.0/TB
    let raw = json!({ "read": operation(5, 0, "5120.000") });

    let result = check_device(enterprise_drive(), &raw, &ThresholdConfig::default());

    assert_eq!(result.overall, Severity::Warn);
    let names: Vec<String> = result.signals.iter().map(|s| s.signal.name()).collect();
    assert!(names.contains(&"read.corrected_eccfast".to_string()));
    let rate = result
        .measurements
        .iter()
        .find(|m| m.name == "read_corrected_eccfast_per_tb")
        .unwrap();
    assert_eq!(rate.value, 1.0);
}

#[test]
fn uncorrected_errors_escalate_to_critical() {
    init_tracing();

    let raw = json!({
        "read": operation(0, 0, "5120.000"),
        "write": operation(0, 3, "1024.000"),
    });

    let result = check_device(enterprise_drive(), &raw, &ThresholdConfig::default());

    assert_eq!(result.overall, Severity::Critical);
    let breached = result
        .signals
        .iter()
        .find(|s| s.severity == Severity::Critical)
        .unwrap();
    assert_eq!(breached.signal.name(), "write.uncorrected_errors");
    assert!(result.summary.contains("Write uncorrected errors: 3"));
}

#[test]
fn unsupported_device_is_unknown_not_a_failure() {
    init_tracing();

    // Consumer drive: no SCSI error counter log at all
    let raw = json!({ "ata_smart_attributes": { "table": [] } });

    let result = check_device(enterprise_drive(), &raw, &ThresholdConfig::default());

    assert_eq!(result.overall, Severity::Unknown);
    assert!(result.signals.is_empty());
    assert!(result.measurements.is_empty());
    assert!(result.summary.contains("no error counter data available"));
}

#[test]
fn malformed_operation_dropped_others_still_evaluated() {
    init_tracing();

    let raw = json!({
        // Partial set: must not be zero-filled into a valid operation
        "read": { "total_uncorrected_errors": 9 },
        "write": operation(0, 2, "1024.000"),
    });

    let result = check_device(enterprise_drive(), &raw, &ThresholdConfig::default());

    assert_eq!(result.overall, Severity::Critical);
    assert!(result.signals.iter().all(|s| s.signal.name().starts_with("write.")));
    assert!(
        !result
            .measurements
            .iter()
            .any(|m| m.name.starts_with("read_"))
    );
}

#[test]
fn configured_levels_override_defaults() {
    init_tracing();

    let config = ThresholdConfig::from_toml_str(
        r#"
        "read.corrected_eccfast" = { warn = 50000, crit = 500000 }
        "read.uncorrected_errors_per_tb" = { warn = 0.5, crit = 2.0 }
        "#,
    )
    .unwrap();

    // 2 TiB read: 2 uncorrected errors is 1.0/TB, between warn and crit
    let raw = json!({ "read": operation(120, 2, "2048.000") });

    let result = check_device(enterprise_drive(), &raw, &config);

    assert_eq!(result.overall, Severity::Critical); // absolute uncorrected default still applies
    let eccfast = result
        .signals
        .iter()
        .find(|s| s.signal.name() == "read.corrected_eccfast")
        .unwrap();
    assert_eq!(eccfast.severity, Severity::Ok); // 120 below the raised warn level
    let rate = result
        .signals
        .iter()
        .find(|s| s.signal.name() == "read.uncorrected_errors_per_tb")
        .unwrap();
    assert_eq!(rate.severity, Severity::Warn);
}

#[test]
fn invalid_configuration_fails_before_any_device() {
    let result = ThresholdConfig::from_toml_str(
        r#""write.uncorrected_errors" = { warn = 10, crit = 5 }"#,
    );
    assert!(result.is_err());
}

#[test]
fn same_input_same_result() {
    let raw = json!({
        "read": operation(7, 1, "3072.000"),
        "verify": operation(0, 0, "512.000"),
    });
    let config = ThresholdConfig::default();

    let first = check_device(enterprise_drive(), &raw, &config);
    let second = check_device(enterprise_drive(), &raw, &config);
    assert_eq!(first, second);
}

#[test]
fn rate_normalization_uses_binary_terabytes() {
    // 1024 GiB == 1 TiB exactly
    let raw = json!({ "read": operation(4, 0, "1024.000") });

    let result = check_device(enterprise_drive(), &raw, &ThresholdConfig::default());

    let volume = result
        .measurements
        .iter()
        .find(|m| m.name == "read_bytes_processed")
        .unwrap();
    assert_eq!(volume.value, BYTES_PER_TIB as f64);
    let rate = result
        .measurements
        .iter()
        .find(|m| m.name == "read_corrected_eccfast_per_tb")
        .unwrap();
    assert_eq!(rate.value, 4.0);
}
