// SPDX-License-Identifier: GPL-3.0-only

//! Device identity model

use serde::{Deserialize, Serialize};

use crate::common::bytes_to_pretty;

/// Identity and metadata for one monitored unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Device path (e.g., "/dev/sda"); unique key within one evaluation pass
    pub device_path: String,

    /// Device model name
    pub model: String,

    /// Serial number
    pub serial: String,

    /// Firmware revision
    pub firmware: String,

    /// Total capacity in bytes (0 = unknown; never used as a divisor)
    pub capacity_bytes: u64,
}

impl DeviceRecord {
    /// Get a short display name for the device
    pub fn display_name(&self) -> String {
        if !self.model.is_empty() {
            self.model.clone()
        } else {
            self.device_basename().to_string()
        }
    }

    /// Get a friendly one-line description for summaries.
    ///
    /// Format: `"<model> (<capacity>) S/N: <serial> (<name>)"`, dropping any
    /// part that is unknown; falls back to the bare device path when nothing
    /// else is available.
    pub fn description(&self) -> String {
        let mut parts = Vec::new();

        if !self.model.is_empty() {
            parts.push(self.model.clone());
        }

        if self.capacity_bytes > 0 {
            parts.push(format!("({})", bytes_to_pretty(self.capacity_bytes)));
        }

        if !self.serial.is_empty() {
            parts.push(format!("S/N: {}", self.serial_short()));
        }

        if parts.is_empty() {
            self.device_path.clone()
        } else {
            format!("{} ({})", parts.join(" "), self.device_basename())
        }
    }

    /// Last eight characters of the serial, enough to tell drives apart
    pub fn serial_short(&self) -> &str {
        let len = self.serial.chars().count();
        if len > 8 {
            let skip = len - 8;
            let (idx, _) = self.serial.char_indices().nth(skip).unwrap_or((0, ' '));
            &self.serial[idx..]
        } else {
            &self.serial
        }
    }

    /// Device name without the directory prefix (e.g., "sda" from "/dev/sda")
    fn device_basename(&self) -> &str {
        self.device_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.device_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> DeviceRecord {
        DeviceRecord {
            device_path: "/dev/sdb".to_string(),
            model: "SEAGATE ST8000NM0075".to_string(),
            serial: "ZA1E2F3G4H5J".to_string(),
            firmware: "E004".to_string(),
            capacity_bytes: 8 * 1024u64.pow(4),
        }
    }

    #[test]
    fn test_description_full() {
        let desc = record().description();
        assert_eq!(desc, "SEAGATE ST8000NM0075 (8.00 TB) S/N: 2F3G4H5J (sdb)");
    }

    #[test]
    fn test_description_falls_back_to_path() {
        let record = DeviceRecord {
            device_path: "/dev/sg3".to_string(),
            ..Default::default()
        };
        assert_eq!(record.description(), "/dev/sg3");
    }

    #[test]
    fn test_short_serial_kept_whole() {
        let record = DeviceRecord {
            serial: "AB12".to_string(),
            ..Default::default()
        };
        assert_eq!(record.serial_short(), "AB12");
    }

    #[test]
    fn test_device_record_serialization() {
        let record = record();
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: DeviceRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
