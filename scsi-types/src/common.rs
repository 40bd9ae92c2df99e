// SPDX-License-Identifier: GPL-3.0-only

//! Rendering helpers shared across models and summaries

use num_format::{Locale, ToFormattedString};

/// Convert bytes to human-readable format (e.g., "1.50 GB")
pub fn bytes_to_pretty(bytes: u64) -> String {
    let mut steps = 0;
    let mut val: f64 = bytes as f64;

    while val > 1024. && steps <= 8 {
        val /= 1024.;
        steps += 1;
    }

    let unit = match steps {
        0 => "B",
        1 => "KB",
        2 => "MB",
        3 => "GB",
        4 => "TB",
        5 => "PB",
        6 => "EB",
        7 => "ZB",
        8 => "YB",
        _ => "Not Supported",
    };

    format!("{:.2} {}", val, unit)
}

/// Render an error count with thousands separators (e.g., "50,000")
pub fn count_pretty(count: u64) -> String {
    count.to_formatted_string(&Locale::en)
}
