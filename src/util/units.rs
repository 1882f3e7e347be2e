//! Units formatting utilities
//!
//! Human-readable formatting of element counts, memory sizes, elapsed
//! times and speedups for reports and log messages.

use std::time::Duration;

/// Format bytes into human-readable size with appropriate units
///
/// # Examples
/// ```
/// use sumbench::util::units::format_bytes;
///
/// assert_eq!(format_bytes(1024), "1.0 KiB");
/// assert_eq!(format_bytes(800_000_000), "762.9 MiB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB", "PiB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Format an element count with thousands separators
///
/// # Examples
/// ```
/// use sumbench::util::units::format_count;
///
/// assert_eq!(format_count(100_000_000), "100,000,000");
/// assert_eq!(format_count(999), "999");
/// ```
pub fn format_count(count: usize) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Elapsed time in seconds with 6 decimal places
pub fn format_seconds(duration: Duration) -> String {
    format!("{:.6}", duration.as_secs_f64())
}

/// Elapsed time in milliseconds with 3 decimal places
pub fn format_millis(duration: Duration) -> String {
    format!("{:.3}", duration.as_secs_f64() * 1000.0)
}

/// Format a speedup factor
///
/// # Examples
/// ```
/// use sumbench::util::units::format_speedup;
///
/// assert_eq!(format_speedup(3.456), "3.46x");
/// ```
pub fn format_speedup(factor: f64) -> String {
    format!("{:.2}x", factor)
}
