//! Common utilities and helpers

use std::time::Duration;

/// Short decimal rendering of a count: `human(3_732_480, "", "")` is `3.7M`.
///
/// Values up to 1000 are printed as they are.
pub fn human(n: u64, separator: &str, unit: &str) -> String {
    const STEPS: [(u64, &str); 4] = [
        (1_000_000_000_000, "T"),
        (1_000_000_000, "G"),
        (1_000_000, "M"),
        (1_000, "K"),
    ];

    for (scale, suffix) in STEPS {
        if n > scale {
            return format!(
                "{:.1}{}{}{}",
                n as f64 / scale as f64,
                separator,
                suffix,
                unit
            );
        }
    }

    format!("{}{}{}", n, separator, unit)
}

/// Cut a float down to one decimal without rounding
pub fn truncate_one_decimal(value: f64) -> f64 {
    (value * 10.0).trunc() / 10.0
}

/// Format duration for log lines
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    let milliseconds = duration.subsec_millis();

    if minutes > 0 {
        format!("{}m{}.{:03}s", minutes, seconds, milliseconds)
    } else {
        format!("{}.{:03}s", seconds, milliseconds)
    }
}
