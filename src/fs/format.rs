//! Display helpers for entry metadata.

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Format a byte count for display.
///
/// Returns `"-"` for missing or zero sizes. Values are scaled by 1024 up to GB;
/// bytes and values of 10 or more get no decimals, everything else one
/// (a trailing `.0` is dropped, so 2048 bytes is "2 KB").
pub fn format_size(bytes: Option<u64>) -> String {
    let bytes = match bytes {
        Some(b) if b > 0 => b,
        _ => return "-".to_string(),
    };

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    // Ties round away from zero; `format!` alone would round them to even.
    if value >= 10.0 || unit == 0 {
        format!("{:.0} {}", value.round(), UNITS[unit])
    } else {
        let fixed = format!("{:.1}", (value * 10.0).round() / 10.0);
        let fixed = fixed.strip_suffix(".0").unwrap_or(&fixed);
        format!("{} {}", fixed, UNITS[unit])
    }
}
