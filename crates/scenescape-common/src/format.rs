//! Human-readable size formatting.

const KIB: f64 = 1024.0;
const GIB: f64 = KIB * KIB * KIB;
const UNITS: &[&str] = &["Bytes", "KB", "MB", "GB", "TB"];

/// Convert a byte count into a `"{:.2} GB"` string.
///
/// The library server reports `total_size` in bytes; the GB rendering is the
/// client's job.
pub fn bytes_to_gb_string(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / GIB)
}

/// Format a byte count using the largest binary unit that keeps the value
/// at or above one, with at most two decimals and trailing zeros dropped.
///
/// ```
/// use scenescape_common::format::format_file_size;
///
/// assert_eq!(format_file_size(0), "0 Bytes");
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= KIB && unit < UNITS.len() - 1 {
        value /= KIB;
        unit += 1;
    }

    let rendered = format!("{value:.2}");
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", rendered, UNITS[unit])
}
