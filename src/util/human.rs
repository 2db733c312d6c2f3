const UNITS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];

/// Format a raw byte count with base-1024 units and two decimals: "1.50 KB"
pub fn fmt_bytes(bytes: u64) -> String {
    let (value, unit) = scale(bytes);
    format!("{:.2} {}", value, UNITS[unit])
}

/// Divide by 1024 until the value drops below 1024 or units run out.
/// Returns the scaled value and the index into `UNITS`.
fn scale(bytes: u64) -> (f64, usize) {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    (value, unit)
}
