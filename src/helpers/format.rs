//! Number and size formatting for reports.

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Group digits in threes: `1234567` becomes `1,234,567`.
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Render a byte count.
///
/// With `human_readable` the value is scaled to the largest binary unit it fills,
/// with one decimal below 10. Otherwise the exact count is printed.
pub fn format_size(bytes: u64, human_readable: bool) -> String {
    if !human_readable {
        return bytes.to_string();
    }

    let (scaled, unit) = scale_bytes(bytes);
    match unit {
        0 => format!("{} {}", format_number(bytes), SIZE_UNITS[0]),
        _ if scaled < 10.0 => format!("{scaled:.1} {}", SIZE_UNITS[unit]),
        _ => format!("{scaled:.0} {}", SIZE_UNITS[unit]),
    }
}

fn scale_bytes(bytes: u64) -> (f64, usize) {
    let mut scaled = bytes as f64;
    let mut unit = 0;
    while scaled >= 1024.0 && unit + 1 < SIZE_UNITS.len() {
        scaled /= 1024.0;
        unit += 1;
    }
    (scaled, unit)
}
