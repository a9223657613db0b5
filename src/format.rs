// Display-side value formatting for the widget's labels.
// Zero and invalid inputs format to None so gauges render empty instead of
// showing a fake "0".

/// SI byte units, 1000-based.
const BYTE_UNITS: [&str; 9] = ["B", "kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Formats a byte count as a human-readable size, e.g. `1024` => `"1.02 kB"`.
/// The value is truncated to an integer first; negative sizes keep their
/// sign. Zero and non-finite values yield None unless `force_zero`, which
/// yields `"0 B"`.
pub fn byte_size(value: f64, force_zero: bool) -> Option<String> {
    if !value.is_finite() || value.trunc() == 0.0 {
        return force_zero.then(|| "0 B".to_string());
    }
    let mut v = value.trunc();
    let neg = v < 0.0;
    if neg {
        v = -v;
    }

    let exponent = ((v.ln() / 1000f64.ln()).floor() as usize).min(BYTE_UNITS.len() - 1);
    let scaled = (v / 1000f64.powi(exponent as i32) * 100.0).round() / 100.0;
    let sign = if neg { "-" } else { "" };

    Some(format!("{}{} {}", sign, scaled, BYTE_UNITS[exponent]))
}

/// Formats a number of seconds as a compact duration, e.g. `65` =>
/// `"1m 5s"`. Units: 365-day years (`Y`), 30-day months (`M`), days, hours,
/// minutes, seconds; zero units are omitted. Non-positive and non-finite
/// values yield None.
pub fn duration(seconds: f64) -> Option<String> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return None;
    }
    let mut rest = seconds.floor() as u64;

    const YEAR: u64 = 365 * 24 * 60 * 60;
    const MONTH: u64 = 30 * 24 * 60 * 60;
    const DAY: u64 = 24 * 60 * 60;

    let mut parts: Vec<String> = Vec::new();
    for (unit, label) in [
        (YEAR, "Y"),
        (MONTH, "M"),
        (DAY, "d"),
        (3600, "h"),
        (60, "m"),
        (1, "s"),
    ] {
        let n = rest / unit;
        rest %= unit;
        if n > 0 {
            parts.push(format!("{}{}", n, label));
        }
    }

    Some(parts.join(" "))
}

/// Formats a number as a rounded percentage string, e.g. `42.4` => `"42%"`.
/// Zero and non-finite values yield None.
pub fn percent(value: f64) -> Option<String> {
    if !value.is_finite() || value == 0.0 {
        return None;
    }
    Some(format!("{}%", value.round() as i64))
}
