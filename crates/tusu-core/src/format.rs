//! Rounding and display helpers for monetary values

/// Round to 2 decimal places, halves away from zero
///
/// Results that round to zero are positive zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}

/// Format an amount with thousands separators and at most 2 decimals
///
/// Trailing fractional zeros are dropped: `2350.0` -> `"2,350"`,
/// `1234.5` -> `"1,234.5"`.
pub fn format_amount(value: f64) -> String {
    let rounded = round2(value);
    let negative = rounded < 0.0;
    let fixed = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let frac = frac_part.trim_end_matches('0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Sign-prefixed trend label, e.g. `"+5%"` or `"-0.25%"`
pub fn format_trend(trend: f64) -> String {
    format!("{:+}%", trend + 0.0)
}
