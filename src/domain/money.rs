//! Currency formatting for report rendering.

/// Format a monetary value with thousands separators and two decimals,
/// e.g. `-$1,234.56`. Rounding is numeric only; no locale handling.
pub fn format_currency(value: f64, symbol: &str) -> String {
    let cents = (value.abs() * 100.0).round() as u128;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{fraction:02}")
}
