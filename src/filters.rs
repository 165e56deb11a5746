//! Money formatting utilities for displaying monetary amounts.
//!
//! All amounts are integer cents in a single currency (Singapore dollars).
//! Display format: currency prefix + number with thousands separator + two
//! decimals, e.g. `S$1,234.50`.

pub const CURRENCY_CODE: &str = "SGD";
pub const CURRENCY_SYMBOL: &str = "S$";

/// Format cents for display, e.g. `S$5.50`. Negative amounts keep a leading `-`.
pub fn format_money(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.abs();
    let whole = abs_cents / 100;
    let fractional = abs_cents % 100;

    format!(
        "{}{}{}.{:02}",
        sign,
        CURRENCY_SYMBOL,
        format_with_thousands(whole, ','),
        fractional
    )
}

/// Format cents as a bare decimal with two places and no prefix, e.g. `5.50`.
/// Used for form values and exports.
pub fn format_amount(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.abs();
    format!("{}{}.{:02}", sign, abs_cents / 100, abs_cents % 100)
}

/// Format a percentage with one decimal place, e.g. `12.3%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Format a number with thousands separators.
fn format_with_thousands(n: i64, sep: char) -> String {
    if n == 0 {
        return "0".to_string();
    }

    let s = n.to_string();
    let chars: Vec<char> = s.chars().rev().collect();
    let mut result = Vec::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(sep);
        }
        result.push(*c);
    }

    result.iter().rev().collect()
}
