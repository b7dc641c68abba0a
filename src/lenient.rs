// Parse-or-default coercion for numeric fields the API sends as strings.
// Malformed values become the type's zero instead of failing the whole decode.
// Every call site names its field so each fallback shows up in the logs on its own.

use rust_decimal::Decimal;
use std::str::FromStr;

// Whole-string parse; integers from the API are either clean or rejected
pub fn parse_or_default<T>(field: &'static str, raw: &str) -> T
where
    T: FromStr + Default,
{
    match raw.parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            tracing::debug!(field, raw, "malformed numeric value, using zero");
            T::default()
        }
    }
}

// Money is scanned, not parsed: leading whitespace is skipped and the longest
// [+-]?digits[.digits] prefix is used, so "12,50" reads as 12 and "9.99 GBP" as 9.99
pub fn decimal_or_default(field: &'static str, raw: &str) -> Decimal {
    let scanned = numeric_prefix(raw);
    let value = scanned
        .as_ref()
        .and_then(|(prefix, _)| Decimal::from_str(prefix).ok());

    match (value, scanned) {
        (Some(value), Some((_, rest))) => {
            if !rest.trim().is_empty() {
                tracing::debug!(field, raw, %value, "decimal read from numeric prefix");
            }
            value
        }
        _ => {
            tracing::debug!(field, raw, "malformed decimal value, using zero");
            Decimal::ZERO
        }
    }
}

// Returns the normalised prefix and whatever text follows it
fn numeric_prefix(raw: &str) -> Option<(String, &str)> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut pos = 0;
    let mut prefix = String::new();

    if let Some(&sign) = bytes.first() {
        if sign == b'+' || sign == b'-' {
            if sign == b'-' {
                prefix.push('-');
            }
            pos += 1;
        }
    }

    let integer_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let integer = &text[integer_start..pos];

    let mut fraction = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let fraction_start = pos + 1;
        let mut end = fraction_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        fraction = &text[fraction_start..end];
        // A bare trailing point belongs to the number only when digits surround it
        if !fraction.is_empty() || !integer.is_empty() {
            pos = end;
        }
    }

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    prefix.push_str(if integer.is_empty() { "0" } else { integer });
    if !fraction.is_empty() {
        prefix.push('.');
        prefix.push_str(fraction);
    }
    Some((prefix, &text[pos..]))
}
