//! Lenient conversion of untrusted form values.
//!
//! Every function fails closed: absent, empty or malformed input yields the caller's
//! default instead of an error.

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

pub(crate) fn decimal_or(value: Option<&Value>, default: Decimal) -> Decimal {
    let parsed = match value {
        Some(Value::Number(number)) => Decimal::from_str(&number.to_string())
            .or_else(|_| Decimal::from_scientific(&number.to_string()))
            .ok(),
        Some(Value::String(raw)) => parse_decimal(raw),
        _ => None,
    };
    parsed.unwrap_or(default)
}

/// Same as [`decimal_or`] with negatives clamped to zero.
pub(crate) fn non_negative_decimal_or(value: Option<&Value>, default: Decimal) -> Decimal {
    decimal_or(value, default).max(Decimal::ZERO)
}

pub(crate) fn integer_or(value: Option<&Value>, default: i64) -> i64 {
    let parsed = match value {
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Some(Value::String(raw)) => raw.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.unwrap_or(default)
}

/// Day and person counts: defaults apply on failure, negatives clamp to zero.
pub(crate) fn count_or(value: Option<&Value>, default: u32) -> u32 {
    let raw = integer_or(value, i64::from(default));
    u32::try_from(raw.max(0)).unwrap_or(u32::MAX)
}

pub(crate) fn text_or(value: Option<&Value>, default: &str) -> String {
    let text = match value {
        Some(Value::String(raw)) => raw.trim().to_string(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    };
    if text.is_empty() {
        default.to_string()
    } else {
        text
    }
}

pub(crate) fn flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_i64() == Some(1),
        Some(Value::String(raw)) => matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on" | "是"
        ),
        _ => false,
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}
