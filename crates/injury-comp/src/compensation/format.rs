//! Display formatting for amounts and coefficients.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds half away from zero to two fractional digits.
pub fn round_cents(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Formats an amount with thousands separators and two decimals, e.g. `12,345.68`.
pub fn money(value: Decimal) -> String {
    let rendered = round_cents(value).to_string();
    let (sign, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered.as_str()),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let digits: Vec<char> = integer.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, digit) in digits.iter().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    format!("{sign}{grouped}.{fraction}")
}

/// Formats a coefficient or rate with two decimals and no grouping, e.g. `0.66`.
pub fn fixed2(value: Decimal) -> String {
    round_cents(value).to_string()
}

/// Formats a fraction as a percentage with two decimals, e.g. `0.06` as `6.00%`.
pub fn percent(value: Decimal) -> String {
    format!("{}%", fixed2(value * Decimal::ONE_HUNDRED))
}

/// Parses a string produced by [`money`] back into a decimal.
pub fn parse_money(raw: &str) -> Option<Decimal> {
    raw.trim().replace(',', "").parse().ok()
}
