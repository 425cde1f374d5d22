// src/process/convert.rs
//! Text → number coercion. Empty fields read as zero.

use std::str::FromStr;

use super::{utils::clean_str, Rejection};

/// Whole-number statistic. Negative values are rejected.
pub fn count<T>(column: &'static str, raw: &str) -> Result<T, Rejection>
where
    T: FromStr + Into<i64> + Copy,
{
    let cleaned = clean_str(raw);
    let text = if cleaned.is_empty() { "0" } else { cleaned.as_str() };
    let value: T = text.parse().map_err(|_| Rejection::Coercion {
        column,
        value: raw.to_string(),
        kind: std::any::type_name::<T>(),
    })?;
    let signed: i64 = value.into();
    if signed < 0 {
        return Err(Rejection::Negative {
            column,
            value: signed,
        });
    }
    Ok(value)
}

/// Rate statistic. Accepts a decimal comma and a trailing percent sign.
/// Rates may be negative (hitting percentage is kills minus errors).
pub fn rate(column: &'static str, raw: &str) -> Result<f64, Rejection> {
    let cleaned = clean_str(raw).replace(',', ".");
    let text = cleaned.trim_end_matches('%').trim();
    if text.is_empty() {
        return Ok(0.0);
    }
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Rejection::Coercion {
            column,
            value: raw.to_string(),
            kind: "f64",
        })
}
