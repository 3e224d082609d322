//! Input validation: `x`, `y`, `r` must all be present finite numbers.

use crate::check::decoder::ParameterMap;
use crate::check::error::ParameterError;

/// Parameters that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedInput {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

/// Extract and parse `x`, `y` and `r`. No range checks; negative `r` is fine.
pub fn validate(params: &ParameterMap) -> Result<ValidatedInput, ParameterError> {
    Ok(ValidatedInput {
        x: coordinate(params, "x")?,
        y: coordinate(params, "y")?,
        r: coordinate(params, "r")?,
    })
}

fn coordinate(params: &ParameterMap, name: &'static str) -> Result<f64, ParameterError> {
    let raw = params.get(name).ok_or(ParameterError::Missing { name })?;
    let malformed = || ParameterError::Malformed {
        name,
        value: raw.to_string(),
    };

    let text = raw.trim();
    if !is_decimal_literal(text) {
        return Err(malformed());
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(malformed()),
    }
}

/// Plain base-10 literal: sign, digits, optional fraction and exponent.
/// Rejects `inf`/`NaN` spellings and separators that `f64::from_str` would
/// otherwise treat specially.
fn is_decimal_literal(text: &str) -> bool {
    let mantissa = match text.find(['e', 'E']) {
        Some(at) => {
            let exponent = text[at + 1..]
                .strip_prefix(['+', '-'])
                .unwrap_or(&text[at + 1..]);
            if exponent.is_empty() || !exponent.bytes().all(|b| b.is_ascii_digit()) {
                return false;
            }
            &text[..at]
        }
        None => text,
    };

    let unsigned = mantissa.strip_prefix(['+', '-']).unwrap_or(mantissa);
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    (!int_part.is_empty() || !frac_part.is_empty())
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && frac_part.bytes().all(|b| b.is_ascii_digit())
}
