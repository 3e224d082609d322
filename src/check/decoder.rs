//! Parameter decoding.
//!
//! # Responsibilities
//! - Split `key=value&key=value` input into segments
//! - Percent-decode names and values (`+` is a space)
//! - Reject malformed escapes instead of passing them through
//!
//! # Design Decisions
//! - Duplicate keys: the last occurrence wins
//! - A segment without `=` or with an empty value is dropped
//! - `url::form_urlencoded` is lenient about bad escapes, so escapes are
//!   checked here before it decodes a segment

use std::collections::HashMap;

use url::form_urlencoded;

use crate::check::error::CheckError;

/// Decoded request parameters, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterMap {
    values: HashMap<String, String>,
}

impl ParameterMap {
    /// Value of a parameter, if present and non-empty.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn insert(&mut self, name: String, value: String) {
        if value.is_empty() {
            return;
        }
        self.values.insert(name, value);
    }
}

/// Decode a raw `application/x-www-form-urlencoded` parameter string.
pub fn decode_params(raw: &[u8]) -> Result<ParameterMap, CheckError> {
    let mut params = ParameterMap::default();

    for segment in raw.split(|&b| b == b'&') {
        if segment.is_empty() {
            continue;
        }
        if !has_valid_escapes(segment) {
            return Err(CheckError::Decode {
                segment: String::from_utf8_lossy(segment).into_owned(),
            });
        }
        // One segment without '&' always yields exactly one pair.
        if let Some((name, value)) = form_urlencoded::parse(segment).next() {
            params.insert(name.into_owned(), value.into_owned());
        }
    }

    Ok(params)
}

/// True when every `%` is followed by two hex digits.
fn has_valid_escapes(segment: &[u8]) -> bool {
    let mut i = 0;
    while i < segment.len() {
        if segment[i] == b'%' {
            match segment.get(i + 1..i + 3) {
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i += 3,
                _ => return false,
            }
        } else {
            i += 1;
        }
    }
    true
}
