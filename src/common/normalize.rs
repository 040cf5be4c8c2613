//! Repair for strings that arrived mis-decoded.
//!
//! The web client submits UTF-8, but the transport layer it sits on decodes
//! the bytes as Latin-1 before they reach us, so Slovak characters
//! (čďľňšťžáäéíóúô) arrive garbled. Re-encoding the code points as Latin-1
//! bytes and decoding them as UTF-8 restores the original characters.

use serde_json::Value;
use thiserror::Error;

/// Failure to reinterpret a string under the target encoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// A code point above U+00FF cannot have come from a Latin-1 decode.
    #[error("character '{0}' is outside the Latin-1 range")]
    NotLatin1(char),
    /// The recovered byte sequence is not valid UTF-8.
    #[error("recovered bytes are not valid UTF-8")]
    InvalidUtf8,
}

/// Reinterpret `s` as Latin-1 bytes and decode them as UTF-8.
///
/// Pure and deterministic. Fails when `s` could not have been produced by a
/// Latin-1 decode of UTF-8 bytes.
pub fn normalize(s: &str) -> Result<String, NormalizeError> {
    let bytes = s
        .chars()
        .map(|c| {
            let cp = c as u32;
            if cp <= 0xFF {
                Ok(cp as u8)
            } else {
                Err(NormalizeError::NotLatin1(c))
            }
        })
        .collect::<Result<Vec<u8>, _>>()?;

    String::from_utf8(bytes).map_err(|_| NormalizeError::InvalidUtf8)
}

/// Normalize `s`, passing the input through unchanged when it cannot be
/// reinterpreted.
///
/// A string that is already in correct form either round-trips (pure ASCII)
/// or fails re-decoding and falls back to itself, so applying this twice
/// yields the same result as applying it once.
pub fn normalize_or_passthrough(s: &str) -> String {
    match normalize(s) {
        Ok(repaired) => repaired,
        Err(_) => s.to_string(),
    }
}

/// Apply passthrough normalization to every string-valued field of a flat
/// JSON object. Non-string fields and non-object values are left untouched.
pub fn normalize_fields(value: &mut Value) {
    if let Value::Object(map) = value {
        for field in map.values_mut() {
            if let Value::String(s) = field {
                *s = normalize_or_passthrough(s);
            }
        }
    }
}
