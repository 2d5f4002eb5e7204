// ABOUTME: Base62 codec mapping numeric recipe ids to compact short-link codes
// ABOUTME: Pure functions, no storage or network dependencies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

//! Short-link codec
//!
//! Recipes are addressable through compact base62 codes derived from their
//! numeric identifiers. Encoding is repeated division over a fixed alphabet
//! (digits, then lowercase, then uppercase); decoding is the inverse
//! positional-value summation. `decode(encode(n)) == n` for every `u64`.

use crate::errors::{AppError, AppResult};

/// Fixed 62-character alphabet: digits, lowercase, uppercase.
const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const BASE: u64 = 62;

/// Encode a numeric identifier as a base62 short code.
///
/// Zero encodes to `"0"`, a single character, never an empty string.
#[must_use]
pub fn encode(id: u64) -> String {
    if id == 0 {
        return char::from(ALPHABET[0]).to_string();
    }

    let mut digits = Vec::new();
    let mut num = id;
    while num > 0 {
        let rem = (num % BASE) as usize;
        digits.push(ALPHABET[rem]);
        num /= BASE;
    }
    digits.reverse();

    // Safe: digits only ever holds alphabet bytes, which are ASCII
    String::from_utf8(digits).unwrap_or_default()
}

/// Decode a base62 short code back into a numeric identifier.
///
/// # Errors
///
/// Returns `InvalidEncoding` if the code is empty, contains a character
/// outside the alphabet, or overflows a `u64`.
pub fn decode(code: &str) -> AppResult<u64> {
    if code.is_empty() {
        return Err(AppError::invalid_encoding("Short code is empty"));
    }

    let mut acc: u64 = 0;
    for ch in code.chars() {
        let index = alphabet_index(ch)
            .ok_or_else(|| AppError::invalid_encoding(format!("Invalid character {ch:?}")))?;
        acc = acc
            .checked_mul(BASE)
            .and_then(|v| v.checked_add(index))
            .ok_or_else(|| AppError::invalid_encoding("Short code out of range"))?;
    }
    Ok(acc)
}

fn alphabet_index(ch: char) -> Option<u64> {
    match ch {
        '0'..='9' => Some(ch as u64 - '0' as u64),
        'a'..='z' => Some(ch as u64 - 'a' as u64 + 10),
        'A'..='Z' => Some(ch as u64 - 'A' as u64 + 36),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_encodes_to_single_character() {
        assert_eq!(encode(0), "0");
        assert_eq!(decode("0").unwrap(), 0);
    }

    #[test]
    fn test_round_trip() {
        for n in [1, 61, 62, 63, 3843, 3844, 123_456_789, u64::MAX] {
            assert_eq!(decode(&encode(n)).unwrap(), n, "round trip failed for {n}");
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(encode(61), "Z");
        assert_eq!(encode(62), "10");
        assert_eq!(encode(10), "a");
        assert_eq!(encode(36), "A");
    }

    #[test]
    fn test_decode_rejects_out_of_alphabet() {
        assert!(decode("abc-def").is_err());
        assert!(decode("héllo").is_err());
        assert!(decode(" ").is_err());
    }

    #[test]
    fn test_decode_rejects_empty() {
        assert!(decode("").is_err());
    }

    #[test]
    fn test_decode_rejects_overflow() {
        // Longer than any valid u64 encoding (11 base62 digits max)
        assert!(decode("ZZZZZZZZZZZZZZZ").is_err());
    }
}
