//! Integer and color literal parsing.

use thiserror::Error;

use crate::model::MAX_RGB;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid literal")]
pub struct InvalidLiteral;

/// Parse an optionally signed run of ASCII digits as an `i32`.
///
/// The magnitude is accumulated as a positive value before negation, so
/// `i32::MIN` itself is rejected as an overflow.
pub fn parse_int(token: &str) -> Result<i32, InvalidLiteral> {
    let (negative, digits) = match token.as_bytes().first() {
        Some(b'+') => (false, &token[1..]),
        Some(b'-') => (true, &token[1..]),
        _ => (false, token),
    };
    if digits.is_empty() {
        return Err(InvalidLiteral);
    }

    let mut value: i32 = 0;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            return Err(InvalidLiteral);
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(i32::from(b - b'0')))
            .ok_or(InvalidLiteral)?;
    }

    Ok(if negative { -value } else { value })
}

/// Parse exactly six hex digits as a packed 24-bit RGB value.
pub fn parse_rgb(payload: &str) -> Result<u32, InvalidLiteral> {
    if payload.len() != 6 || !payload.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(InvalidLiteral);
    }
    let rgb = u32::from_str_radix(payload, 16).map_err(|_| InvalidLiteral)?;
    debug_assert!(rgb <= MAX_RGB);
    Ok(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        let test_cases = vec![
            ("0", Ok(0)),
            ("42", Ok(42)),
            ("+42", Ok(42)),
            ("-42", Ok(-42)),
            ("007", Ok(7)),
            ("2147483647", Ok(i32::MAX)),
            ("-2147483647", Ok(-i32::MAX)),
            ("2147483648", Err(InvalidLiteral)),
            ("-2147483648", Err(InvalidLiteral)),
            ("99999999999", Err(InvalidLiteral)),
            ("", Err(InvalidLiteral)),
            ("+", Err(InvalidLiteral)),
            ("-", Err(InvalidLiteral)),
            ("1x", Err(InvalidLiteral)),
            ("--1", Err(InvalidLiteral)),
            (" 1", Err(InvalidLiteral)),
        ];

        for (input, expected) in test_cases {
            assert_eq!(parse_int(input), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_parse_int_inverts_formatting() {
        let samples = [
            i32::MIN + 1,
            -1_000_000_007,
            -65536,
            -1,
            0,
            1,
            9,
            10,
            16384,
            123_456_789,
            i32::MAX - 1,
            i32::MAX,
        ];
        for v in samples {
            assert_eq!(parse_int(&v.to_string()), Ok(v));
        }
        assert_eq!(parse_int(&i32::MIN.to_string()), Err(InvalidLiteral));
    }

    #[test]
    fn test_parse_rgb() {
        let test_cases = vec![
            ("ff0000", Ok(0xff0000)),
            ("000000", Ok(0)),
            ("FFffFF", Ok(MAX_RGB)),
            ("0a0B0c", Ok(0x0a0b0c)),
            ("fff", Err(InvalidLiteral)),
            ("ff00000", Err(InvalidLiteral)),
            ("+fffff", Err(InvalidLiteral)),
            ("gg0000", Err(InvalidLiteral)),
            ("", Err(InvalidLiteral)),
        ];

        for (input, expected) in test_cases {
            assert_eq!(parse_rgb(input), expected, "input {input:?}");
        }
    }
}
