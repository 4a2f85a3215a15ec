//! Command-line argument values.
//!
//! Each positional token after the template becomes one engine argument.
//! A type prefix pins the interpretation; without one, integer and float
//! literals are inferred and everything else is text.

use std::num::{ParseFloatError, ParseIntError};

use quill::Arg;
use thiserror::Error;

/// A token that carried a type prefix but failed to parse.
#[derive(Debug, Error)]
pub enum ValueError {
    #[error("invalid integer literal `{literal}`: {source}")]
    Int {
        literal: String,
        source: ParseIntError,
    },
    #[error("invalid unsigned literal `{literal}`: {source}")]
    Uint {
        literal: String,
        source: ParseIntError,
    },
    #[error("invalid float literal `{literal}`: {source}")]
    Float {
        literal: String,
        source: ParseFloatError,
    },
    #[error("invalid hex byte string `{literal}` (need an even count of hex digits)")]
    HexBytes { literal: String },
}

/// Owned argument value parsed from one CLI token.
#[derive(Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Uint(u64),
    Double(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl Value {
    /// Parse one token.
    ///
    /// Prefixes: `i:` signed, `u:` unsigned, `f:` float, `s:` text,
    /// `x:` hex bytes (for `%k`/`%K`). Unprefixed tokens try `i64`,
    /// then `f64`, then fall back to text.
    pub fn parse(token: &str) -> Result<Self, ValueError> {
        if let Some(rest) = token.strip_prefix("i:") {
            return rest.parse().map(Self::Int).map_err(|source| ValueError::Int {
                literal: rest.to_string(),
                source,
            });
        }
        if let Some(rest) = token.strip_prefix("u:") {
            return rest
                .parse()
                .map(Self::Uint)
                .map_err(|source| ValueError::Uint {
                    literal: rest.to_string(),
                    source,
                });
        }
        if let Some(rest) = token.strip_prefix("f:") {
            return rest
                .parse()
                .map(Self::Double)
                .map_err(|source| ValueError::Float {
                    literal: rest.to_string(),
                    source,
                });
        }
        if let Some(rest) = token.strip_prefix("s:") {
            return Ok(Self::Text(rest.to_string()));
        }
        if let Some(rest) = token.strip_prefix("x:") {
            return parse_hex_bytes(rest).map(Self::Bytes);
        }
        if let Ok(value) = token.parse::<i64>() {
            return Ok(Self::Int(value));
        }
        if let Ok(value) = token.parse::<f64>() {
            return Ok(Self::Double(value));
        }
        Ok(Self::Text(token.to_string()))
    }

    /// Borrow as an engine argument.
    pub fn as_arg(&self) -> Arg<'_> {
        match self {
            Self::Int(value) => Arg::Int(*value),
            Self::Uint(value) => Arg::Uint(*value),
            Self::Double(value) => Arg::Double(*value),
            Self::Text(text) => Arg::Str(text),
            Self::Bytes(bytes) => Arg::Bytes(bytes),
        }
    }
}

fn parse_hex_bytes(text: &str) -> Result<Vec<u8>, ValueError> {
    let digits = text.as_bytes();
    if digits.len() % 2 != 0 {
        return Err(ValueError::HexBytes {
            literal: text.to_string(),
        });
    }
    let mut bytes = Vec::with_capacity(digits.len() / 2);
    for pair in digits.chunks_exact(2) {
        let hi = hex_digit(pair[0]);
        let lo = hex_digit(pair[1]);
        match (hi, lo) {
            (Some(hi), Some(lo)) => bytes.push(hi << 4 | lo),
            _ => {
                return Err(ValueError::HexBytes {
                    literal: text.to_string(),
                })
            }
        }
    }
    Ok(bytes)
}

fn hex_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn inference_order() {
        assert_eq!(Value::parse("28").ok(), Some(Value::Int(28)));
        assert_eq!(Value::parse("-28").ok(), Some(Value::Int(-28)));
        assert_eq!(Value::parse("3.5").ok(), Some(Value::Double(3.5)));
        assert_eq!(
            Value::parse("hello").ok(),
            Some(Value::Text("hello".to_string()))
        );
    }

    #[test]
    fn prefixes_pin_the_type() {
        assert_eq!(Value::parse("u:28").ok(), Some(Value::Uint(28)));
        assert_eq!(Value::parse("s:28").ok(), Some(Value::Text("28".to_string())));
        assert_eq!(
            Value::parse("x:0102b5").ok(),
            Some(Value::Bytes(vec![0x01, 0x02, 0xB5]))
        );
    }

    #[test]
    fn bad_prefixed_literals_error() {
        assert!(Value::parse("i:abc").is_err());
        assert!(Value::parse("u:-1").is_err());
        assert!(Value::parse("f:abc").is_err());
        assert!(Value::parse("x:012").is_err());
        assert!(Value::parse("x:zz").is_err());
    }
}
