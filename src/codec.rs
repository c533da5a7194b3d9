//! Conversion between byte strings and big integers.

use num_bigint::BigUint;

use crate::errors::{Error, Result};

/// Interpret `bytes` as a big-endian unsigned integer.
///
/// An empty slice maps to zero.
pub fn numbify(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Parse a decimal string and emit the minimal big-endian byte form of its
/// value.
///
/// Inverts [`numbify`] exactly when the original byte string had no leading
/// zero byte.
pub fn denumbify(decimal: &str) -> Result<Vec<u8>> {
    Ok(parse_decimal(decimal)?.to_bytes_be())
}

/// Parse a non-negative decimal integer.
pub(crate) fn parse_decimal(decimal: &str) -> Result<BigUint> {
    BigUint::parse_bytes(decimal.as_bytes(), 10).ok_or_else(|| Error::Parse {
        reason: format!("not a decimal integer: {:?}", decimal),
    })
}
