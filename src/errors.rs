//! Error types.

use std::io;

/// Alias for a `Result` with the crate error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug)]
pub enum Error {
    /// The OS entropy source failed or returned short.
    Entropy {
        /// The underlying I/O failure.
        source: io::Error,
    },
    /// `modinv` was called with non-coprime arguments.
    NotInvertible,
    /// A ciphertext string was not a decimal integer.
    Parse {
        /// What the parser choked on.
        reason: String,
    },
    /// The plaintext encodes to a value at or above the modulus.
    MessageTooLong,
    /// A key factor is not a plausible prime (zero, one, or a duplicate).
    InvalidPrime,
    /// The key's modulus is not the product of its primes.
    InvalidModulus,
    /// The key's exponents do not invert each other.
    InvalidExponent,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Error::Entropy { source } => write!(f, "entropy source error: {}", source),
            Error::NotInvertible => write!(f, "argument has no modular inverse"),
            Error::Parse { reason } => write!(f, "parse error: {}", reason),
            Error::MessageTooLong => write!(f, "message too long for the modulus"),
            Error::InvalidPrime => write!(f, "invalid prime value"),
            Error::InvalidModulus => write!(f, "invalid modulus"),
            Error::InvalidExponent => write!(f, "invalid exponent"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Entropy { source } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(source: io::Error) -> Self {
        Error::Entropy { source }
    }
}
