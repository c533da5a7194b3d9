//! Textbook RSA keypair generation built from first principles.
//!
//! This crate exists to show how RSA key generation is actually assembled
//! from arithmetic primitives, layer by layer:
//!
//! * [`EntropySource`]: fixed-width random blocks from the OS.
//! * [`numbify`] / [`denumbify`]: byte strings to big integers and back.
//! * [`powmod`] / [`modinv`]: the modular arithmetic kernel.
//! * [`probably_prime`]: Miller-Rabin with a trial-division prefilter.
//! * [`find_prime`]: batched, parallel search for probable primes.
//! * [`RsaKey`]: key assembly and the raw `m^e mod n` / `c^d mod n` pair.
//!
//! # ⚠️ Not a cryptographic library
//!
//! The RSA exposed here is *textbook* RSA: deterministic, unpadded, and
//! trivially malleable. There is no OAEP, no PKCS#1, no constant-time
//! arithmetic, no key serialization. Use it to learn; never to protect data.
//!
//! # Example
//!
//! ```
//! use rsagen::RsaKey;
//!
//! // 32-byte primes for a quick 512-bit demo key; the canonical width is
//! // rsagen::KEY_BYTES.
//! let key = RsaKey::generate_with(32)?;
//! let ciphertext = key.encrypt_bytes(b"HELLO WORLD")?;
//! assert_eq!(key.decrypt_bytes(&ciphertext)?, b"HELLO WORLD");
//! # Ok::<(), rsagen::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod codec;
mod entropy;
mod errors;
mod key;
mod math;
mod prime;
mod search;

pub use crate::codec::{denumbify, numbify};
pub use crate::entropy::EntropySource;
pub use crate::errors::{Error, Result};
pub use crate::key::RsaKey;
pub use crate::math::{modinv, powmod};
pub use crate::prime::probably_prime;
pub use crate::search::{find_prime, find_prime_with};

/// Width in bytes of a prime candidate; primes come out `8 · KEY_BYTES` bits
/// wide and the modulus twice that.
pub const KEY_BYTES: usize = 128;

/// Number of candidates drawn and tested per parallel batch.
pub const BATCH_SIZE: usize = 100;

/// Miller-Rabin witness count used for key generation; a composite survives
/// with probability at most 4⁻⁴⁰.
pub const MR_ROUNDS: usize = 40;

/// The fixed public exponent, 2¹⁶ + 1.
pub const PUB_EXP: u64 = 65537;
