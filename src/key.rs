//! RSA key assembly and the textbook encrypt/decrypt pair.

use log::debug;
use num_bigint::BigUint;
use num_traits::One;
use zeroize::Zeroize;

use crate::codec::{numbify, parse_decimal};
use crate::errors::{Error, Result};
use crate::math::{modinv, powmod};
use crate::search::find_prime_with;
use crate::{BATCH_SIZE, KEY_BYTES, MR_ROUNDS, PUB_EXP};

/// An RSA keypair: two secret primes and the parameters derived from them.
///
/// A key is assembled atomically by [`RsaKey::generate`] and immutable
/// afterwards. The secret members (`p`, `q`, `d`) are wiped when the key is
/// dropped.
///
/// The encryption here is *textbook* RSA: no padding, no blinding, no
/// constant-time guarantees. It demonstrates the arithmetic and nothing more.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKey {
    /// First prime factor.
    p: BigUint,
    /// Second prime factor.
    q: BigUint,
    /// Modulus `p · q`.
    n: BigUint,
    /// Public exponent, always [`PUB_EXP`].
    e: BigUint,
    /// Private exponent `e⁻¹ mod (p-1)(q-1)`.
    d: BigUint,
}

impl Zeroize for RsaKey {
    fn zeroize(&mut self) {
        self.p.zeroize();
        self.q.zeroize();
        self.d.zeroize();
    }
}

impl Drop for RsaKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl RsaKey {
    /// Generate a keypair from two fresh [`KEY_BYTES`]-wide probable primes.
    pub fn generate() -> Result<RsaKey> {
        Self::generate_with(KEY_BYTES)
    }

    /// Generate a keypair whose primes are `key_bytes` wide, for a modulus of
    /// twice that width.
    ///
    /// Two failure modes are handled locally by restarting the prime search:
    /// the searches returning the same prime twice, and a totient that shares
    /// a factor with `e`. Both are vanishingly rare at real sizes. Entropy
    /// failures propagate.
    pub fn generate_with(key_bytes: usize) -> Result<RsaKey> {
        let e = BigUint::from(PUB_EXP);
        loop {
            let p = find_prime_with(key_bytes, BATCH_SIZE, MR_ROUNDS)?;
            let q = find_prime_with(key_bytes, BATCH_SIZE, MR_ROUNDS)?;
            if p == q {
                debug!("prime search returned p == q, retrying");
                continue;
            }

            let n = &p * &q;
            let phi = (&p - BigUint::one()) * (&q - BigUint::one());
            match modinv(&e, &phi) {
                Ok(d) => return Ok(RsaKey { p, q, n, e, d }),
                Err(Error::NotInvertible) => {
                    debug!("e divides phi(n), retrying");
                    continue;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Returns the modulus.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Returns the public exponent.
    pub fn e(&self) -> &BigUint {
        &self.e
    }

    /// Returns the private exponent.
    pub fn d(&self) -> &BigUint {
        &self.d
    }

    /// Returns the first prime factor.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Returns the second prime factor.
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// Returns the modulus size in bytes. Ciphertexts for this key never
    /// exceed this width.
    pub fn size(&self) -> usize {
        (self.n.bits() + 7) / 8
    }

    /// Textbook RSA encryption: `m^e mod n`.
    ///
    /// The caller must uphold `m < n`; see [`RsaKey::encrypt_bytes`] for the
    /// checked byte-string form.
    pub fn encrypt(&self, m: &BigUint) -> BigUint {
        powmod(m, &self.e, &self.n)
    }

    /// Textbook RSA decryption: `c^d mod n`.
    pub fn decrypt(&self, c: &BigUint) -> BigUint {
        powmod(c, &self.d, &self.n)
    }

    /// Encrypt a byte string, returning the ciphertext as a decimal string.
    ///
    /// Fails with [`Error::MessageTooLong`] if the message does not encode
    /// below the modulus.
    pub fn encrypt_bytes(&self, plaintext: &[u8]) -> Result<String> {
        let m = numbify(plaintext);
        if m >= self.n {
            return Err(Error::MessageTooLong);
        }
        Ok(self.encrypt(&m).to_str_radix(10))
    }

    /// Decrypt a decimal ciphertext string back into plaintext bytes.
    ///
    /// Inverts [`RsaKey::encrypt_bytes`] exactly when the plaintext had no
    /// leading zero byte.
    pub fn decrypt_bytes(&self, ciphertext: &str) -> Result<Vec<u8>> {
        let c = parse_decimal(ciphertext)?;
        Ok(self.decrypt(&c).to_bytes_be())
    }

    /// Performs basic sanity checks on the key.
    ///
    /// Verifies that the primes are plausible and distinct, that the modulus
    /// is their product, and that `e·d ≡ 1` modulo both `p-1` and `q-1`,
    /// which is what makes decryption invert encryption.
    pub fn validate(&self) -> Result<()> {
        let one = BigUint::one();
        for prime in [&self.p, &self.q] {
            if *prime <= one {
                return Err(Error::InvalidPrime);
            }
        }
        if self.p == self.q {
            return Err(Error::InvalidPrime);
        }

        if &self.p * &self.q != self.n {
            return Err(Error::InvalidModulus);
        }

        let de = &self.e * &self.d;
        for prime in [&self.p, &self.q] {
            let congruence = &de % (prime - BigUint::one());
            if !congruence.is_one() {
                return Err(Error::InvalidExponent);
            }
        }

        Ok(())
    }
}
