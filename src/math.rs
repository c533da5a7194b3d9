//! Modular arithmetic kernel: exponentiation and inversion.

use num_bigint::Sign::Plus;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::errors::{Error, Result};

/// Modular exponentiation: `base^exp mod modulus`.
///
/// Right-to-left square-and-multiply: an accumulator picks up the running
/// square for every set bit of the exponent, and everything is reduced after
/// each multiplication so no intermediate grows past twice the modulus width.
/// The result is always in `[0, modulus)`; a modulus of 1 yields 0.
///
/// # Panics
///
/// Panics if `modulus` is zero.
pub fn powmod(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    assert!(!modulus.is_zero(), "powmod: modulus must be non-zero");
    if modulus.is_one() {
        return BigUint::zero();
    }

    let mut acc = BigUint::one();
    let mut square = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            acc = &acc * &square % modulus;
        }
        exp >>= 1;
        square = &square * &square % modulus;
    }

    acc
}

/// Modular inverse: the unique `x` in `[0, m)` with `a·x ≡ 1 (mod m)`.
///
/// Iterative extended Euclidean algorithm. Only the Bezout coefficient of
/// `a` is tracked; it may go negative along the way, so the bookkeeping runs
/// over signed integers and the result is normalized into `[0, m)` at the
/// end. Fails with [`Error::NotInvertible`] when `gcd(a, m) != 1`.
///
/// # Panics
///
/// Panics if `m` is zero.
pub fn modinv(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    assert!(!m.is_zero(), "modinv: modulus must be non-zero");
    if m.is_one() {
        return Ok(BigUint::one());
    }

    let m0 = BigInt::from_biguint(Plus, m.clone());
    let mut a = BigInt::from_biguint(Plus, a.clone());
    let mut m = BigInt::from_biguint(Plus, m.clone());
    let mut inv = BigInt::one();
    let mut x0 = BigInt::zero();

    while a > BigInt::one() {
        if m.is_zero() {
            // gcd(a, m0) = a > 1
            return Err(Error::NotInvertible);
        }
        let (q, r) = a.div_rem(&m);
        inv -= &q * &x0;
        a = m;
        m = r;
        core::mem::swap(&mut inv, &mut x0);
    }

    if !a.is_one() {
        // Only reachable for a = 0, which divides nothing.
        return Err(Error::NotInvertible);
    }

    if inv.is_negative() {
        inv += &m0;
    }
    Ok(inv
        .to_biguint()
        .expect("inverse normalized into [0, m) is non-negative"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    fn big(n: u64) -> BigUint {
        BigUint::from_u64(n).unwrap()
    }

    #[test]
    fn powmod_known_values() {
        assert_eq!(powmod(&big(1555123), &big(1441), &big(15)), big(13));
        assert_eq!(powmod(&big(2), &big(10), &big(1000)), big(24));
        assert_eq!(powmod(&big(3), &big(4), &big(100)), big(81));
        assert_eq!(powmod(&big(5), &big(0), &big(7)), big(1));
        assert_eq!(powmod(&big(0), &big(0), &big(7)), big(1));
    }

    #[test]
    fn powmod_modulus_one_is_zero() {
        assert_eq!(powmod(&big(42), &big(42), &big(1)), big(0));
    }

    #[test]
    #[should_panic(expected = "modulus must be non-zero")]
    fn powmod_zero_modulus_panics() {
        powmod(&big(2), &big(2), &big(0));
    }

    #[test]
    fn powmod_matches_library_modpow_small() {
        for b in 0..24u64 {
            for e in 0..24u64 {
                for m in 2..24u64 {
                    assert_eq!(
                        powmod(&big(b), &big(e), &big(m)),
                        big(b).modpow(&big(e), &big(m)),
                        "{}^{} mod {}",
                        b,
                        e,
                        m
                    );
                }
            }
        }
    }

    #[test]
    fn powmod_matches_library_modpow_large() {
        let base = BigUint::parse_bytes(
            b"98920366548084643601728869055592650835572950932266967461790948584315647051443",
            10,
        )
        .unwrap();
        let exp = BigUint::parse_bytes(
            b"57896044618658097711785492504343953926634992332820282019728792003956564819949",
            10,
        )
        .unwrap();
        let modulus = BigUint::parse_bytes(
            b"94560208308847015747498523884063394671606671904944666360068158221458669711639",
            10,
        )
        .unwrap();

        assert_eq!(
            powmod(&base, &exp, &modulus),
            base.modpow(&exp, &modulus)
        );
    }

    #[test]
    fn powmod_result_below_modulus() {
        let m = big(97);
        for b in 0..200u64 {
            assert!(powmod(&big(b), &big(65537), &m) < m);
        }
    }

    #[test]
    fn modinv_known_value() {
        assert_eq!(modinv(&big(38), &big(97)).unwrap(), big(23));
    }

    #[test]
    fn modinv_large_modulus() {
        let a = BigUint::parse_bytes(b"1234567", 10).unwrap();
        let m = BigUint::parse_bytes(b"458948883992", 10).unwrap();
        let inv = modinv(&a, &m).unwrap();
        assert_eq!((&a * &inv) % &m, BigUint::one());
    }

    // exhaustive over small moduli, the invertible and non-invertible cases
    #[test]
    fn modinv_exhaustive_small() {
        for n in 2..100u64 {
            let modulus = big(n);
            for x in 1..n {
                let element = big(x);
                let gcd = element.gcd(&modulus);

                match modinv(&element, &modulus) {
                    Ok(inv) => {
                        assert!(gcd.is_one(), "modinv({}, {}) should have failed", x, n);
                        assert!(inv < modulus, "inverse out of range");
                        assert_eq!(
                            (&element * &inv) % &modulus,
                            BigUint::one(),
                            "modinv({}, {}) = {} is wrong",
                            x,
                            n,
                            inv
                        );
                    }
                    Err(Error::NotInvertible) => {
                        assert!(!gcd.is_one(), "modinv({}, {}) should have succeeded", x, n);
                    }
                    Err(err) => panic!("unexpected error: {}", err),
                }
            }
        }
    }

    #[test]
    fn modinv_zero_has_no_inverse() {
        assert!(matches!(
            modinv(&big(0), &big(7)),
            Err(Error::NotInvertible)
        ));
    }

    #[test]
    fn modinv_modulus_one() {
        assert_eq!(modinv(&big(5), &big(1)).unwrap(), big(1));
    }

    #[test]
    #[should_panic(expected = "modulus must be non-zero")]
    fn modinv_zero_modulus_panics() {
        let _ = modinv(&big(2), &big(0));
    }
}
