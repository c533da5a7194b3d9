//! Probabilistic primality testing.

use lazy_static::lazy_static;
use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::rngs::OsRng;

use crate::math::powmod;

/// Exclusive upper bound of the trial-division table.
const TRIAL_DIVISION_BOUND: u32 = 5000;

lazy_static! {
    /// All primes below [`TRIAL_DIVISION_BOUND`], in ascending order.
    static ref SMALL_PRIMES: Vec<u32> = small_primes(TRIAL_DIVISION_BOUND);
}

/// Sieve of Eratosthenes over `[2, bound)`.
fn small_primes(bound: u32) -> Vec<u32> {
    let bound = bound as usize;
    let mut composite = vec![false; bound];
    let mut primes = Vec::new();
    for n in 2..bound {
        if composite[n] {
            continue;
        }
        primes.push(n as u32);
        let mut multiple = n * n;
        while multiple < bound {
            composite[multiple] = true;
            multiple += n;
        }
    }
    primes
}

/// Reports whether `n` is probably prime, applying the Miller-Rabin test
/// with `rounds` randomly chosen witnesses.
///
/// Small inputs are decided exactly: 2, 3 and 5 are prime and everything
/// else below 6 is not. Even numbers and numbers with a factor below 5000
/// are rejected before any witness is drawn, which disposes of the vast
/// majority of random candidates without a single modular exponentiation.
///
/// A composite that survives all rounds slips through with probability at
/// most 4⁻ʳ; the canonical choice of 40 rounds makes that negligible.
/// Witnesses are drawn from the OS random source, so two calls on the same
/// input are independent trials.
pub fn probably_prime(n: &BigUint, rounds: usize) -> bool {
    if n.is_zero() {
        return false;
    }
    if *n < BigUint::from(6u32) {
        return [2u32, 3, 5].iter().any(|&p| *n == BigUint::from(p));
    }
    if n.is_even() {
        return false;
    }

    // The table's own members are prime; any other multiple is not.
    for &p in SMALL_PRIMES.iter().skip(1) {
        if (n % p).is_zero() {
            return *n == BigUint::from(p);
        }
    }

    // n - 1 = 2^r * s with s odd
    let one = BigUint::one();
    let two = BigUint::from(2u32);
    let nm1 = n - &one;
    let r = nm1.trailing_zeros().unwrap();
    let s = &nm1 >> r;

    let nm3 = n - BigUint::from(3u32);
    let mut rng = OsRng;

    'witness: for _ in 0..rounds {
        // uniform witness in [2, n - 2]
        let a = rng.gen_biguint_below(&nm3) + &two;

        let mut x = powmod(&a, &s, n);
        if x == one || x == nm1 {
            continue 'witness;
        }

        for _ in 1..r {
            x = powmod(&x, &two, n);
            if x == one {
                // non-trivial square root of 1
                return false;
            }
            if x == nm1 {
                continue 'witness;
            }
        }

        return false;
    }

    true
}
