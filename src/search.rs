//! Parallel search for probable primes.

use log::debug;
use num_bigint::BigUint;
use rayon::prelude::*;

use crate::codec::numbify;
use crate::entropy::EntropySource;
use crate::errors::Result;
use crate::prime::probably_prime;
use crate::{BATCH_SIZE, KEY_BYTES, MR_ROUNDS};

/// Search until the entropy source yields a probable prime of the canonical
/// [`KEY_BYTES`] width.
pub fn find_prime() -> Result<BigUint> {
    find_prime_with(KEY_BYTES, BATCH_SIZE, MR_ROUNDS)
}

/// Search with an explicit candidate width, batch size and witness count.
///
/// One entropy handle is opened per invocation and drained `key_bytes` at a
/// time by the dispatcher before any testing starts. Each candidate gets its
/// top two bits forced, so the product of two of them never comes up a bit
/// short, and its low bit forced, since an even number this large certainly
/// is not prime.
///
/// A full batch is then fanned out over the rayon pool, one independent
/// primality test per candidate. Nothing is shared during the fan-out and
/// the verdicts are inspected only after the whole batch has joined; among
/// accepted candidates the lowest-indexed one wins, so selection is
/// deterministic for a given batch.
///
/// # Panics
///
/// Panics if `key_bytes` or `batch` is zero.
pub fn find_prime_with(key_bytes: usize, batch: usize, rounds: usize) -> Result<BigUint> {
    assert!(key_bytes > 0, "candidate width must be non-zero");
    assert!(batch > 0, "batch size must be non-zero");

    let mut entropy = EntropySource::open()?;
    let mut block = vec![0u8; key_bytes];
    let mut batches = 0u64;

    loop {
        batches += 1;
        let mut candidates = Vec::with_capacity(batch);
        for _ in 0..batch {
            entropy.read_block(&mut block)?;
            block[0] |= 0b1100_0000;
            block[key_bytes - 1] |= 1;
            candidates.push(numbify(&block));
        }

        let verdicts: Vec<bool> = candidates
            .par_iter()
            .map(|candidate| probably_prime(candidate, rounds))
            .collect();

        if let Some(hit) = verdicts.iter().position(|&accepted| accepted) {
            debug!(
                "{}-bit probable prime found in batch {} at index {}",
                8 * key_bytes,
                batches,
                hit
            );
            return Ok(candidates.swap_remove(hit));
        }
        debug!("batch {} exhausted ({} candidates)", batches, batch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_integer::Integer;

    #[test]
    fn finds_a_probable_prime() {
        let p = find_prime_with(16, 32, 16).unwrap();
        assert!(probably_prime(&p, 40));
    }

    #[test]
    fn candidates_are_full_width_and_odd() {
        for _ in 0..3 {
            let p = find_prime_with(16, 32, 16).unwrap();
            assert_eq!(p.bits(), 128, "top bit not forced");
            assert!(p.is_odd());
            // the second-highest bit is forced too
            assert_eq!((&p >> 126usize).to_bytes_be(), [3]);
        }
    }

    #[test]
    fn respects_candidate_width() {
        let p = find_prime_with(8, 32, 16).unwrap();
        assert_eq!(p.bits(), 64);
    }
}
