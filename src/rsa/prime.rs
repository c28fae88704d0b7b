// Prime Generation
// Miller-Rabin primality test and retry-until-prime searches

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use super::bigint::{mod_pow, RsaBigInt};
use crate::error::{Result, RsaError};
use crate::random::RandomSource;

/// Witness rounds used for a candidate: floor(log2(n)).
///
/// Ties the number of witnesses to the candidate size instead of a fixed
/// security parameter.
pub fn default_rounds(n: &RsaBigInt) -> u32 {
    n.bits().saturating_sub(1) as u32
}

/// Miller-Rabin primality test
/// Returns true if n is probably prime after `rounds` random witnesses
pub fn is_probable_prime<R: RandomSource + ?Sized>(n: &RsaBigInt, rounds: u32, rng: &mut R) -> bool {
    let two = RsaBigInt::from(2u8);
    if n < &two {
        return false;
    }
    if n == &two || n == &RsaBigInt::from(3u8) {
        return true;
    }
    if n.is_even() {
        return false;
    }

    // Write n-1 as d * 2^s with d odd
    let n_minus_one = n - 1u8;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    // Witnesses come from [2, n-2]
    let span = n - 3u8;

    'witness: for _ in 0..rounds {
        let a = rng.random_below(&span) + 2u8;
        let mut x = mod_pow(&a, &d, n);

        if x.is_one() || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
            if x.is_one() {
                return false;
            }
        }

        // Composite
        return false;
    }

    // Probably prime
    true
}

/// Miller-Rabin with the size-derived round count.
pub fn is_prime<R: RandomSource + ?Sized>(n: &RsaBigInt, rng: &mut R) -> bool {
    is_probable_prime(n, default_rounds(n), rng)
}

/// Generate a random prime of exactly `bit_length` bits.
///
/// Loops until a candidate passes; there is no iteration cap.
pub fn random_prime<R: RandomSource + ?Sized>(bit_length: usize, rng: &mut R) -> Result<RsaBigInt> {
    if bit_length < 2 {
        return Err(RsaError::NoPrimeInRange);
    }

    let lower = RsaBigInt::one() << (bit_length - 1);
    let mut candidates = 0u64;

    loop {
        candidates += 1;
        let candidate = &lower + rng.random_below(&lower);
        if is_prime(&candidate, rng) {
            log::trace!("found {bit_length}-bit prime after {candidates} candidates");
            return Ok(candidate);
        }
    }
}

/// Generate a random prime in `[0, max)`.
///
/// Loops until a candidate passes. Fails when `max <= 2`, since no prime lies below it.
pub fn random_prime_below<R: RandomSource + ?Sized>(max: &BigUint, rng: &mut R) -> Result<RsaBigInt> {
    if max <= &BigUint::from(2u8) {
        return Err(RsaError::NoPrimeInRange);
    }

    let mut candidates = 0u64;
    loop {
        candidates += 1;
        let candidate = rng.random_below(max);
        if !candidate.is_zero() && is_prime(&candidate, rng) {
            log::trace!("found prime below {} bits after {candidates} candidates", max.bits());
            return Ok(candidate);
        }
    }
}
