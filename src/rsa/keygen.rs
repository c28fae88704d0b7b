// RSA Key Generation
// Produces the immutable RSA key-parameter set

use num_traits::One;

use super::bigint::{byte_len, gcd, mod_inverse, RsaBigInt};
use super::prime::{random_prime, random_prime_below};
use crate::error::{Result, RsaError};
use crate::random::RandomSource;

/// RSA Public Key view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey<'a> {
    pub n: &'a RsaBigInt, // Modulus
    pub e: &'a RsaBigInt, // Public exponent
}

/// Full RSA parameter set, read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyParameters {
    n: RsaBigInt,     // Modulus
    e: RsaBigInt,     // Public exponent
    d: RsaBigInt,     // Private exponent
    p: RsaBigInt,     // First prime factor
    q: RsaBigInt,     // Second prime factor
    d_p: RsaBigInt,   // d mod (p-1)
    d_q: RsaBigInt,   // d mod (q-1)
    q_inv: RsaBigInt, // q^(-1) mod p
}

impl KeyParameters {
    /// Derive the parameter set from two primes and a public exponent.
    ///
    /// Fails if `e` has no inverse mod (p-1)(q-1) or `q` none mod `p`.
    pub fn from_primes(p: RsaBigInt, q: RsaBigInt, e: RsaBigInt) -> Result<Self> {
        let p_minus_1 = &p - 1u8;
        let q_minus_1 = &q - 1u8;
        let lambda = &p_minus_1 * &q_minus_1;

        let d = mod_inverse(&e, &lambda)?;
        let q_inv = mod_inverse(&q, &p)?;
        let d_p = &d % &p_minus_1;
        let d_q = &d % &q_minus_1;

        Ok(Self {
            n: &p * &q,
            e,
            d,
            p,
            q,
            d_p,
            d_q,
            q_inv,
        })
    }

    pub fn modulus(&self) -> &RsaBigInt {
        &self.n
    }

    pub fn public_exponent(&self) -> &RsaBigInt {
        &self.e
    }

    pub fn private_exponent(&self) -> &RsaBigInt {
        &self.d
    }

    pub fn p(&self) -> &RsaBigInt {
        &self.p
    }

    pub fn q(&self) -> &RsaBigInt {
        &self.q
    }

    pub fn d_p(&self) -> &RsaBigInt {
        &self.d_p
    }

    pub fn d_q(&self) -> &RsaBigInt {
        &self.d_q
    }

    pub fn q_inv(&self) -> &RsaBigInt {
        &self.q_inv
    }

    /// (p-1)(q-1)
    pub fn lambda(&self) -> RsaBigInt {
        (&self.p - 1u8) * (&self.q - 1u8)
    }

    /// Byte length of the modulus
    pub fn modulus_len(&self) -> usize {
        byte_len(&self.n)
    }

    pub fn public_key(&self) -> RsaPublicKey<'_> {
        RsaPublicKey {
            n: &self.n,
            e: &self.e,
        }
    }
}

/// Generate RSA key parameters for a modulus of `key_size` bits.
///
/// `key_size` is assumed to be validated already; each prime gets half of it.
pub fn generate_parameters<R: RandomSource + ?Sized>(key_size: usize, rng: &mut R) -> Result<KeyParameters> {
    let prime_bits = key_size / 2;
    // Two-bit primes leave no room for a public exponent below λ
    if prime_bits < 3 {
        return Err(RsaError::InvalidKeySize(key_size));
    }

    // Step 1: Generate two distinct random primes p and q
    let p = random_prime(prime_bits, rng)?;
    let mut q = random_prime(prime_bits, rng)?;
    while q == p {
        q = random_prime(prime_bits, rng)?;
    }
    log::debug!("generated {prime_bits}-bit primes p and q");

    // Step 2: λ = (p-1)(q-1)
    let lambda = (&p - 1u8) * (&q - 1u8);

    // Step 3: e is a random prime below λ that is also coprime to it
    let e = loop {
        let e = random_prime_below(&lambda, rng)?;
        if gcd(&e, &lambda).is_one() {
            break e;
        }
        log::debug!("public exponent candidate {e} divides lambda, retrying");
    };

    // Step 4-6: derive d and the CRT values
    let params = KeyParameters::from_primes(p, q, e)?;
    log::debug!("generated {}-bit modulus", params.modulus().bits());
    Ok(params)
}
