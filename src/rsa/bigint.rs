// RSA Big Integer Operations
// Wrapper around num-bigint for RSA-specific operations

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::error::{Result, RsaError};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Interpret bytes as an unsigned big-endian integer.
///
/// The high bit of the first byte carries no sign, so no zero byte has to be
/// prepended before conversion.
pub fn from_bytes(bytes: &[u8]) -> RsaBigInt {
    RsaBigInt::from_bytes_be(bytes)
}

/// Convert big integer to its minimal big-endian bytes (`[0]` for zero).
pub fn to_bytes(n: &RsaBigInt) -> Vec<u8> {
    n.to_bytes_be()
}

/// Big-endian bytes left-padded with zeros to exactly `len` bytes.
///
/// Returns `None` if `n` needs more than `len` bytes.
pub fn to_bytes_padded(n: &RsaBigInt, len: usize) -> Option<Vec<u8>> {
    let bytes = if n.is_zero() { Vec::new() } else { n.to_bytes_be() };
    if bytes.len() > len {
        return None;
    }
    let mut result = vec![0u8; len];
    result[len - bytes.len()..].copy_from_slice(&bytes);
    Some(result)
}

/// Byte length of `n` without leading zeros.
pub fn byte_len(n: &RsaBigInt) -> usize {
    ((n.bits() + 7) / 8) as usize
}

/// Modular exponentiation: base^exp mod modulus
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    if modulus.is_one() {
        return RsaBigInt::zero();
    }
    base.modpow(exp, modulus)
}

/// Compute modular inverse: a^(-1) mod m, in `[0, m)`.
///
/// Extended Euclid over the remainders, tracking only the coefficient of `a`.
/// Fails if gcd(a, m) != 1.
pub fn mod_inverse(a: &RsaBigInt, m: &RsaBigInt) -> Result<RsaBigInt> {
    if m.is_zero() {
        return Err(RsaError::ModularInverseUndefined);
    }

    let mut r_old = BigInt::from_biguint(Sign::Plus, m.clone());
    let mut r_new = BigInt::from_biguint(Sign::Plus, a % m);
    let mut d_old = BigInt::zero();
    let mut d_new = BigInt::one();

    while r_new.is_positive() {
        let (t, r) = r_old.div_rem(&r_new);
        r_old = std::mem::replace(&mut r_new, r);
        let d = &d_old - &t * &d_new;
        d_old = std::mem::replace(&mut d_new, d);
    }

    // r_old holds gcd(a, m)
    if !r_old.is_one() {
        return Err(RsaError::ModularInverseUndefined);
    }

    let m = BigInt::from_biguint(Sign::Plus, m.clone());
    d_old
        .mod_floor(&m)
        .to_biguint()
        .ok_or(RsaError::ModularInverseUndefined)
}

/// Greatest common divisor
pub fn gcd(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    a.gcd(b)
}
