// RSA Decryption Implementation
// Direct m = c^d mod n and the Chinese Remainder Theorem (CRT) shortcut

use super::bigint::{from_bytes, mod_pow, to_bytes, RsaBigInt};
use super::keygen::KeyParameters;
use crate::error::{Result, RsaError};

/// Decrypt with one full-size exponentiation: m = c^d mod n
pub fn decrypt_direct(c: &RsaBigInt, key: &KeyParameters) -> RsaBigInt {
    mod_pow(c, key.private_exponent(), key.modulus())
}

/// Decrypt using Chinese Remainder Theorem (CRT)
/// Works mod p and mod q separately and recombines; same result as `decrypt_direct`
pub fn decrypt_crt(c: &RsaBigInt, key: &KeyParameters) -> RsaBigInt {
    let p = key.p();

    // m1 = c^d_p mod p
    let m1 = mod_pow(c, key.d_p(), p);

    // m2 = c^d_q mod q
    let m2 = mod_pow(c, key.d_q(), key.q());

    // h = q_inv * (m1 - m2) mod p, kept non-negative
    let m2_mod_p = &m2 % p;
    let diff = if m1 >= m2_mod_p {
        m1 - m2_mod_p
    } else {
        m1 + p - m2_mod_p
    };
    let h = (diff * key.q_inv()) % p;

    // m = m2 + h * q
    (m2 + h * key.q()) % key.modulus()
}

/// Decrypt a ciphertext integer, which must be below n.
pub fn decrypt_integer(c: &RsaBigInt, key: &KeyParameters, direct: bool) -> Result<RsaBigInt> {
    if c >= key.modulus() {
        return Err(RsaError::InvalidCiphertext);
    }
    Ok(if direct {
        decrypt_direct(c, key)
    } else {
        decrypt_crt(c, key)
    })
}

/// Decrypt big-endian ciphertext bytes.
/// Returns the plaintext integer as minimal big-endian bytes
pub fn decrypt_bytes(ciphertext: &[u8], key: &KeyParameters, direct: bool) -> Result<Vec<u8>> {
    let c = from_bytes(ciphertext);
    let m = decrypt_integer(&c, key, direct)?;
    Ok(to_bytes(&m))
}
