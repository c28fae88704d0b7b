// RSA Encryption Implementation
// Raw c = m^e mod n over key parameters

use super::bigint::{from_bytes, mod_pow, to_bytes_padded, RsaBigInt};
use super::keygen::KeyParameters;
use crate::error::{Result, RsaError};

/// Compute c = m^e mod n, requiring m < n.
pub fn encrypt_integer(m: &RsaBigInt, params: &KeyParameters) -> Result<RsaBigInt> {
    let pk = params.public_key();
    if m >= pk.n {
        return Err(RsaError::PlaintextTooLarge);
    }
    Ok(mod_pow(m, pk.e, pk.n))
}

/// Encrypt big-endian plaintext bytes.
/// Returns ciphertext left-padded to the modulus byte length
pub fn encrypt_bytes(plaintext: &[u8], params: &KeyParameters) -> Result<Vec<u8>> {
    let m = from_bytes(plaintext);
    let c = encrypt_integer(&m, params)?;
    // c < n always fits
    to_bytes_padded(&c, params.modulus_len()).ok_or(RsaError::InvalidCiphertext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::bigint::from_u64;

    fn textbook() -> KeyParameters {
        KeyParameters::from_primes(from_u64(61), from_u64(53), from_u64(17)).unwrap()
    }

    #[test]
    fn test_textbook_encrypt() {
        let params = textbook();
        assert_eq!(encrypt_integer(&from_u64(65), &params).unwrap(), from_u64(2790));
        // 2790 = 0x0ae6
        assert_eq!(encrypt_bytes(&[65], &params).unwrap(), vec![0x0a, 0xe6]);
    }

    #[test]
    fn test_encrypt_is_deterministic() {
        let params = textbook();
        let a = encrypt_bytes(&[0x01, 0x02], &params).unwrap();
        let b = encrypt_bytes(&[0x01, 0x02], &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_encrypt_too_large() {
        let params = textbook();
        assert_eq!(encrypt_integer(&from_u64(3233), &params), Err(RsaError::PlaintextTooLarge));
        assert_eq!(encrypt_bytes(&[0xff, 0xff], &params), Err(RsaError::PlaintextTooLarge));
        assert!(encrypt_integer(&from_u64(3232), &params).is_ok());
    }

    #[test]
    fn test_encrypt_fixed_points() {
        let params = textbook();
        assert_eq!(encrypt_integer(&from_u64(0), &params).unwrap(), from_u64(0));
        assert_eq!(encrypt_integer(&from_u64(1), &params).unwrap(), from_u64(1));
        assert_eq!(encrypt_bytes(&[], &params).unwrap(), vec![0, 0]);
    }
}
