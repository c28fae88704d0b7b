// Hash-Masking Padding
// Two-round mask applied to plaintext before raw encryption:
//
//   X = m' XOR H(seed)
//   Y = seed XOR H(X)
//   block = X || Y
//
// m' is the message right-padded with zeros to mod_len - h_len - 1 bytes, so
// the block is one byte shorter than the modulus and always encrypts as an
// integer below n. Decoding strips trailing zeros from m', which means a
// message that itself ends in zero bytes comes back shorter.

use std::marker::PhantomData;

use sha2::{Digest, Sha256};

use crate::error::{Result, RsaError};

/// Padding scheme over the digest `D` (SHA-256 unless overridden).
pub struct PaddingScheme<D = Sha256> {
    _digest: PhantomData<D>,
}

impl<D: Digest> Default for PaddingScheme<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Digest> PaddingScheme<D> {
    pub fn new() -> Self {
        Self { _digest: PhantomData }
    }

    /// Digest output length (hLen)
    pub fn hash_len(&self) -> usize {
        <D as Digest>::output_size()
    }

    /// Largest message that fits a modulus of `mod_len` bytes, if any.
    pub fn capacity(&self, mod_len: usize) -> Option<usize> {
        mod_len.checked_sub(self.hash_len() + 1)
    }

    /// Encode `message` with a caller-supplied `seed` of exactly `hash_len` bytes.
    /// Returns the `mod_len - 1` byte block X || Y
    pub fn encode(&self, message: &[u8], seed: &[u8], mod_len: usize) -> Result<Vec<u8>> {
        if seed.len() != self.hash_len() {
            return Err(RsaError::InvalidSeedLength {
                expected: self.hash_len(),
                actual: seed.len(),
            });
        }

        let m_len = self.capacity(mod_len).ok_or(RsaError::PlaintextTooLarge)?;
        if message.len() > m_len {
            return Err(RsaError::PlaintextTooLarge);
        }

        let mut padded = vec![0u8; m_len];
        padded[..message.len()].copy_from_slice(message);

        let x = xor_prefix(&padded, &D::digest(seed));
        let y = xor_prefix(seed, &D::digest(&x));

        let mut block = x;
        block.extend_from_slice(&y);
        Ok(block)
    }

    /// Recover the message from a `mod_len - 1` byte block.
    pub fn decode(&self, block: &[u8], mod_len: usize) -> Result<Vec<u8>> {
        let m_len = self.capacity(mod_len).ok_or(RsaError::InvalidCiphertext)?;
        if block.len() != m_len + self.hash_len() {
            return Err(RsaError::InvalidCiphertext);
        }

        let (x, y) = block.split_at(m_len);
        let seed = xor_prefix(y, &D::digest(x));
        let mut message = xor_prefix(x, &D::digest(&seed));

        let end = message.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        message.truncate(end);
        Ok(message)
    }
}

/// `a` with its leading bytes XORed against `mask`; bytes past the mask stay as-is.
fn xor_prefix(a: &[u8], mask: &[u8]) -> Vec<u8> {
    let mut result = a.to_vec();
    for (byte, m) in result.iter_mut().zip(mask) {
        *byte ^= m;
    }
    result
}
