// RSA Provider
// Session object tying key generation, the codec and padding together

use rand::rngs::ThreadRng;
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};

use super::bigint::{from_bytes, to_bytes, to_bytes_padded};
use super::decrypt::decrypt_integer;
use super::encrypt::{encrypt_bytes, encrypt_integer};
use super::keygen::{generate_parameters, KeyParameters};
use super::padding::PaddingScheme;
use crate::config::RsaConfig;
use crate::error::{Result, RsaError};
use crate::random::RandomSource;

/// An RSA session.
///
/// Owns its random source for its whole lifetime and holds at most one
/// parameter set, which is never mutated once generated.
pub struct RsaProvider<R = ThreadRng, D = Sha256> {
    config: RsaConfig,
    key_size: usize,
    params: Option<KeyParameters>,
    rng: R,
    padding: PaddingScheme<D>,
}

impl RsaProvider {
    /// Session with the default configuration and the thread-local CSPRNG.
    pub fn new() -> Self {
        Self::with_rng(RsaConfig::default(), rand::thread_rng())
    }

    pub fn with_config(config: RsaConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl Default for RsaProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, D> RsaProvider<R, D>
where
    R: RngCore + CryptoRng,
    D: Digest,
{
    pub fn with_rng(config: RsaConfig, rng: R) -> Self {
        Self {
            key_size: config.default_key_size,
            config,
            params: None,
            rng,
            padding: PaddingScheme::new(),
        }
    }

    /// Use an existing parameter set instead of generating one.
    pub fn with_parameters(mut self, params: KeyParameters) -> Self {
        self.key_size = params.modulus().bits() as usize;
        self.params = Some(params);
        self
    }

    /// Generate a fresh parameter set for a `key_size`-bit modulus.
    ///
    /// The size is checked against the configuration before any work starts.
    pub fn initialize_parameters(&mut self, key_size: usize) -> Result<&KeyParameters> {
        self.config.validate(key_size)?;
        log::debug!("generating {key_size}-bit RSA parameters");

        let params = generate_parameters(key_size, &mut self.rng)?;
        self.key_size = key_size;
        Ok(&*self.params.insert(params))
    }

    /// The current parameter set.
    pub fn parameters(&self) -> Result<&KeyParameters> {
        self.params.as_ref().ok_or(RsaError::KeyNotInitialized)
    }

    pub fn key_size(&self) -> usize {
        self.key_size
    }

    pub fn config(&self) -> &RsaConfig {
        &self.config
    }

    /// Digest length used by the padding scheme
    pub fn hash_output_size(&self) -> usize {
        self.padding.hash_len()
    }

    /// Longest plaintext accepted in the given mode.
    ///
    /// Raw mode counts whole bytes that are always below n.
    pub fn max_message_len(&self, use_padding: bool) -> Result<usize> {
        let mod_len = self.parameters()?.modulus_len();
        if use_padding {
            Ok(self.padding.capacity(mod_len).unwrap_or(0))
        } else {
            Ok(mod_len.saturating_sub(1))
        }
    }

    /// Encrypt big-endian plaintext bytes, optionally hash-masked first.
    /// Returns ciphertext as bytes of the modulus length
    pub fn encrypt(&mut self, plaintext: &[u8], use_padding: bool) -> Result<Vec<u8>> {
        let params = self.params.as_ref().ok_or(RsaError::KeyNotInitialized)?;
        if !use_padding {
            return encrypt_bytes(plaintext, params);
        }

        let mod_len = params.modulus_len();
        let mut seed = vec![0u8; self.padding.hash_len()];
        self.rng.fill_random_bytes(&mut seed);

        let block = self.padding.encode(plaintext, &seed, mod_len)?;
        let c = encrypt_integer(&from_bytes(&block), params)?;
        to_bytes_padded(&c, mod_len).ok_or(RsaError::InvalidCiphertext)
    }

    /// Decrypt ciphertext bytes, by CRT unless `direct` is set.
    pub fn decrypt(&self, ciphertext: &[u8], use_padding: bool, direct: bool) -> Result<Vec<u8>> {
        let params = self.parameters()?;
        let m = decrypt_integer(&from_bytes(ciphertext), params, direct)?;
        if !use_padding {
            return Ok(to_bytes(&m));
        }

        let mod_len = params.modulus_len();
        let block = to_bytes_padded(&m, mod_len.saturating_sub(1)).ok_or(RsaError::InvalidCiphertext)?;
        self.padding.decode(&block, mod_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::bigint::from_u64;
    use crate::config::KeySizes;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const TEXT: &[u8] = b"RSA (Rivest-Shamir-Adleman) is a public-key cryptosystem that is widely used for secure data transmission.";

    fn seeded(seed: u64) -> RsaProvider<StdRng> {
        RsaProvider::with_rng(RsaConfig::default(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_not_initialized() {
        let mut rsa = RsaProvider::new();
        assert_eq!(rsa.parameters().err(), Some(RsaError::KeyNotInitialized));
        assert_eq!(rsa.encrypt(b"hi", false), Err(RsaError::KeyNotInitialized));
        assert_eq!(rsa.encrypt(b"hi", true), Err(RsaError::KeyNotInitialized));
        assert_eq!(rsa.decrypt(&[1], false, true), Err(RsaError::KeyNotInitialized));
        assert_eq!(rsa.max_message_len(true), Err(RsaError::KeyNotInitialized));
    }

    #[test]
    fn test_invalid_key_size() {
        let mut rsa = seeded(1);
        assert_eq!(rsa.initialize_parameters(12).err(), Some(RsaError::InvalidKeySize(12)));
        assert_eq!(rsa.initialize_parameters(2048).err(), Some(RsaError::InvalidKeySize(2048)));
        assert!(rsa.parameters().is_err());
        assert_eq!(rsa.key_size(), 256);
    }

    #[test]
    fn test_custom_key_sizes() {
        let config = RsaConfig::default().with_key_sizes(vec![KeySizes::new(128, 0, 0)]);
        let mut rsa: RsaProvider<StdRng> = RsaProvider::with_rng(config, StdRng::seed_from_u64(2));
        assert!(rsa.initialize_parameters(256).is_err());
        assert!(rsa.initialize_parameters(128).is_ok());
        assert_eq!(rsa.key_size(), 128);
    }

    #[test]
    fn test_textbook_session() {
        let params = KeyParameters::from_primes(from_u64(61), from_u64(53), from_u64(17)).unwrap();
        let mut rsa = seeded(3).with_parameters(params);

        let c = rsa.encrypt(&[65], false).unwrap();
        assert_eq!(c, vec![0x0a, 0xe6]);
        assert_eq!(rsa.decrypt(&c, false, true).unwrap(), vec![65]);
        assert_eq!(rsa.decrypt(&c, false, false).unwrap(), vec![65]);

        // Padding needs more room than a 12-bit modulus offers
        assert_eq!(rsa.encrypt(&[65], true), Err(RsaError::PlaintextTooLarge));
    }

    #[test]
    fn test_raw_roundtrip() {
        let mut rsa = seeded(4);
        rsa.initialize_parameters(512).unwrap();
        let len = rsa.max_message_len(false).unwrap();
        assert_eq!(len, 63);

        let message = &TEXT[..len];
        let c = rsa.encrypt(message, false).unwrap();
        assert_eq!(c.len(), 64);
        assert_eq!(rsa.decrypt(&c, false, false).unwrap(), message);
        assert_eq!(rsa.decrypt(&c, false, true).unwrap(), message);
    }

    #[test]
    fn test_padded_roundtrip() {
        let mut rsa = seeded(5);
        rsa.initialize_parameters(1024).unwrap();
        assert_eq!(rsa.hash_output_size(), 32);
        let len = rsa.max_message_len(true).unwrap();
        assert_eq!(len, 95);

        for take in [1, 17, 64, len] {
            let message = &TEXT[..take];
            let c = rsa.encrypt(message, true).unwrap();
            assert_eq!(rsa.decrypt(&c, true, false).unwrap(), message);
            assert_eq!(rsa.decrypt(&c, true, true).unwrap(), message);
        }

        assert_eq!(rsa.encrypt(&TEXT[..len + 1], true), Err(RsaError::PlaintextTooLarge));
    }

    #[test]
    fn test_padded_block_with_leading_zero_byte() {
        let mut rsa = seeded(9);
        rsa.initialize_parameters(512).unwrap();
        let params = rsa.parameters().unwrap().clone();
        let mod_len = params.modulus_len();
        let scheme = PaddingScheme::<Sha256>::new();
        let message = b"leading zero block";

        // Walk seeds until the encoded block starts with 0x00
        let block = (0u64..)
            .map(|i| {
                let mut seed = [0u8; 32];
                seed[..8].copy_from_slice(&i.to_be_bytes());
                scheme.encode(message, &seed, mod_len).unwrap()
            })
            .find(|block| block[0] == 0)
            .unwrap();
        assert_eq!(block.len(), mod_len - 1);

        let c = encrypt_integer(&from_bytes(&block), &params).unwrap();
        let ciphertext = to_bytes_padded(&c, mod_len).unwrap();
        assert_eq!(rsa.decrypt(&ciphertext, true, false).unwrap(), message);
        assert_eq!(rsa.decrypt(&ciphertext, true, true).unwrap(), message);
    }

    #[test]
    fn test_padded_encryption_is_probabilistic() {
        let mut rsa = seeded(6);
        rsa.initialize_parameters(512).unwrap();
        let a = rsa.encrypt(b"Hello, RSA!", true).unwrap();
        let b = rsa.encrypt(b"Hello, RSA!", true).unwrap();
        assert_ne!(a, b);
        assert_eq!(rsa.decrypt(&a, true, false).unwrap(), rsa.decrypt(&b, true, false).unwrap());
    }

    #[test]
    fn test_raw_plaintext_too_large() {
        let mut rsa = seeded(7);
        rsa.initialize_parameters(256).unwrap();
        assert_eq!(rsa.encrypt(&[0xff; 32], false), Err(RsaError::PlaintextTooLarge));
        assert_eq!(rsa.encrypt(&[0x01; 33], false), Err(RsaError::PlaintextTooLarge));
    }

    #[test]
    fn test_parameters_survive_failed_calls() {
        let mut rsa = seeded(8);
        let before = rsa.initialize_parameters(256).unwrap().clone();
        assert!(rsa.encrypt(&[0xff; 64], false).is_err());
        assert!(rsa.initialize_parameters(3).is_err());
        assert_eq!(rsa.parameters().unwrap(), &before);
    }
}
