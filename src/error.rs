// RSA Errors
// Typed failures reported by key generation, encryption and decryption

/// Errors that can occur during RSA operations.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum RsaError {
    #[error("Invalid key size: {0} bits is not in the configured set")]
    InvalidKeySize(usize),

    #[error("Key parameters have not been initialized")]
    KeyNotInitialized,

    #[error("Plaintext too large for the modulus")]
    PlaintextTooLarge,

    #[error("Modular inverse undefined: gcd(a, m) != 1")]
    ModularInverseUndefined,

    #[error("Ciphertext is invalid for this modulus")]
    InvalidCiphertext,

    #[error("Padding seed must be {expected} bytes, got {actual}")]
    InvalidSeedLength { expected: usize, actual: usize },

    #[error("No prime exists in the requested range")]
    NoPrimeInRange,
}

pub type Result<T> = std::result::Result<T, RsaError>;
