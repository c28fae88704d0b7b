//! RSA from first principles: Miller-Rabin prime search, extended-Euclid key
//! derivation, direct and CRT decryption, and a two-round hash-masking padding
//! applied before raw encryption.
//!
//! ```rust,no_run
//! use crypto_rsa::RsaProvider;
//!
//! let mut rsa = RsaProvider::new();
//! rsa.initialize_parameters(512).expect("valid key size");
//!
//! let ciphertext = rsa.encrypt(b"hello", true).expect("message fits");
//! let plaintext = rsa.decrypt(&ciphertext, true, false).expect("decryption");
//! assert_eq!(plaintext, b"hello");
//! ```

pub mod bench;
pub mod config;
pub mod error;
pub mod random;
pub mod rsa;

pub use config::{validate_key_size, KeySizes, RsaConfig};
pub use error::{Result, RsaError};
pub use random::RandomSource;
pub use rsa::{KeyParameters, PaddingScheme, RsaProvider};
