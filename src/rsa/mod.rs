// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod prime;
pub mod keygen;
pub mod encrypt;
pub mod decrypt;
pub mod padding;
pub mod provider;

pub use bigint::{mod_inverse, RsaBigInt};
pub use prime::{is_probable_prime, random_prime, random_prime_below};
pub use keygen::{generate_parameters, KeyParameters, RsaPublicKey};
pub use encrypt::{encrypt_bytes, encrypt_integer};
pub use decrypt::{decrypt_bytes, decrypt_crt, decrypt_direct, decrypt_integer};
pub use padding::PaddingScheme;
pub use provider::RsaProvider;
