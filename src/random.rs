// Secure Random Source
// The two primitives the RSA core draws randomness through

use num_bigint::{BigUint, RandBigInt};
use rand::{CryptoRng, RngCore};

/// Cryptographically secure source of bytes and bounded integers.
pub trait RandomSource {
    /// Fill `buf` with random bytes.
    fn fill_random_bytes(&mut self, buf: &mut [u8]);

    /// Uniform integer in `[0, bound)`. `bound` must be non-zero.
    fn random_below(&mut self, bound: &BigUint) -> BigUint;
}

impl<R: RngCore + CryptoRng + ?Sized> RandomSource for R {
    fn fill_random_bytes(&mut self, buf: &mut [u8]) {
        self.fill_bytes(buf);
    }

    fn random_below(&mut self, bound: &BigUint) -> BigUint {
        self.gen_biguint_below(bound)
    }
}
