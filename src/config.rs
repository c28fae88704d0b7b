// RSA Configuration
// Allowed key sizes and session defaults

use serde::{Deserialize, Serialize};

use crate::error::{Result, RsaError};

/// A range of legal key sizes in bits.
///
/// `skip == 0` means the range holds `min` only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySizes {
    pub min: usize,
    pub max: usize,
    pub skip: usize,
}

impl KeySizes {
    pub const fn new(min: usize, max: usize, skip: usize) -> Self {
        Self { min, max, skip }
    }

    /// Whether `bits` is one of the sizes this range describes.
    pub fn contains(&self, bits: usize) -> bool {
        if self.skip == 0 {
            return bits == self.min;
        }
        bits >= self.min && bits <= self.max && (bits - self.min) % self.skip == 0
    }
}

/// Configuration for an RSA session
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RsaConfig {
    pub key_sizes: Vec<KeySizes>,
    pub default_key_size: usize,
}

impl Default for RsaConfig {
    fn default() -> Self {
        Self {
            key_sizes: vec![KeySizes::new(8, 1024, 8)],
            default_key_size: 256,
        }
    }
}

impl RsaConfig {
    pub fn with_key_sizes(mut self, key_sizes: Vec<KeySizes>) -> Self {
        self.key_sizes = key_sizes;
        self
    }

    pub fn with_default_key_size(mut self, bits: usize) -> Self {
        self.default_key_size = bits;
        self
    }

    /// Check `bits` against this configuration's allowed sizes.
    pub fn validate(&self, bits: usize) -> Result<usize> {
        validate_key_size(bits, &self.key_sizes)
    }
}

/// Returns `bits` unchanged if any range in `allowed` contains it.
pub fn validate_key_size(bits: usize, allowed: &[KeySizes]) -> Result<usize> {
    if allowed.iter().any(|range| range.contains(bits)) {
        Ok(bits)
    } else {
        Err(RsaError::InvalidKeySize(bits))
    }
}
