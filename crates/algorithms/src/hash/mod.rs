//! Cryptographic hash functions
//!
//! Reference implementations of the SHA-2 family. These back the default
//! SHA-2 backend table and serve as known-answer baselines for other
//! backends.

use crate::error::Result;

pub mod sha2;

pub use sha2::{Sha256, Sha256Algorithm, Sha384, Sha384Algorithm, Sha512, Sha512Algorithm};

/// Type-level constants of a hash algorithm
pub trait HashAlgorithm {
    /// Output size in bytes
    const OUTPUT_SIZE: usize;

    /// Internal block size in bytes
    const BLOCK_SIZE: usize;

    /// Algorithm identifier
    const ALGORITHM_ID: &'static str;

    /// Algorithm name
    fn name() -> &'static str {
        Self::ALGORITHM_ID
    }
}

/// Trait for streaming hash functions
pub trait HashFunction: Clone + Sized {
    /// Algorithm marker carrying the sizes
    type Algorithm: HashAlgorithm;

    /// Digest type
    type Output: AsRef<[u8]> + Copy;

    /// Creates a fresh hashing state
    fn new() -> Self;

    /// Absorbs more input
    fn update(&mut self, data: &[u8]) -> Result<&mut Self>;

    /// Pads, finishes and returns the digest; the state is wiped and restarted
    fn finalize(&mut self) -> Result<Self::Output>;

    /// Output size in bytes
    fn output_size() -> usize {
        <Self::Algorithm as HashAlgorithm>::OUTPUT_SIZE
    }

    /// Block size in bytes
    fn block_size() -> usize {
        <Self::Algorithm as HashAlgorithm>::BLOCK_SIZE
    }

    /// Hash `data` in a single call
    fn digest(data: &[u8]) -> Result<Self::Output> {
        let mut h = Self::new();
        h.update(data)?;
        h.finalize()
    }
}
