//! Digital signature traits for switchcrypt
//!
//! This module defines the trait that statically typed signature algorithms
//! implement. Byte-oriented, runtime-selected access goes through the
//! provider objects of the sign crate, which are built on top of it.

use crate::Result;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// Core trait for digital signature algorithms
///
/// Secret keys are opaque, zeroizable types. Implementations expose their
/// fixed encoded sizes so providers can validate caller buffers up front.
pub trait Signature {
    /// Public key type for this algorithm
    type PublicKey: Clone;

    /// Secret key type - must be zeroizable
    type SecretKey: Zeroize + Clone;

    /// Signature data type
    type SignatureData: Clone;

    /// Key pair type (typically a tuple of public and secret keys)
    type KeyPair;

    /// Size of encoded public keys in bytes
    const PUBLIC_KEY_SIZE: usize;

    /// Size of encoded secret keys in bytes
    const SECRET_KEY_SIZE: usize;

    /// Size of encoded signatures in bytes
    const SIGNATURE_SIZE: usize;

    /// Returns the name of this signature algorithm
    fn name() -> &'static str;

    /// Generate a new key pair using the provided RNG
    ///
    /// Implementations must use the provided RNG for all randomness.
    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self::KeyPair>;

    /// Extract the public key from a key pair
    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey;

    /// Extract the secret key from a key pair
    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey;

    /// Sign a message with the given secret key
    fn sign(message: &[u8], secret_key: &Self::SecretKey) -> Result<Self::SignatureData>;

    /// Verify a signature against a message and public key
    ///
    /// Comparison of the recomputed key material must be constant-time.
    fn verify(
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> Result<()>;
}
