//! Signature providers
//!
//! A [`SignatureProvider`] is the byte-oriented face of one algorithm: fixed
//! metadata plus keypair, sign and verify on caller buffers. The operations
//! go through a [`Dispatcher`], so every call runs on whichever compiled
//! variant the running CPU and the selection policy allow.

use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use switchcrypt_internal::cpu::HOST_PROBE;
use switchcrypt_internal::CapabilityProbe;

use crate::dispatch::{Dispatcher, SelectionPolicy};
use crate::error::{Error, Result};

/// Longest seed any provider asks for
const MAX_SEED: usize = 64;

/// Names accepted by [`provider_new`] in this build
pub const ALGORITHMS: &[&str] = &[
    #[cfg(feature = "sig-wots-128")]
    "wots-shake128-w16",
    #[cfg(feature = "sig-wots-256")]
    "wots-shake256-w16",
];

/// Metadata and dispatched operations of one signature algorithm
#[derive(Clone, Debug)]
pub struct SignatureProvider {
    method_name: &'static str,
    alg_version: &'static str,
    claimed_nist_level: u8,
    euf_cma: bool,
    length_public_key: usize,
    length_secret_key: usize,
    length_signature: usize,
    length_seed: usize,
    dispatcher: Dispatcher,
}

impl SignatureProvider {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        method_name: &'static str,
        alg_version: &'static str,
        claimed_nist_level: u8,
        euf_cma: bool,
        length_public_key: usize,
        length_secret_key: usize,
        length_signature: usize,
        length_seed: usize,
        dispatcher: Dispatcher,
    ) -> Self {
        debug_assert!(length_seed <= MAX_SEED);
        SignatureProvider {
            method_name,
            alg_version,
            claimed_nist_level,
            euf_cma,
            length_public_key,
            length_secret_key,
            length_signature,
            length_seed,
            dispatcher,
        }
    }

    pub fn method_name(&self) -> &'static str {
        self.method_name
    }

    /// Version of the byte layout, bumped whenever keys or signatures change
    pub fn alg_version(&self) -> &'static str {
        self.alg_version
    }

    pub fn claimed_nist_level(&self) -> u8 {
        self.claimed_nist_level
    }

    /// Whether the scheme is existentially unforgeable under chosen-message
    /// attack
    pub fn euf_cma(&self) -> bool {
        self.euf_cma
    }

    pub fn length_public_key(&self) -> usize {
        self.length_public_key
    }

    pub fn length_secret_key(&self) -> usize {
        self.length_secret_key
    }

    pub fn length_signature(&self) -> usize {
        self.length_signature
    }

    pub fn length_seed(&self) -> usize {
        self.length_seed
    }

    /// Name of the variant the next operation will run on
    pub fn selected_variant(&self) -> &'static str {
        self.dispatcher.select().name
    }

    /// Every compiled-in variant, portable last
    pub fn variant_names(&self) -> Vec<&'static str> {
        self.dispatcher.variant_names().collect()
    }

    /// Generates a key pair into `public_key` and `secret_key`
    pub fn keypair<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
        public_key: &mut [u8],
        secret_key: &mut [u8],
    ) -> Result<()> {
        let mut seed = Zeroizing::new([0u8; MAX_SEED]);
        rng.try_fill_bytes(&mut seed[..self.length_seed])?;
        self.keypair_from_seed(&seed[..self.length_seed], public_key, secret_key)
    }

    /// Derives a key pair from `length_seed()` bytes of seed material
    pub fn keypair_from_seed(
        &self,
        seed: &[u8],
        public_key: &mut [u8],
        secret_key: &mut [u8],
    ) -> Result<()> {
        if seed.len() != self.length_seed {
            return Err(Error::InvalidParameter(format!(
                "{} seed must be {} bytes, got {}",
                self.method_name,
                self.length_seed,
                seed.len()
            )));
        }
        check_key(self.length_public_key, public_key.len())?;
        check_key(self.length_secret_key, secret_key.len())?;

        self.dispatcher
            .keypair(seed, public_key, secret_key)
            .map_err(|err| match err {
                Error::Primitive(inner) => Error::KeyGeneration {
                    algorithm: self.method_name,
                    details: inner.to_string(),
                },
                other => other,
            })
    }

    pub fn sign(&self, signature: &mut [u8], message: &[u8], secret_key: &[u8]) -> Result<()> {
        check_key(self.length_secret_key, secret_key.len())?;
        check_signature(self.length_signature, signature.len())?;
        self.dispatcher.sign(signature, message, secret_key)
    }

    /// `Ok(())` only if `signature` is valid for `message` under `public_key`
    pub fn verify(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> Result<()> {
        check_key(self.length_public_key, public_key.len())?;
        check_signature(self.length_signature, signature.len())?;
        self.dispatcher.verify(message, signature, public_key)
    }
}

fn check_key(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::InvalidKeySize { expected, actual });
    }
    Ok(())
}

fn check_signature(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::InvalidSignatureSize { expected, actual });
    }
    Ok(())
}

/// Provider for `name` on the host CPU, honouring `SWITCHCRYPT_SIG_VARIANT`
///
/// Returns `None` when the algorithm is unknown or compiled out.
pub fn provider_new(name: &str) -> Option<SignatureProvider> {
    provider_with_probe(name, &HOST_PROBE, SelectionPolicy::from_env())
}

/// Provider for `name` with an explicit probe and policy
#[cfg_attr(
    not(any(feature = "sig-wots-128", feature = "sig-wots-256")),
    allow(unused_variables)
)]
pub fn provider_with_probe(
    name: &str,
    probe: &'static dyn CapabilityProbe,
    policy: SelectionPolicy,
) -> Option<SignatureProvider> {
    #[cfg(feature = "sig-wots-128")]
    if name == crate::pq::WotsShake128::NAME {
        return Some(crate::pq::WotsShake128::provider(probe, policy));
    }
    #[cfg(feature = "sig-wots-256")]
    if name == crate::pq::WotsShake256::NAME {
        return Some(crate::pq::WotsShake256::provider(probe, policy));
    }

    tracing::debug!(algorithm = name, "signature algorithm not available in this build");
    None
}
