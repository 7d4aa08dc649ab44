//! Winternitz one-time signatures over SHAKE
//!
//! WOTS with `w = 16`: the message digest is split into base-16 digits plus
//! a checksum, and each digit selects how far along its hash chain the
//! signature reveals. Verification finishes every chain and compares the
//! hash of the chain ends with the root in the public key.
//!
//! Key layouts:
//! - public key: `pub_seed || root`
//! - secret key: `sk_seed || pub_seed || root`
//! - signature: one `n`-byte chain value per chain
//!
//! Keys are one-time: signing two different messages with the same secret
//! key reveals enough of the chains to forge.
//!
//! Two variants are compiled in. `portable` hashes one chain at a time;
//! `x4` advances four chains in lockstep through the lane XOF engine and is
//! registered as requiring AVX2 (x86_64) or NEON (aarch64). Both produce the
//! same bytes.

use core::marker::PhantomData;

use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use switchcrypt_algorithms::error::Error as PrimitiveError;
use switchcrypt_api::{Result as ApiResult, ResultExt, Signature as SignatureTrait};
use switchcrypt_internal::cpu::HOST_PROBE;
use switchcrypt_internal::{CapabilityProbe, CpuExtension};
use switchcrypt_params::pqc::wots::WotsParams;

use crate::dispatch::{Dispatcher, SelectionPolicy, Variant, VariantOps};
use crate::error::Result;
use crate::provider::SignatureProvider;

mod chain;
mod portable;
#[cfg_attr(
    not(any(target_arch = "x86_64", target_arch = "aarch64")),
    allow(dead_code)
)]
mod x4;

use portable::Portable;
use x4::X4;

/// Byte layout version reported by WOTS providers
pub const ALG_VERSION: &str = "wots-w16-shake-v1";

/// WOTS public key: `pub_seed || root`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WotsPublicKey(pub(crate) Vec<u8>);

/// WOTS secret key: `sk_seed || pub_seed || root`
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WotsSecretKey(pub(crate) Vec<u8>);

/// WOTS signature: the revealed chain values
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WotsSignature(pub(crate) Vec<u8>);

impl AsRef<[u8]> for WotsPublicKey { fn as_ref(&self) -> &[u8] { &self.0 } }
impl AsMut<[u8]> for WotsPublicKey { fn as_mut(&mut self) -> &mut [u8] { &mut self.0 } }
impl AsRef<[u8]> for WotsSecretKey { fn as_ref(&self) -> &[u8] { &self.0 } }
impl AsMut<[u8]> for WotsSecretKey { fn as_mut(&mut self) -> &mut [u8] { &mut self.0 } }
impl AsRef<[u8]> for WotsSignature { fn as_ref(&self) -> &[u8] { &self.0 } }
impl AsMut<[u8]> for WotsSignature { fn as_mut(&mut self) -> &mut [u8] { &mut self.0 } }

impl core::fmt::Debug for WotsSecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("WotsSecretKey").field(&"<redacted>").finish()
    }
}

/// Zero-filled buffer, failing instead of aborting when memory runs out
fn zeroed(len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(PrimitiveError::from)?;
    buf.resize(len, 0);
    Ok(buf)
}

/// WOTS instantiated with parameter set `P`
pub struct Wots<P: WotsParams> {
    _params: PhantomData<P>,
}

impl<P: WotsParams> Wots<P> {
    pub const NAME: &'static str = P::NAME;

    const PORTABLE: &'static Variant = &Variant {
        name: "portable",
        requires: None,
        ops: VariantOps {
            keypair: chain::keypair_from_seed::<P, Portable>,
            sign: chain::sign::<P, Portable>,
            verify: chain::verify::<P, Portable>,
        },
    };

    const ACCELERATED: &'static [Variant] = &[
        #[cfg(target_arch = "x86_64")]
        Variant {
            name: "x4",
            requires: Some(CpuExtension::Avx2),
            ops: VariantOps {
                keypair: chain::keypair_from_seed::<P, X4>,
                sign: chain::sign::<P, X4>,
                verify: chain::verify::<P, X4>,
            },
        },
        #[cfg(target_arch = "aarch64")]
        Variant {
            name: "x4",
            requires: Some(CpuExtension::ArmNeon),
            ops: VariantOps {
                keypair: chain::keypair_from_seed::<P, X4>,
                sign: chain::sign::<P, X4>,
                verify: chain::verify::<P, X4>,
            },
        },
    ];

    /// Provider dispatching between the compiled variants of this parameter
    /// set
    pub fn provider(probe: &'static dyn CapabilityProbe, policy: SelectionPolicy) -> SignatureProvider {
        SignatureProvider::new(
            P::NAME,
            ALG_VERSION,
            P::NIST_LEVEL,
            false,
            P::PUBLIC_KEY_BYTES,
            P::SECRET_KEY_BYTES,
            P::SIGNATURE_SIZE,
            2 * P::N,
            Dispatcher::new(Self::ACCELERATED, Self::PORTABLE, probe, policy),
        )
    }

    fn host_provider() -> SignatureProvider {
        Self::provider(&HOST_PROBE, SelectionPolicy::Auto)
    }
}

impl<P: WotsParams> SignatureTrait for Wots<P> {
    type PublicKey = WotsPublicKey;
    type SecretKey = WotsSecretKey;
    type SignatureData = WotsSignature;
    type KeyPair = (Self::PublicKey, Self::SecretKey);

    const PUBLIC_KEY_SIZE: usize = P::PUBLIC_KEY_BYTES;
    const SECRET_KEY_SIZE: usize = P::SECRET_KEY_BYTES;
    const SIGNATURE_SIZE: usize = P::SIGNATURE_SIZE;

    fn name() -> &'static str {
        P::NAME
    }

    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> ApiResult<Self::KeyPair> {
        let mut public_key = WotsPublicKey(zeroed(P::PUBLIC_KEY_BYTES)?);
        let mut secret_key = WotsSecretKey(zeroed(P::SECRET_KEY_BYTES)?);
        Self::host_provider()
            .keypair(rng, &mut public_key.0, &mut secret_key.0)
            .with_context(P::NAME)?;
        Ok((public_key, secret_key))
    }

    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey {
        keypair.0.clone()
    }

    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey {
        keypair.1.clone()
    }

    fn sign(message: &[u8], secret_key: &Self::SecretKey) -> ApiResult<Self::SignatureData> {
        let mut signature = WotsSignature(zeroed(P::SIGNATURE_SIZE)?);
        Self::host_provider()
            .sign(&mut signature.0, message, &secret_key.0)
            .with_context(P::NAME)?;
        Ok(signature)
    }

    fn verify(
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> ApiResult<()> {
        Self::host_provider()
            .verify(message, &signature.0, &public_key.0)
            .with_context(P::NAME)
    }
}

#[cfg(feature = "sig-wots-128")]
pub type WotsShake128 = Wots<switchcrypt_params::pqc::wots::WotsShake128W16>;
#[cfg(feature = "sig-wots-256")]
pub type WotsShake256 = Wots<switchcrypt_params::pqc::wots::WotsShake256W16>;
