//! Signature providers for switchcrypt
//!
//! Every algorithm here is compiled in several variants, a portable one and
//! zero or more that lean on a CPU extension. A [`SignatureProvider`] hides
//! the choice: it carries the algorithm's metadata and forwards each
//! operation to the variant the [`Dispatcher`] selects for the running CPU.
//!
//! ```no_run
//! use switchcrypt_sign::provider_new;
//!
//! let provider = provider_new("wots-shake128-w16").expect("compiled in");
//! let mut pk = vec![0u8; provider.length_public_key()];
//! let mut sk = vec![0u8; provider.length_secret_key()];
//! provider.keypair(&mut rand::rngs::OsRng, &mut pk, &mut sk)?;
//! # Ok::<(), switchcrypt_sign::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod dispatch;
pub mod error;
pub mod pq;
pub mod provider;

pub use dispatch::{Dispatcher, SelectionPolicy, Variant, VariantOps};
pub use error::{Error, Result};
pub use provider::{provider_new, provider_with_probe, SignatureProvider, ALGORITHMS};

pub use pq::Wots;
#[cfg(feature = "sig-wots-128")]
pub use pq::WotsShake128;
#[cfg(feature = "sig-wots-256")]
pub use pq::WotsShake256;
