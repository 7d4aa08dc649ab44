//! # switchcrypt
//!
//! A backend-agnostic layer over SHA-2, 4-lane SHAKE and signature
//! algorithms. Callers program against one API; the computation is done by
//! whichever backend table is installed in a [`BackendRegistry`], or by
//! whichever signature variant the running CPU supports.
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! switchcrypt = "0.3"
//! ```
//!
//! ```
//! use switchcrypt::prelude::*;
//!
//! let registry = BackendRegistry::new();
//! let mut digest = [0u8; 32];
//! registry.try_sha256(&mut digest, b"abc")?;
//! # Ok::<(), switchcrypt::algorithms::Error>(())
//! ```
//!
//! ## Features
//!
//! - `std` (default): standard library support
//! - `sign` (default): signature providers and variant dispatch
//! - `rustcrypto`: backend tables built on the RustCrypto `sha2`/`sha3` crates
//! - `sig-wots-256`: the SHAKE256 WOTS parameter set
//! - `full`: all of the above
//!
//! ## Crate Structure
//!
//! - [`api`]: error type and the `Signature` trait
//! - [`internal`]: CPU capability probing and constant-time helpers
//! - [`params`]: sizes and parameter sets
//! - [`algorithms`]: reference primitives, the lane XOF engine and the
//!   backend registry
//! - `sign`: signature providers

#![forbid(unsafe_code)]

pub use switchcrypt_algorithms as algorithms;
pub use switchcrypt_api as api;
pub use switchcrypt_internal as internal;
pub use switchcrypt_params as params;

#[cfg(feature = "sign")]
pub use switchcrypt_sign as sign;

pub use switchcrypt_algorithms::BackendRegistry;

/// Common imports for switchcrypt users
pub mod prelude {
    pub use crate::api::{Error, Result, ResultExt, Signature};

    pub use crate::algorithms::backend::{
        BackendRegistry, HashContext, LaneXofContext, Sha2Callbacks, ShakeX4Callbacks,
    };
    pub use crate::algorithms::hash::{Sha256Algorithm, Sha384Algorithm, Sha512Algorithm};
    pub use crate::algorithms::xof::{Shake128Algorithm, Shake256Algorithm};

    pub use crate::internal::{CapabilityProbe, CpuExtension, HostProbe, StaticProbe};

    #[cfg(feature = "sign")]
    pub use crate::sign::{provider_new, SelectionPolicy, SignatureProvider};
}
