//! Replaceable backend tables
//!
//! A [`BackendRegistry`] holds one operation table per primitive family:
//! [`Sha2Callbacks`] for SHA-256/384/512 and [`ShakeX4Callbacks`] for the
//! 4-lane SHAKE128/256 engine. Every entry of a table is optional. The
//! registry starts out with the pure-Rust reference tables and a table can be
//! swapped wholesale at any time before the registry is shared.
//!
//! Each operation has two forms. The `try_` form returns a [`Result`] and
//! reports a missing entry or empty context as
//! [`Error::BackendUnavailable`](crate::error::Error::BackendUnavailable).
//! The plain form discards the error: a misconfigured table makes the call
//! do nothing.
//!
//! ```
//! use switchcrypt_algorithms::backend::{BackendRegistry, HashContext};
//! use switchcrypt_algorithms::hash::Sha256Algorithm;
//!
//! let registry = BackendRegistry::new();
//! let mut ctx = HashContext::<Sha256Algorithm>::new();
//! registry.try_inc_init(&mut ctx)?;
//! registry.try_inc_absorb(&mut ctx, b"ab")?;
//! let mut digest = [0u8; 32];
//! registry.try_inc_finalize(&mut digest, &mut ctx, b"c")?;
//!
//! let mut oneshot = [0u8; 32];
//! registry.sha256(&mut oneshot, b"abc");
//! assert_eq!(digest, oneshot);
//! # Ok::<(), switchcrypt_algorithms::Error>(())
//! ```
//!
//! [`Result`]: crate::error::Result

pub mod reference;
#[cfg(feature = "rustcrypto")]
pub mod rustcrypto;
pub mod sha2;
pub mod shake_x4;

pub use self::sha2::{DigestCallbacks, DigestSession, HashContext, Sha2Callbacks, Sha2Family};
pub use self::shake_x4::{
    LaneXofCallbacks, LaneXofContext, LaneXofState, ShakeX4Callbacks, ShakeX4Family,
};

/// Active operation tables, one per primitive family
///
/// Installing a table needs `&mut self` while dispatch needs `&self`, so all
/// installs happen before the registry is shared with readers.
#[derive(Clone, Copy, Debug)]
pub struct BackendRegistry {
    sha2: Sha2Callbacks,
    shake_x4: ShakeX4Callbacks,
}

impl Default for BackendRegistry {
    fn default() -> Self {
        BackendRegistry {
            sha2: reference::sha2_callbacks(),
            shake_x4: reference::shake_x4_callbacks(),
        }
    }
}

impl BackendRegistry {
    /// A registry with the reference tables installed
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry whose tables have every entry absent
    pub fn empty() -> Self {
        BackendRegistry {
            sha2: Sha2Callbacks::EMPTY,
            shake_x4: ShakeX4Callbacks::EMPTY,
        }
    }

    /// Replaces the SHA-2 table; `None` leaves the active table in place
    pub fn set_sha2_callbacks(&mut self, table: Option<Sha2Callbacks>) {
        match table {
            Some(table) => {
                tracing::debug!(
                    sha256 = table.sha256.is_complete(),
                    sha384 = table.sha384.is_complete(),
                    sha512 = table.sha512.is_complete(),
                    "installed sha2 backend table"
                );
                self.sha2 = table;
            }
            None => tracing::debug!("ignored empty sha2 backend install"),
        }
    }

    /// Replaces the SHAKE-x4 table; `None` leaves the active table in place
    pub fn set_shake_x4_callbacks(&mut self, table: Option<ShakeX4Callbacks>) {
        match table {
            Some(table) => {
                tracing::debug!(
                    shake128 = table.shake128.is_complete(),
                    shake256 = table.shake256.is_complete(),
                    "installed shake x4 backend table"
                );
                self.shake_x4 = table;
            }
            None => tracing::debug!("ignored empty shake x4 backend install"),
        }
    }

    /// The active SHA-2 table
    pub fn sha2_callbacks(&self) -> &Sha2Callbacks {
        &self.sha2
    }

    /// The active SHAKE-x4 table
    pub fn shake_x4_callbacks(&self) -> &ShakeX4Callbacks {
        &self.shake_x4
    }
}
