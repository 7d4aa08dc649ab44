//! Primitives and backend dispatch for switchcrypt
//!
//! This crate holds the pure-Rust reference SHA-2 and SHAKE implementations,
//! the [`LaneXof`] engine that runs four SHAKE sessions in lockstep, and the
//! [`BackendRegistry`] through which callers reach whichever backend table is
//! installed.

#![forbid(unsafe_code)]

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Hash function implementations
pub mod hash;
pub use hash::{HashAlgorithm, HashFunction, Sha256, Sha384, Sha512};

// XOF implementations and the lane engine
pub mod xof;
pub use xof::{LaneXof, OneShot, ShakeSession, ShakeVariant, XofAlgorithm, XofSession};

// Replaceable backend tables
pub mod backend;
pub use backend::{BackendRegistry, HashContext, LaneXofContext};
