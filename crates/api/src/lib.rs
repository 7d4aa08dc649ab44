//! Public API traits and types for switchcrypt
//!
//! This crate provides the public API surface shared by every switchcrypt
//! crate: the error type, the result alias and the signature trait.

pub mod error;
pub mod traits;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result, ResultExt};
pub use traits::Signature;

// Re-export trait modules for direct access
pub use traits::signature;
