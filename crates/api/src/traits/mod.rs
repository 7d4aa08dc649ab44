//! Trait definitions for switchcrypt algorithms

pub mod signature;

pub use signature::Signature;
