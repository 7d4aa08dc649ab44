//! Extendable Output Functions (XOF)
//!
//! This module contains the SHAKE extendable output functions and the
//! 4-lane engine that drives four independent XOF sessions in lockstep.

pub mod lanes;
pub mod shake;

// Re-exports
pub use lanes::{LaneXof, OneShot, XofSession};
pub use shake::ShakeSession;

/// Runtime selector between the SHAKE instances
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShakeVariant {
    Shake128,
    Shake256,
}

impl ShakeVariant {
    /// Sponge rate in bytes
    pub const fn rate(self) -> usize {
        match self {
            ShakeVariant::Shake128 => switchcrypt_params::utils::hash::SHAKE128_RATE,
            ShakeVariant::Shake256 => switchcrypt_params::utils::hash::SHAKE256_RATE,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShakeVariant::Shake128 => Shake128Algorithm::ALGORITHM_ID,
            ShakeVariant::Shake256 => Shake256Algorithm::ALGORITHM_ID,
        }
    }
}

/// Type-level constants of a SHAKE instance
pub trait XofAlgorithm {
    /// Algorithm identifier
    const ALGORITHM_ID: &'static str;

    /// Runtime variant tag
    const VARIANT: ShakeVariant;

    /// Algorithm name
    fn name() -> &'static str {
        Self::ALGORITHM_ID
    }
}

/// Type-level constants for SHAKE-128
pub enum Shake128Algorithm {}

impl XofAlgorithm for Shake128Algorithm {
    const ALGORITHM_ID: &'static str = "SHAKE-128";
    const VARIANT: ShakeVariant = ShakeVariant::Shake128;
}

/// Type-level constants for SHAKE-256
pub enum Shake256Algorithm {}

impl XofAlgorithm for Shake256Algorithm {
    const ALGORITHM_ID: &'static str = "SHAKE-256";
    const VARIANT: ShakeVariant = ShakeVariant::Shake256;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_constants() {
        assert_eq!(ShakeVariant::Shake128.rate(), 168);
        assert_eq!(ShakeVariant::Shake256.rate(), 136);
        assert_eq!(Shake256Algorithm::VARIANT, ShakeVariant::Shake256);
        assert_eq!(Shake128Algorithm::name(), "SHAKE-128");
        assert_eq!(ShakeVariant::Shake128.name(), "SHAKE-128");
    }
}
