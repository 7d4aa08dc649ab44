//! Tables backed by the RustCrypto `sha2` and `sha3` crates
//!
//! The `sha3` XOF reader is not exposed through a cloneable session, so the
//! SHAKE lanes here only offer one-shot finalize and the 4-lane engine
//! emulates incremental squeezing on top of them.

use ::sha2::Digest;
use ::sha3::digest::{ExtendableOutput, Update};

use super::sha2::{DigestCallbacks, DigestSession, Sha2Callbacks};
use super::shake_x4::{LaneXofCallbacks, LaneXofState, ShakeX4Callbacks};
use crate::error::Result;
use crate::xof::lanes::{LaneXof, XofSession, LANES};
use crate::xof::{Shake128Algorithm, Shake256Algorithm, ShakeVariant, XofAlgorithm};

struct RustCryptoDigest<D>(D);

impl<D: Digest + Clone + Send + 'static> DigestSession for RustCryptoDigest<D> {
    fn absorb(&mut self, data: &[u8]) -> Result<()> {
        Digest::update(&mut self.0, data);
        Ok(())
    }

    fn try_clone(&self) -> Result<Box<dyn DigestSession>> {
        Ok(Box::new(RustCryptoDigest(self.0.clone())))
    }

    fn finalize_into(self: Box<Self>, out: &mut [u8]) -> Result<()> {
        let RustCryptoDigest(inner) = *self;
        out.copy_from_slice(&inner.finalize());
        Ok(())
    }
}

fn digest_hash<D: Digest>(out: &mut [u8], input: &[u8]) -> Result<()> {
    out.copy_from_slice(&D::digest(input));
    Ok(())
}

fn digest_init<D: Digest + Clone + Send + 'static>() -> Result<Box<dyn DigestSession>> {
    Ok(Box::new(RustCryptoDigest(D::new())))
}

fn digest_callbacks<D: Digest + Clone + Send + 'static>() -> DigestCallbacks {
    DigestCallbacks::with_session(digest_hash::<D>, digest_init::<D>)
}

/// SHA-256/384/512 from the `sha2` crate
pub fn sha2_callbacks() -> Sha2Callbacks {
    Sha2Callbacks {
        sha256: digest_callbacks::<::sha2::Sha256>(),
        sha384: digest_callbacks::<::sha2::Sha384>(),
        sha512: digest_callbacks::<::sha2::Sha512>(),
    }
}

/// A `sha3` SHAKE hasher that can only finalize once
#[derive(Clone)]
pub enum RustCryptoShake {
    Shake128(::sha3::Shake128),
    Shake256(::sha3::Shake256),
}

impl XofSession for RustCryptoShake {
    fn open(variant: ShakeVariant) -> Result<Self> {
        Ok(match variant {
            ShakeVariant::Shake128 => RustCryptoShake::Shake128(Default::default()),
            ShakeVariant::Shake256 => RustCryptoShake::Shake256(Default::default()),
        })
    }

    fn absorb(&mut self, data: &[u8]) -> Result<()> {
        match self {
            RustCryptoShake::Shake128(h) => Update::update(h, data),
            RustCryptoShake::Shake256(h) => Update::update(h, data),
        }
        Ok(())
    }

    fn try_clone(&self) -> Result<Self> {
        Ok(self.clone())
    }

    fn finalize_into(self, out: &mut [u8]) -> Result<()> {
        match self {
            RustCryptoShake::Shake128(h) => h.finalize_xof_into(out),
            RustCryptoShake::Shake256(h) => h.finalize_xof_into(out),
        }
        Ok(())
    }
}

fn x4_hash<A: XofAlgorithm>(outputs: [&mut [u8]; LANES], inputs: [&[u8]; LANES]) -> Result<()> {
    for (out, input) in outputs.into_iter().zip(inputs) {
        let mut lane = RustCryptoShake::open(A::VARIANT)?;
        lane.absorb(input)?;
        lane.finalize_into(out)?;
    }
    Ok(())
}

fn x4_init<A: XofAlgorithm>() -> Result<Box<dyn LaneXofState>> {
    Ok(Box::new(LaneXof::<RustCryptoShake>::new(A::VARIANT)?))
}

fn lane_callbacks<A: XofAlgorithm>() -> LaneXofCallbacks {
    LaneXofCallbacks::with_state(x4_hash::<A>, x4_init::<A>)
}

/// SHAKE128/256-x4 from the `sha3` crate, with emulated squeeze
pub fn shake_x4_callbacks() -> ShakeX4Callbacks {
    ShakeX4Callbacks {
        shake128: lane_callbacks::<Shake128Algorithm>(),
        shake256: lane_callbacks::<Shake256Algorithm>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendRegistry;

    fn registries() -> (BackendRegistry, BackendRegistry) {
        let mut theirs = BackendRegistry::new();
        theirs.set_sha2_callbacks(Some(sha2_callbacks()));
        theirs.set_shake_x4_callbacks(Some(shake_x4_callbacks()));
        (BackendRegistry::new(), theirs)
    }

    #[test]
    fn test_matches_reference_tables() {
        let (ours, theirs) = registries();
        let input: &[u8] = b"The quick brown fox jumps over the lazy dog";

        let mut a = [0u8; 64];
        let mut b = [0u8; 64];
        ours.sha512(&mut a, input);
        theirs.sha512(&mut b, input);
        assert_eq!(a, b);

        let mut x = [[0u8; 200]; LANES];
        let mut y = [[0u8; 200]; LANES];
        let [x0, x1, x2, x3] = &mut x;
        ours.try_x4_hash::<Shake256Algorithm>([x0, x1, x2, x3], [input; LANES])
            .unwrap();
        let [y0, y1, y2, y3] = &mut y;
        theirs
            .try_x4_hash::<Shake256Algorithm>([y0, y1, y2, y3], [input; LANES])
            .unwrap();
        assert_eq!(x, y);
    }

    #[test]
    fn test_lanes_are_emulated() {
        let xof = LaneXof::<RustCryptoShake>::new(ShakeVariant::Shake128).unwrap();
        assert!(xof.is_emulated());
    }
}
