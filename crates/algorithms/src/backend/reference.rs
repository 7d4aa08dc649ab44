//! Pure-Rust reference tables
//!
//! SHA-2 runs on [`crate::hash::sha2`] and SHAKE-x4 on [`LaneXof`] over
//! [`ShakeSession`] lanes, which squeeze natively. [`oneshot_shake_x4_callbacks`]
//! wraps the same lanes in [`OneShot`] so the emulated squeeze path can be
//! exercised and compared against the native one.

use super::sha2::{DigestCallbacks, DigestSession, Sha2Callbacks};
use super::shake_x4::{LaneXofCallbacks, LaneXofState, ShakeX4Callbacks};
use crate::error::Result;
use crate::hash::{HashFunction, Sha256, Sha384, Sha512};
use crate::xof::lanes::{LaneXof, OneShot, XofSession, LANES};
use crate::xof::{Shake128Algorithm, Shake256Algorithm, ShakeSession, XofAlgorithm};

/// A reference hasher behind the session interface
struct Sha2Session<H>(H);

impl<H: HashFunction + Send + 'static> DigestSession for Sha2Session<H> {
    fn absorb(&mut self, data: &[u8]) -> Result<()> {
        self.0.update(data)?;
        Ok(())
    }

    fn try_clone(&self) -> Result<Box<dyn DigestSession>> {
        Ok(Box::new(Sha2Session(self.0.clone())))
    }

    fn finalize_into(mut self: Box<Self>, out: &mut [u8]) -> Result<()> {
        let digest = self.0.finalize()?;
        out.copy_from_slice(digest.as_ref());
        Ok(())
    }
}

fn sha2_hash<H: HashFunction>(out: &mut [u8], input: &[u8]) -> Result<()> {
    let digest = H::digest(input)?;
    out.copy_from_slice(digest.as_ref());
    Ok(())
}

fn sha2_init<H: HashFunction + Send + 'static>() -> Result<Box<dyn DigestSession>> {
    Ok(Box::new(Sha2Session(H::new())))
}

fn digest_callbacks<H: HashFunction + Send + 'static>() -> DigestCallbacks {
    DigestCallbacks::with_session(sha2_hash::<H>, sha2_init::<H>)
}

/// SHA-256/384/512 on the built-in implementations
pub fn sha2_callbacks() -> Sha2Callbacks {
    Sha2Callbacks {
        sha256: digest_callbacks::<Sha256>(),
        sha384: digest_callbacks::<Sha384>(),
        sha512: digest_callbacks::<Sha512>(),
    }
}

fn x4_hash<A: XofAlgorithm>(outputs: [&mut [u8]; LANES], inputs: [&[u8]; LANES]) -> Result<()> {
    for (out, input) in outputs.into_iter().zip(inputs) {
        ShakeSession::digest_into(A::VARIANT, input, out)?;
    }
    Ok(())
}

fn x4_init<A: XofAlgorithm, S: XofSession + 'static>() -> Result<Box<dyn LaneXofState>> {
    Ok(Box::new(LaneXof::<S>::new(A::VARIANT)?))
}

fn lane_callbacks<A: XofAlgorithm, S: XofSession + 'static>() -> LaneXofCallbacks {
    LaneXofCallbacks::with_state(x4_hash::<A>, x4_init::<A, S>)
}

/// SHAKE128/256-x4 on natively squeezing lanes
pub fn shake_x4_callbacks() -> ShakeX4Callbacks {
    ShakeX4Callbacks {
        shake128: lane_callbacks::<Shake128Algorithm, ShakeSession>(),
        shake256: lane_callbacks::<Shake256Algorithm, ShakeSession>(),
    }
}

/// SHAKE128/256-x4 on lanes limited to one-shot finalize
pub fn oneshot_shake_x4_callbacks() -> ShakeX4Callbacks {
    ShakeX4Callbacks {
        shake128: lane_callbacks::<Shake128Algorithm, OneShot<ShakeSession>>(),
        shake256: lane_callbacks::<Shake256Algorithm, OneShot<ShakeSession>>(),
    }
}
