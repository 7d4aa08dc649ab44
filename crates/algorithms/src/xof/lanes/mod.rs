//! Four-lane XOF engine
//!
//! [`LaneXof`] drives four independent XOF sessions of one SHAKE variant as a
//! single unit: four equal-length inputs are absorbed in lockstep and four
//! equal-length outputs are squeezed in lockstep.
//!
//! Sessions come in two kinds. Some can squeeze incrementally; for those the
//! engine simply forwards each squeeze to every lane. Others only offer a
//! one-shot "finalize to exactly K bytes". For those the engine emulates
//! incremental squeezing: the lanes keep their pristine absorbed state, and
//! every squeeze clones each lane, finalizes the clone to
//! `total_squeezed + outlen` bytes and copies out the trailing window.
//! Output is identical to native squeezing, but each call costs
//! O(total bytes squeezed so far) per lane.

use zeroize::Zeroizing;

use super::ShakeVariant;
use crate::error::{validate, Error, Result};
use switchcrypt_params::utils::hash::XOF_LANES;

/// Number of lanes driven by [`LaneXof`]
pub const LANES: usize = XOF_LANES;

/// A single XOF session as provided by a backend
pub trait XofSession: Sized + Send {
    /// Opens a fresh session of the given variant
    fn open(variant: ShakeVariant) -> Result<Self>;

    /// Absorbs more input
    fn absorb(&mut self, data: &[u8]) -> Result<()>;

    /// Duplicates the session, including everything absorbed so far
    fn try_clone(&self) -> Result<Self>;

    /// Pads the absorbed input and emits exactly `out.len()` bytes from the
    /// start of the output stream, consuming the session
    fn finalize_into(self, out: &mut [u8]) -> Result<()>;

    /// Whether [`XofSession::squeeze`] continues the output stream
    fn supports_incremental_squeeze(&self) -> bool {
        false
    }

    /// Emits the next `out.len()` bytes of the output stream
    fn squeeze(&mut self, _out: &mut [u8]) -> Result<()> {
        Err(Error::NotImplemented {
            feature: "incremental squeeze",
        })
    }
}

/// Adapter hiding a session's native squeeze, leaving only one-shot finalize
///
/// Lets any session run through the emulation path of [`LaneXof`].
#[derive(Clone, Debug)]
pub struct OneShot<S>(pub S);

impl<S: XofSession> XofSession for OneShot<S> {
    fn open(variant: ShakeVariant) -> Result<Self> {
        S::open(variant).map(OneShot)
    }

    fn absorb(&mut self, data: &[u8]) -> Result<()> {
        self.0.absorb(data)
    }

    fn try_clone(&self) -> Result<Self> {
        self.0.try_clone().map(OneShot)
    }

    fn finalize_into(self, out: &mut [u8]) -> Result<()> {
        self.0.finalize_into(out)
    }
}

/// Build one value per lane, stopping at the first failure
///
/// Values already built for earlier lanes are dropped on failure, which
/// releases their sessions.
fn try_lanes<T>(mut f: impl FnMut(usize) -> Result<T>) -> Result<[T; LANES]> {
    Ok([f(0)?, f(1)?, f(2)?, f(3)?])
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Absorbing,
    Squeezing,
    /// A lane failed part-way through an absorb or native squeeze
    Poisoned,
}

/// Four XOF lanes of one variant, operated in lockstep
pub struct LaneXof<S: XofSession> {
    lanes: [S; LANES],
    variant: ShakeVariant,
    total_squeezed: usize,
    phase: Phase,
}

impl<S: XofSession> LaneXof<S> {
    /// Opens four fresh lanes
    ///
    /// Either all four sessions are opened or none remain.
    pub fn new(variant: ShakeVariant) -> Result<Self> {
        let lanes = try_lanes(|lane| {
            S::open(variant).map_err(|e| {
                tracing::warn!(lane, variant = variant.name(), error = %e, "lane init failed");
                e
            })
        })?;
        Ok(LaneXof {
            lanes,
            variant,
            total_squeezed: 0,
            phase: Phase::Absorbing,
        })
    }

    pub fn variant(&self) -> ShakeVariant {
        self.variant
    }

    /// Bytes already emitted per lane
    pub fn total_squeezed(&self) -> usize {
        self.total_squeezed
    }

    /// Whether squeezing runs through the one-shot emulation path
    pub fn is_emulated(&self) -> bool {
        !self.lanes[0].supports_incremental_squeeze()
    }

    /// Absorbs one input per lane; all inputs must have the same length
    pub fn absorb(&mut self, inputs: [&[u8]; LANES]) -> Result<()> {
        validate::equal_lengths("lane input", &inputs.map(<[u8]>::len))?;
        match self.phase {
            Phase::Absorbing => {}
            Phase::Squeezing => {
                return Err(Error::Processing {
                    operation: "lane absorb",
                    details: "Cannot update after squeezing has begun",
                })
            }
            Phase::Poisoned => return Err(poisoned("lane absorb")),
        }

        for (lane, (session, input)) in self.lanes.iter_mut().zip(inputs).enumerate() {
            if let Err(e) = session.absorb(input) {
                tracing::warn!(lane, error = %e, "lane absorb failed");
                self.phase = Phase::Poisoned;
                return Err(e);
            }
        }
        Ok(())
    }

    /// Marks the end of absorption
    ///
    /// Sponge padding is deferred to the first squeeze, so this does nothing.
    pub fn finalize(&mut self) -> Result<()> {
        Ok(())
    }

    /// Emits the next `outlen` bytes of every lane, continuing from the
    /// previous squeeze; all outputs must have the same length
    ///
    /// On the emulation path a failure emits nothing and leaves the context
    /// exactly as it was.
    pub fn squeeze(&mut self, outputs: [&mut [u8]; LANES]) -> Result<()> {
        let lengths = [
            outputs[0].len(),
            outputs[1].len(),
            outputs[2].len(),
            outputs[3].len(),
        ];
        validate::equal_lengths("lane output", &lengths)?;
        if self.phase == Phase::Poisoned {
            return Err(poisoned("lane squeeze"));
        }
        let outlen = lengths[0];
        if outlen == 0 {
            return Ok(());
        }
        let end = self
            .total_squeezed
            .checked_add(outlen)
            .ok_or_else(|| Error::param("outlen", "total squeezed length overflows"))?;

        if self.is_emulated() {
            let windows = try_lanes(|lane| {
                self.emulate_lane(lane, end).map_err(|e| {
                    tracing::warn!(lane, squeezed = self.total_squeezed, error = %e, "lane squeeze failed");
                    e
                })
            })?;
            for (out, window) in outputs.into_iter().zip(windows.iter()) {
                out.copy_from_slice(window);
            }
        } else {
            for (lane, (session, out)) in self.lanes.iter_mut().zip(outputs).enumerate() {
                if let Err(e) = session.squeeze(out) {
                    tracing::warn!(lane, error = %e, "lane squeeze failed");
                    self.phase = Phase::Poisoned;
                    return Err(e);
                }
            }
        }

        self.total_squeezed = end;
        self.phase = Phase::Squeezing;
        Ok(())
    }

    /// Finalizes a scratch copy of one lane to `end` bytes and returns the
    /// window `[total_squeezed, end)`
    fn emulate_lane(&self, lane: usize, end: usize) -> Result<Zeroizing<Vec<u8>>> {
        let scratch = self.lanes[lane].try_clone()?;
        let mut buf = Zeroizing::new(Vec::new());
        buf.try_reserve_exact(end)?;
        buf.resize(end, 0);
        scratch.finalize_into(&mut buf[..])?;
        buf.copy_within(self.total_squeezed..end, 0);
        buf.truncate(end - self.total_squeezed);
        Ok(buf)
    }

    /// Duplicates all four lanes and the squeeze position
    ///
    /// Either all four sessions are cloned or none remain.
    pub fn try_clone(&self) -> Result<Self> {
        let lanes = try_lanes(|lane| {
            self.lanes[lane].try_clone().map_err(|e| {
                tracing::warn!(lane, error = %e, "lane clone failed");
                e
            })
        })?;
        Ok(LaneXof {
            lanes,
            variant: self.variant,
            total_squeezed: self.total_squeezed,
            phase: self.phase,
        })
    }

    /// Returns to the fresh absorb phase with nothing absorbed
    ///
    /// If the fresh lanes cannot be opened the context is poisoned, so no
    /// earlier input can leak into later output.
    pub fn reset(&mut self) -> Result<()> {
        match Self::new(self.variant) {
            Ok(fresh) => {
                *self = fresh;
                Ok(())
            }
            Err(e) => {
                self.phase = Phase::Poisoned;
                Err(e)
            }
        }
    }
}

fn poisoned(operation: &'static str) -> Error {
    Error::Processing {
        operation,
        details: "a lane failed earlier; reset the context",
    }
}

#[cfg(test)]
mod tests;
