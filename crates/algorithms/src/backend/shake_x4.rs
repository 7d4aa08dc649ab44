//! SHAKE-x4 backend table and 4-lane XOF contexts

use core::fmt;
use core::marker::PhantomData;

use super::BackendRegistry;
use crate::error::{validate, Error, Result};
use crate::xof::lanes::{LaneXof, XofSession, LANES};
use crate::xof::{Shake128Algorithm, Shake256Algorithm, XofAlgorithm};

/// Type-erased state of one 4-lane XOF computation
pub trait LaneXofState: Send {
    fn absorb(&mut self, inputs: [&[u8]; LANES]) -> Result<()>;
    fn finalize(&mut self) -> Result<()>;
    fn squeeze(&mut self, outputs: [&mut [u8]; LANES]) -> Result<()>;
    fn try_clone(&self) -> Result<Box<dyn LaneXofState>>;
    fn reset(&mut self) -> Result<()>;
    /// Bytes already emitted per lane
    fn total_squeezed(&self) -> usize;
}

impl<S: XofSession + 'static> LaneXofState for LaneXof<S> {
    fn absorb(&mut self, inputs: [&[u8]; LANES]) -> Result<()> {
        LaneXof::absorb(self, inputs)
    }

    fn finalize(&mut self) -> Result<()> {
        LaneXof::finalize(self)
    }

    fn squeeze(&mut self, outputs: [&mut [u8]; LANES]) -> Result<()> {
        LaneXof::squeeze(self, outputs)
    }

    fn try_clone(&self) -> Result<Box<dyn LaneXofState>> {
        Ok(Box::new(LaneXof::try_clone(self)?))
    }

    fn reset(&mut self) -> Result<()> {
        LaneXof::reset(self)
    }

    fn total_squeezed(&self) -> usize {
        LaneXof::total_squeezed(self)
    }
}

/// Four independent one-shot XOF computations
pub type X4HashFn = fn(outputs: [&mut [u8]; LANES], inputs: [&[u8]; LANES]) -> Result<()>;
pub type X4InitFn = fn() -> Result<Box<dyn LaneXofState>>;
pub type X4AbsorbFn = fn(state: &mut dyn LaneXofState, inputs: [&[u8]; LANES]) -> Result<()>;
/// Shared shape of the finalize and reset entries
pub type X4StepFn = fn(state: &mut dyn LaneXofState) -> Result<()>;
pub type X4SqueezeFn = fn(state: &mut dyn LaneXofState, outputs: [&mut [u8]; LANES]) -> Result<()>;
pub type X4CloneFn = fn(src: &dyn LaneXofState) -> Result<Box<dyn LaneXofState>>;
pub type X4ReleaseFn = fn(state: Box<dyn LaneXofState>);

/// Operation table for one SHAKE variant run four lanes wide
#[derive(Clone, Copy, Debug, Default)]
pub struct LaneXofCallbacks {
    pub hash: Option<X4HashFn>,
    pub init: Option<X4InitFn>,
    pub absorb: Option<X4AbsorbFn>,
    pub finalize: Option<X4StepFn>,
    pub squeeze: Option<X4SqueezeFn>,
    pub clone: Option<X4CloneFn>,
    pub reset: Option<X4StepFn>,
    pub release: Option<X4ReleaseFn>,
}

impl LaneXofCallbacks {
    pub const EMPTY: LaneXofCallbacks = LaneXofCallbacks {
        hash: None,
        init: None,
        absorb: None,
        finalize: None,
        squeeze: None,
        clone: None,
        reset: None,
        release: None,
    };

    /// A complete table from a one-shot hash and a state constructor; the
    /// other entries drive the state through [`LaneXofState`]
    pub const fn with_state(hash: X4HashFn, init: X4InitFn) -> Self {
        LaneXofCallbacks {
            hash: Some(hash),
            init: Some(init),
            absorb: Some(state_absorb),
            finalize: Some(state_finalize),
            squeeze: Some(state_squeeze),
            clone: Some(state_clone),
            reset: Some(state_reset),
            release: Some(state_release),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.hash.is_some()
            && self.init.is_some()
            && self.absorb.is_some()
            && self.finalize.is_some()
            && self.squeeze.is_some()
            && self.clone.is_some()
            && self.reset.is_some()
            && self.release.is_some()
    }
}

fn state_absorb(state: &mut dyn LaneXofState, inputs: [&[u8]; LANES]) -> Result<()> {
    state.absorb(inputs)
}

fn state_finalize(state: &mut dyn LaneXofState) -> Result<()> {
    state.finalize()
}

fn state_squeeze(state: &mut dyn LaneXofState, outputs: [&mut [u8]; LANES]) -> Result<()> {
    state.squeeze(outputs)
}

fn state_clone(src: &dyn LaneXofState) -> Result<Box<dyn LaneXofState>> {
    src.try_clone()
}

fn state_reset(state: &mut dyn LaneXofState) -> Result<()> {
    state.reset()
}

fn state_release(state: Box<dyn LaneXofState>) {
    drop(state);
}

/// The SHAKE-x4 family table
#[derive(Clone, Copy, Debug, Default)]
pub struct ShakeX4Callbacks {
    pub shake128: LaneXofCallbacks,
    pub shake256: LaneXofCallbacks,
}

impl ShakeX4Callbacks {
    pub const EMPTY: ShakeX4Callbacks = ShakeX4Callbacks {
        shake128: LaneXofCallbacks::EMPTY,
        shake256: LaneXofCallbacks::EMPTY,
    };
}

/// SHAKE variants that have an entry in [`ShakeX4Callbacks`]
pub trait ShakeX4Family: XofAlgorithm + 'static {
    fn callbacks(table: &ShakeX4Callbacks) -> &LaneXofCallbacks;
}

impl ShakeX4Family for Shake128Algorithm {
    fn callbacks(table: &ShakeX4Callbacks) -> &LaneXofCallbacks {
        &table.shake128
    }
}

impl ShakeX4Family for Shake256Algorithm {
    fn callbacks(table: &ShakeX4Callbacks) -> &LaneXofCallbacks {
        &table.shake256
    }
}

/// Caller-owned state of one incremental 4-lane computation
pub struct LaneXofContext<A: ShakeX4Family> {
    state: Option<Box<dyn LaneXofState>>,
    _alg: PhantomData<fn() -> A>,
}

impl<A: ShakeX4Family> LaneXofContext<A> {
    pub fn new() -> Self {
        LaneXofContext {
            state: None,
            _alg: PhantomData,
        }
    }

    pub fn is_live(&self) -> bool {
        self.state.is_some()
    }

    /// Bytes already squeezed per lane, or 0 for an empty context
    pub fn total_squeezed(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.total_squeezed())
    }
}

impl<A: ShakeX4Family> Default for LaneXofContext<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ShakeX4Family> fmt::Debug for LaneXofContext<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaneXofContext")
            .field("algorithm", &A::ALGORITHM_ID)
            .field("live", &self.is_live())
            .field("total_squeezed", &self.total_squeezed())
            .finish()
    }
}

impl BackendRegistry {
    fn x4_table<A: ShakeX4Family>(&self) -> &LaneXofCallbacks {
        A::callbacks(&self.shake_x4)
    }

    /// Empties `ctx`, through the table's release entry when there is one
    fn discard_state<A: ShakeX4Family>(&self, ctx: &mut LaneXofContext<A>) {
        if let Some(state) = ctx.state.take() {
            match self.x4_table::<A>().release {
                Some(release) => release(state),
                None => drop(state),
            }
        }
    }

    /// Four one-shot XOFs; inputs share one length, outputs share another
    pub fn try_x4_hash<A: ShakeX4Family>(
        &self,
        outputs: [&mut [u8]; LANES],
        inputs: [&[u8]; LANES],
    ) -> Result<()> {
        validate::equal_lengths("lane input", &inputs.map(<[u8]>::len))?;
        let out_lengths = [
            outputs[0].len(),
            outputs[1].len(),
            outputs[2].len(),
            outputs[3].len(),
        ];
        validate::equal_lengths("lane output", &out_lengths)?;
        let hash = self
            .x4_table::<A>()
            .hash
            .ok_or(Error::unavailable("shake x4 hash"))?;
        hash(outputs, inputs)
    }

    pub fn x4_hash<A: ShakeX4Family>(&self, outputs: [&mut [u8]; LANES], inputs: [&[u8]; LANES]) {
        let _ = self.try_x4_hash::<A>(outputs, inputs);
    }

    /// Releases the lanes `ctx` holds, then opens four fresh ones
    ///
    /// If opening fails the context is left empty.
    pub fn try_x4_init<A: ShakeX4Family>(&self, ctx: &mut LaneXofContext<A>) -> Result<()> {
        let init = self
            .x4_table::<A>()
            .init
            .ok_or(Error::unavailable("shake x4 init"))?;
        self.discard_state(ctx);
        ctx.state = Some(init()?);
        Ok(())
    }

    pub fn x4_init<A: ShakeX4Family>(&self, ctx: &mut LaneXofContext<A>) {
        let _ = self.try_x4_init(ctx);
    }

    pub fn try_x4_absorb<A: ShakeX4Family>(
        &self,
        ctx: &mut LaneXofContext<A>,
        inputs: [&[u8]; LANES],
    ) -> Result<()> {
        let absorb = self
            .x4_table::<A>()
            .absorb
            .ok_or(Error::unavailable("shake x4 absorb"))?;
        let state = ctx
            .state
            .as_deref_mut()
            .ok_or(Error::unavailable("shake x4 absorb"))?;
        absorb(state, inputs)
    }

    pub fn x4_absorb<A: ShakeX4Family>(&self, ctx: &mut LaneXofContext<A>, inputs: [&[u8]; LANES]) {
        let _ = self.try_x4_absorb(ctx, inputs);
    }

    pub fn try_x4_finalize<A: ShakeX4Family>(&self, ctx: &mut LaneXofContext<A>) -> Result<()> {
        let finalize = self
            .x4_table::<A>()
            .finalize
            .ok_or(Error::unavailable("shake x4 finalize"))?;
        let state = ctx
            .state
            .as_deref_mut()
            .ok_or(Error::unavailable("shake x4 finalize"))?;
        finalize(state)
    }

    pub fn x4_finalize<A: ShakeX4Family>(&self, ctx: &mut LaneXofContext<A>) {
        let _ = self.try_x4_finalize(ctx);
    }

    /// Emits the next bytes of every lane
    pub fn try_x4_squeeze<A: ShakeX4Family>(
        &self,
        ctx: &mut LaneXofContext<A>,
        outputs: [&mut [u8]; LANES],
    ) -> Result<()> {
        let squeeze = self
            .x4_table::<A>()
            .squeeze
            .ok_or(Error::unavailable("shake x4 squeeze"))?;
        let state = ctx
            .state
            .as_deref_mut()
            .ok_or(Error::unavailable("shake x4 squeeze"))?;
        squeeze(state, outputs)
    }

    pub fn x4_squeeze<A: ShakeX4Family>(
        &self,
        ctx: &mut LaneXofContext<A>,
        outputs: [&mut [u8]; LANES],
    ) {
        let _ = self.try_x4_squeeze(ctx, outputs);
    }

    /// Makes `dest` an independent copy of `src`, squeeze position included
    ///
    /// The lanes `dest` held are released first; if the copy fails `dest` is
    /// left empty.
    pub fn try_x4_clone<A: ShakeX4Family>(
        &self,
        dest: &mut LaneXofContext<A>,
        src: &LaneXofContext<A>,
    ) -> Result<()> {
        let clone = self
            .x4_table::<A>()
            .clone
            .ok_or(Error::unavailable("shake x4 clone"))?;
        let state = src
            .state
            .as_deref()
            .ok_or(Error::unavailable("shake x4 clone"))?;
        self.discard_state(dest);
        dest.state = Some(clone(state)?);
        Ok(())
    }

    pub fn x4_clone<A: ShakeX4Family>(&self, dest: &mut LaneXofContext<A>, src: &LaneXofContext<A>) {
        let _ = self.try_x4_clone(dest, src);
    }

    /// Returns `ctx` to a fresh absorb phase
    ///
    /// If the backend cannot reopen the lanes they are released and the
    /// context is left empty.
    pub fn try_x4_reset<A: ShakeX4Family>(&self, ctx: &mut LaneXofContext<A>) -> Result<()> {
        let reset = self
            .x4_table::<A>()
            .reset
            .ok_or(Error::unavailable("shake x4 reset"))?;
        let state = ctx
            .state
            .as_deref_mut()
            .ok_or(Error::unavailable("shake x4 reset"))?;
        if let Err(e) = reset(state) {
            self.discard_state(ctx);
            return Err(e);
        }
        Ok(())
    }

    pub fn x4_reset<A: ShakeX4Family>(&self, ctx: &mut LaneXofContext<A>) {
        let _ = self.try_x4_reset(ctx);
    }

    /// Frees the lanes of `ctx`; an empty context is fine
    pub fn try_x4_release<A: ShakeX4Family>(&self, ctx: &mut LaneXofContext<A>) -> Result<()> {
        let release = self
            .x4_table::<A>()
            .release
            .ok_or(Error::unavailable("shake x4 release"))?;
        if let Some(state) = ctx.state.take() {
            release(state);
        }
        Ok(())
    }

    pub fn x4_release<A: ShakeX4Family>(&self, ctx: &mut LaneXofContext<A>) {
        let _ = self.try_x4_release(ctx);
    }
}
