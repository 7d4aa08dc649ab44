//! SHA-2 backend table and incremental hash contexts

use core::fmt;
use core::marker::PhantomData;

use super::BackendRegistry;
use crate::error::{validate, Error, Result};
use crate::hash::{HashAlgorithm, Sha256Algorithm, Sha384Algorithm, Sha512Algorithm};

use switchcrypt_params::utils::hash::{SHA256_OUTPUT_SIZE, SHA384_OUTPUT_SIZE, SHA512_OUTPUT_SIZE};

/// One streaming hash computation owned by a backend
///
/// The session carries its own destructor, so a context stays valid even if
/// the table that created it is replaced.
pub trait DigestSession: Send {
    /// Absorbs more input
    fn absorb(&mut self, data: &[u8]) -> Result<()>;

    /// Duplicates the absorbed-so-far state
    fn try_clone(&self) -> Result<Box<dyn DigestSession>>;

    /// Pads and writes the digest; `out` has exactly the output size
    fn finalize_into(self: Box<Self>, out: &mut [u8]) -> Result<()>;
}

/// One-shot hash of `input` into `out`
pub type HashFn = fn(out: &mut [u8], input: &[u8]) -> Result<()>;
/// Opens a fresh session
pub type InitFn = fn() -> Result<Box<dyn DigestSession>>;
/// Duplicates a session
pub type CloneFn = fn(src: &dyn DigestSession) -> Result<Box<dyn DigestSession>>;
/// Feeds bytes into a session
pub type AbsorbFn = fn(session: &mut dyn DigestSession, data: &[u8]) -> Result<()>;
/// Absorbs `tail`, writes the digest and consumes the session
pub type FinalizeFn = fn(out: &mut [u8], session: Box<dyn DigestSession>, tail: &[u8]) -> Result<()>;
/// Frees an abandoned session
pub type ReleaseFn = fn(session: Box<dyn DigestSession>);

/// Operation table for one SHA-2 variant; any entry may be absent
#[derive(Clone, Copy, Debug, Default)]
pub struct DigestCallbacks {
    pub hash: Option<HashFn>,
    pub init: Option<InitFn>,
    pub clone: Option<CloneFn>,
    pub absorb: Option<AbsorbFn>,
    /// Like `absorb`, but only ever handed whole blocks
    pub absorb_blocks: Option<AbsorbFn>,
    pub finalize: Option<FinalizeFn>,
    pub release: Option<ReleaseFn>,
}

impl DigestCallbacks {
    pub const EMPTY: DigestCallbacks = DigestCallbacks {
        hash: None,
        init: None,
        clone: None,
        absorb: None,
        absorb_blocks: None,
        finalize: None,
        release: None,
    };

    /// A complete table for a backend that only supplies the one-shot hash
    /// and a session constructor; the remaining entries drive the session
    /// through [`DigestSession`]
    pub const fn with_session(hash: HashFn, init: InitFn) -> Self {
        DigestCallbacks {
            hash: Some(hash),
            init: Some(init),
            clone: Some(session_clone),
            absorb: Some(session_absorb),
            absorb_blocks: Some(session_absorb),
            finalize: Some(session_finalize),
            release: Some(session_release),
        }
    }

    /// Whether every entry is present
    pub fn is_complete(&self) -> bool {
        self.hash.is_some()
            && self.init.is_some()
            && self.clone.is_some()
            && self.absorb.is_some()
            && self.absorb_blocks.is_some()
            && self.finalize.is_some()
            && self.release.is_some()
    }
}

fn session_clone(src: &dyn DigestSession) -> Result<Box<dyn DigestSession>> {
    src.try_clone()
}

fn session_absorb(session: &mut dyn DigestSession, data: &[u8]) -> Result<()> {
    session.absorb(data)
}

fn session_finalize(out: &mut [u8], mut session: Box<dyn DigestSession>, tail: &[u8]) -> Result<()> {
    session.absorb(tail)?;
    session.finalize_into(out)
}

fn session_release(session: Box<dyn DigestSession>) {
    drop(session);
}

/// The SHA-2 family table
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha2Callbacks {
    pub sha256: DigestCallbacks,
    pub sha384: DigestCallbacks,
    pub sha512: DigestCallbacks,
}

impl Sha2Callbacks {
    pub const EMPTY: Sha2Callbacks = Sha2Callbacks {
        sha256: DigestCallbacks::EMPTY,
        sha384: DigestCallbacks::EMPTY,
        sha512: DigestCallbacks::EMPTY,
    };
}

/// SHA-2 variants that have an entry in [`Sha2Callbacks`]
pub trait Sha2Family: HashAlgorithm + 'static {
    /// This variant's part of the family table
    fn callbacks(table: &Sha2Callbacks) -> &DigestCallbacks;
}

impl Sha2Family for Sha256Algorithm {
    fn callbacks(table: &Sha2Callbacks) -> &DigestCallbacks {
        &table.sha256
    }
}

impl Sha2Family for Sha384Algorithm {
    fn callbacks(table: &Sha2Callbacks) -> &DigestCallbacks {
        &table.sha384
    }
}

impl Sha2Family for Sha512Algorithm {
    fn callbacks(table: &Sha2Callbacks) -> &DigestCallbacks {
        &table.sha512
    }
}

/// Caller-owned state of one incremental SHA-2 computation
///
/// Empty until `inc_init`, and empty again after `inc_finalize` or
/// `inc_release`. Operations on an empty context do nothing.
pub struct HashContext<A: Sha2Family> {
    session: Option<Box<dyn DigestSession>>,
    _alg: PhantomData<fn() -> A>,
}

impl<A: Sha2Family> HashContext<A> {
    pub fn new() -> Self {
        HashContext {
            session: None,
            _alg: PhantomData,
        }
    }

    /// Whether the context holds a live session
    pub fn is_live(&self) -> bool {
        self.session.is_some()
    }
}

impl<A: Sha2Family> Default for HashContext<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Sha2Family> fmt::Debug for HashContext<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashContext")
            .field("algorithm", &A::ALGORITHM_ID)
            .field("live", &self.is_live())
            .finish()
    }
}

impl BackendRegistry {
    fn digest_table<A: Sha2Family>(&self) -> &DigestCallbacks {
        A::callbacks(&self.sha2)
    }

    /// Empties `ctx`, through the table's release entry when there is one
    fn discard_session<A: Sha2Family>(&self, ctx: &mut HashContext<A>) {
        if let Some(session) = ctx.session.take() {
            match self.digest_table::<A>().release {
                Some(release) => release(session),
                None => drop(session),
            }
        }
    }

    /// One-shot hash; `out` must be exactly the digest size
    pub fn try_hash<A: Sha2Family>(&self, out: &mut [u8], input: &[u8]) -> Result<()> {
        validate::length(A::ALGORITHM_ID, out.len(), A::OUTPUT_SIZE)?;
        let hash = self
            .digest_table::<A>()
            .hash
            .ok_or(Error::unavailable("sha2 hash"))?;
        hash(out, input)
    }

    pub fn hash<A: Sha2Family>(&self, out: &mut [u8], input: &[u8]) {
        let _ = self.try_hash::<A>(out, input);
    }

    pub fn try_sha256(&self, out: &mut [u8; SHA256_OUTPUT_SIZE], input: &[u8]) -> Result<()> {
        self.try_hash::<Sha256Algorithm>(out, input)
    }

    pub fn sha256(&self, out: &mut [u8; SHA256_OUTPUT_SIZE], input: &[u8]) {
        let _ = self.try_sha256(out, input);
    }

    pub fn try_sha384(&self, out: &mut [u8; SHA384_OUTPUT_SIZE], input: &[u8]) -> Result<()> {
        self.try_hash::<Sha384Algorithm>(out, input)
    }

    pub fn sha384(&self, out: &mut [u8; SHA384_OUTPUT_SIZE], input: &[u8]) {
        let _ = self.try_sha384(out, input);
    }

    pub fn try_sha512(&self, out: &mut [u8; SHA512_OUTPUT_SIZE], input: &[u8]) -> Result<()> {
        self.try_hash::<Sha512Algorithm>(out, input)
    }

    pub fn sha512(&self, out: &mut [u8; SHA512_OUTPUT_SIZE], input: &[u8]) {
        let _ = self.try_sha512(out, input);
    }

    /// Releases whatever session `ctx` holds, then opens a fresh one
    ///
    /// If opening fails the context is left empty.
    pub fn try_inc_init<A: Sha2Family>(&self, ctx: &mut HashContext<A>) -> Result<()> {
        let init = self
            .digest_table::<A>()
            .init
            .ok_or(Error::unavailable("sha2 init"))?;
        self.discard_session(ctx);
        ctx.session = Some(init()?);
        Ok(())
    }

    pub fn inc_init<A: Sha2Family>(&self, ctx: &mut HashContext<A>) {
        let _ = self.try_inc_init(ctx);
    }

    /// Makes `dest` an independent copy of `src`
    ///
    /// The session `dest` held is released first; if the copy fails `dest`
    /// is left empty.
    pub fn try_inc_clone<A: Sha2Family>(
        &self,
        dest: &mut HashContext<A>,
        src: &HashContext<A>,
    ) -> Result<()> {
        let clone = self
            .digest_table::<A>()
            .clone
            .ok_or(Error::unavailable("sha2 clone"))?;
        let session = src
            .session
            .as_deref()
            .ok_or(Error::unavailable("sha2 clone"))?;
        self.discard_session(dest);
        dest.session = Some(clone(session)?);
        Ok(())
    }

    pub fn inc_clone<A: Sha2Family>(&self, dest: &mut HashContext<A>, src: &HashContext<A>) {
        let _ = self.try_inc_clone(dest, src);
    }

    pub fn try_inc_absorb<A: Sha2Family>(&self, ctx: &mut HashContext<A>, data: &[u8]) -> Result<()> {
        let absorb = self
            .digest_table::<A>()
            .absorb
            .ok_or(Error::unavailable("sha2 absorb"))?;
        let session = ctx
            .session
            .as_deref_mut()
            .ok_or(Error::unavailable("sha2 absorb"))?;
        absorb(session, data)
    }

    pub fn inc_absorb<A: Sha2Family>(&self, ctx: &mut HashContext<A>, data: &[u8]) {
        let _ = self.try_inc_absorb(ctx, data);
    }

    /// Absorbs whole blocks; `blocks` must be a multiple of the block size
    pub fn try_inc_absorb_blocks<A: Sha2Family>(
        &self,
        ctx: &mut HashContext<A>,
        blocks: &[u8],
    ) -> Result<()> {
        validate::whole_blocks(A::ALGORITHM_ID, blocks.len(), A::BLOCK_SIZE)?;
        let absorb_blocks = self
            .digest_table::<A>()
            .absorb_blocks
            .ok_or(Error::unavailable("sha2 absorb blocks"))?;
        let session = ctx
            .session
            .as_deref_mut()
            .ok_or(Error::unavailable("sha2 absorb blocks"))?;
        absorb_blocks(session, blocks)
    }

    pub fn inc_absorb_blocks<A: Sha2Family>(&self, ctx: &mut HashContext<A>, blocks: &[u8]) {
        let _ = self.try_inc_absorb_blocks(ctx, blocks);
    }

    /// Absorbs `tail`, writes the digest and consumes the session
    ///
    /// Once the finalize entry is invoked the context is empty, whether or
    /// not the backend succeeds.
    pub fn try_inc_finalize<A: Sha2Family>(
        &self,
        out: &mut [u8],
        ctx: &mut HashContext<A>,
        tail: &[u8],
    ) -> Result<()> {
        validate::length(A::ALGORITHM_ID, out.len(), A::OUTPUT_SIZE)?;
        let finalize = self
            .digest_table::<A>()
            .finalize
            .ok_or(Error::unavailable("sha2 finalize"))?;
        let session = ctx
            .session
            .take()
            .ok_or(Error::unavailable("sha2 finalize"))?;
        finalize(out, session, tail)
    }

    pub fn inc_finalize<A: Sha2Family>(&self, out: &mut [u8], ctx: &mut HashContext<A>, tail: &[u8]) {
        let _ = self.try_inc_finalize(out, ctx, tail);
    }

    /// Frees the session of an abandoned context; an empty context is fine
    pub fn try_inc_release<A: Sha2Family>(&self, ctx: &mut HashContext<A>) -> Result<()> {
        let release = self
            .digest_table::<A>()
            .release
            .ok_or(Error::unavailable("sha2 release"))?;
        if let Some(session) = ctx.session.take() {
            release(session);
        }
        Ok(())
    }

    pub fn inc_release<A: Sha2Family>(&self, ctx: &mut HashContext<A>) {
        let _ = self.try_inc_release(ctx);
    }
}
