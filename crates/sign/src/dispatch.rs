//! Runtime choice between the compiled variants of one algorithm
//!
//! Every algorithm ships a portable variant and zero or more accelerated
//! variants that depend on a CPU extension. All variants produce the same
//! bytes; they differ only in speed. A [`Dispatcher`] picks one per call:
//! the first accelerated variant whose extension is available, else the
//! portable one. With the `dist-build` feature disabled the extension check
//! is skipped and the first compiled-in variant always wins.

use core::fmt;

use switchcrypt_internal::{CapabilityProbe, CpuExtension};

use crate::error::Result;

/// Derives a key pair from a seed: `(seed, public_key, secret_key)`
pub type KeypairFn = fn(seed: &[u8], public_key: &mut [u8], secret_key: &mut [u8]) -> Result<()>;
/// Signs a message: `(signature, message, secret_key)`
pub type SignFn = fn(signature: &mut [u8], message: &[u8], secret_key: &[u8]) -> Result<()>;
/// Checks a signature: `(message, signature, public_key)`
pub type VerifyFn = fn(message: &[u8], signature: &[u8], public_key: &[u8]) -> Result<()>;

/// The three operations of one variant, on caller-sized byte buffers
#[derive(Clone, Copy, Debug)]
pub struct VariantOps {
    pub keypair: KeypairFn,
    pub sign: SignFn,
    pub verify: VerifyFn,
}

/// One compiled implementation of an algorithm
#[derive(Clone, Copy, Debug)]
pub struct Variant {
    pub name: &'static str,
    /// Extension the variant needs, `None` for portable code
    pub requires: Option<CpuExtension>,
    pub ops: VariantOps,
}

/// How a dispatcher picks among usable variants
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Most specific usable variant
    #[default]
    Auto,
    /// Always the portable variant
    Portable,
    /// The named variant if usable, otherwise as `Auto`
    Variant(String),
}

impl SelectionPolicy {
    /// Environment variable read by [`SelectionPolicy::from_env`]
    pub const ENV_VAR: &'static str = "SWITCHCRYPT_SIG_VARIANT";

    /// Parses `auto`, `portable` or a variant name, ignoring case and
    /// surrounding whitespace; an empty string means `auto`
    pub fn parse(s: &str) -> Self {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "" | "auto" => SelectionPolicy::Auto,
            "portable" => SelectionPolicy::Portable,
            _ => SelectionPolicy::Variant(s),
        }
    }

    /// Policy from `SWITCHCRYPT_SIG_VARIANT`, `Auto` when unset
    pub fn from_env() -> Self {
        std::env::var(Self::ENV_VAR)
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }
}

/// Picks a variant at call time and forwards to it
#[derive(Clone)]
pub struct Dispatcher {
    accelerated: &'static [Variant],
    portable: &'static Variant,
    probe: &'static dyn CapabilityProbe,
    policy: SelectionPolicy,
}

impl Dispatcher {
    /// `accelerated` is ordered most specific first
    pub fn new(
        accelerated: &'static [Variant],
        portable: &'static Variant,
        probe: &'static dyn CapabilityProbe,
        policy: SelectionPolicy,
    ) -> Self {
        Dispatcher {
            accelerated,
            portable,
            probe,
            policy,
        }
    }

    pub fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    /// Names of all compiled-in variants, portable last
    pub fn variant_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.accelerated
            .iter()
            .chain(core::iter::once(self.portable))
            .map(|v| v.name)
    }

    fn is_usable(&self, variant: &Variant) -> bool {
        match variant.requires {
            None => true,
            Some(ext) if cfg!(feature = "dist-build") => self.probe.has_extension(ext),
            Some(_) => true,
        }
    }

    fn most_specific(&self) -> &'static Variant {
        self.accelerated
            .iter()
            .find(|v| self.is_usable(v))
            .unwrap_or(self.portable)
    }

    /// The variant the next operation will run on
    pub fn select(&self) -> &'static Variant {
        let chosen = match &self.policy {
            SelectionPolicy::Auto => self.most_specific(),
            SelectionPolicy::Portable => self.portable,
            SelectionPolicy::Variant(name) => self
                .accelerated
                .iter()
                .chain(core::iter::once(self.portable))
                .find(|v| v.name == name.as_str() && self.is_usable(v))
                .unwrap_or_else(|| self.most_specific()),
        };
        tracing::trace!(variant = chosen.name, policy = ?self.policy, "selected signature variant");
        chosen
    }

    pub fn keypair(&self, seed: &[u8], public_key: &mut [u8], secret_key: &mut [u8]) -> Result<()> {
        (self.select().ops.keypair)(seed, public_key, secret_key)
    }

    pub fn sign(&self, signature: &mut [u8], message: &[u8], secret_key: &[u8]) -> Result<()> {
        (self.select().ops.sign)(signature, message, secret_key)
    }

    pub fn verify(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> Result<()> {
        (self.select().ops.verify)(message, signature, public_key)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("variants", &self.variant_names().collect::<Vec<_>>())
            .field("policy", &self.policy)
            .finish()
    }
}
