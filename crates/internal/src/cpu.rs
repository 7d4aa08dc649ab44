//! CPU capability probing
//!
//! Accelerated variants of an algorithm declare the instruction-set extension
//! they need as a [`CpuExtension`]; dispatchers ask a [`CapabilityProbe`]
//! whether it is present. The host probe runs detection once per process and
//! serves every later query from the cached bitset.

use core::fmt;
use std::sync::OnceLock;

/// Instruction-set extensions an accelerated variant may depend on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CpuExtension {
    Adx,
    Aes,
    Avx,
    Avx2,
    Avx512,
    Bmi1,
    Bmi2,
    Pclmulqdq,
    Vpclmulqdq,
    Popcnt,
    Sse,
    Sse2,
    Sse3,
    ArmAes,
    ArmSha2,
    ArmSha3,
    ArmNeon,
}

impl CpuExtension {
    /// Every known extension, in declaration order
    pub const ALL: [CpuExtension; 17] = [
        CpuExtension::Adx,
        CpuExtension::Aes,
        CpuExtension::Avx,
        CpuExtension::Avx2,
        CpuExtension::Avx512,
        CpuExtension::Bmi1,
        CpuExtension::Bmi2,
        CpuExtension::Pclmulqdq,
        CpuExtension::Vpclmulqdq,
        CpuExtension::Popcnt,
        CpuExtension::Sse,
        CpuExtension::Sse2,
        CpuExtension::Sse3,
        CpuExtension::ArmAes,
        CpuExtension::ArmSha2,
        CpuExtension::ArmSha3,
        CpuExtension::ArmNeon,
    ];

    /// Lower-case name, matching the target-feature spelling where one exists
    pub const fn name(self) -> &'static str {
        match self {
            CpuExtension::Adx => "adx",
            CpuExtension::Aes => "aes",
            CpuExtension::Avx => "avx",
            CpuExtension::Avx2 => "avx2",
            CpuExtension::Avx512 => "avx512",
            CpuExtension::Bmi1 => "bmi1",
            CpuExtension::Bmi2 => "bmi2",
            CpuExtension::Pclmulqdq => "pclmulqdq",
            CpuExtension::Vpclmulqdq => "vpclmulqdq",
            CpuExtension::Popcnt => "popcnt",
            CpuExtension::Sse => "sse",
            CpuExtension::Sse2 => "sse2",
            CpuExtension::Sse3 => "sse3",
            CpuExtension::ArmAes => "arm-aes",
            CpuExtension::ArmSha2 => "arm-sha2",
            CpuExtension::ArmSha3 => "arm-sha3",
            CpuExtension::ArmNeon => "arm-neon",
        }
    }

    const fn bit(self) -> u32 {
        1 << (self as u8)
    }
}

impl fmt::Display for CpuExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of [`CpuExtension`]s
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CpuExtensions(u32);

impl CpuExtensions {
    /// The empty set
    pub const NONE: CpuExtensions = CpuExtensions(0);

    /// Build a set from a list of extensions
    pub const fn from_slice(exts: &[CpuExtension]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < exts.len() {
            bits |= exts[i].bit();
            i += 1;
        }
        CpuExtensions(bits)
    }

    /// Return a copy of the set with `ext` added
    #[must_use]
    pub const fn with(self, ext: CpuExtension) -> Self {
        CpuExtensions(self.0 | ext.bit())
    }

    pub fn insert(&mut self, ext: CpuExtension) {
        self.0 |= ext.bit();
    }

    pub const fn contains(self, ext: CpuExtension) -> bool {
        self.0 & ext.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the members in declaration order
    pub fn iter(self) -> impl Iterator<Item = CpuExtension> {
        CpuExtension::ALL
            .into_iter()
            .filter(move |ext| self.contains(*ext))
    }
}

impl fmt::Debug for CpuExtensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(CpuExtension::name)).finish()
    }
}

/// Boolean oracle answering whether the running CPU supports an extension
///
/// Implementations must be pure and monotonic: the answer for a given
/// extension never changes during the life of the process.
pub trait CapabilityProbe: Send + Sync {
    /// Whether `ext` is available
    fn has_extension(&self, ext: CpuExtension) -> bool;
}

/// Probe backed by runtime feature detection on the host CPU
#[derive(Clone, Copy, Debug, Default)]
pub struct HostProbe;

static HOST_EXTENSIONS: OnceLock<CpuExtensions> = OnceLock::new();

/// Shared host probe instance for dispatchers that need a `'static` probe
pub static HOST_PROBE: HostProbe = HostProbe;

impl HostProbe {
    /// Extensions detected on the host, computed on first use
    pub fn extensions() -> CpuExtensions {
        *HOST_EXTENSIONS.get_or_init(|| {
            let detected = detect();
            tracing::debug!(extensions = ?detected, "probed host cpu extensions");
            detected
        })
    }
}

impl CapabilityProbe for HostProbe {
    fn has_extension(&self, ext: CpuExtension) -> bool {
        Self::extensions().contains(ext)
    }
}

/// Probe answering from a fixed extension set
///
/// Used to pin variant selection in tests and on targets where runtime
/// detection is unavailable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StaticProbe(CpuExtensions);

impl StaticProbe {
    pub const fn new(extensions: CpuExtensions) -> Self {
        StaticProbe(extensions)
    }

    /// A probe that reports no extensions at all
    pub const fn none() -> Self {
        StaticProbe(CpuExtensions::NONE)
    }

    pub const fn extensions(&self) -> CpuExtensions {
        self.0
    }
}

impl CapabilityProbe for StaticProbe {
    fn has_extension(&self, ext: CpuExtension) -> bool {
        self.0.contains(ext)
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn detect() -> CpuExtensions {
    let mut found = CpuExtensions::NONE;
    macro_rules! probe {
        ($($feature:tt => $ext:expr),* $(,)?) => {
            $(
                if std::arch::is_x86_feature_detected!($feature) {
                    found.insert($ext);
                }
            )*
        };
    }
    probe! {
        "adx" => CpuExtension::Adx,
        "aes" => CpuExtension::Aes,
        "avx" => CpuExtension::Avx,
        "avx2" => CpuExtension::Avx2,
        "avx512f" => CpuExtension::Avx512,
        "bmi1" => CpuExtension::Bmi1,
        "bmi2" => CpuExtension::Bmi2,
        "pclmulqdq" => CpuExtension::Pclmulqdq,
        "vpclmulqdq" => CpuExtension::Vpclmulqdq,
        "popcnt" => CpuExtension::Popcnt,
        "sse" => CpuExtension::Sse,
        "sse2" => CpuExtension::Sse2,
        "sse3" => CpuExtension::Sse3,
    }
    found
}

#[cfg(target_arch = "aarch64")]
fn detect() -> CpuExtensions {
    let mut found = CpuExtensions::NONE;
    if std::arch::is_aarch64_feature_detected!("aes") {
        found.insert(CpuExtension::ArmAes);
    }
    if std::arch::is_aarch64_feature_detected!("sha2") {
        found.insert(CpuExtension::ArmSha2);
    }
    if std::arch::is_aarch64_feature_detected!("sha3") {
        found.insert(CpuExtension::ArmSha3);
    }
    if std::arch::is_aarch64_feature_detected!("neon") {
        found.insert(CpuExtension::ArmNeon);
    }
    found
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
fn detect() -> CpuExtensions {
    CpuExtensions::NONE
}
