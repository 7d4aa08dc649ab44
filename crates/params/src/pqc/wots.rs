//! Constants for the Winternitz one-time signature over SHAKE

/// Winternitz parameter (chain length is `W - 1` steps)
pub const WOTS_W: usize = 16;

/// Bits encoded per chain
pub const WOTS_LOG_W: usize = 4;

/// Common trait for WOTS parameter sets
pub trait WotsParams: Send + Sync + 'static {
    /// Algorithm name as registered with the dispatcher
    const NAME: &'static str;

    /// Hash output length in bytes
    const N: usize;

    /// Security level of the underlying SHAKE instance (128 or 256)
    const SHAKE_BITS: usize;

    /// Claimed NIST security category
    const NIST_LEVEL: u8;

    /// Number of message chains (`8 * N / LOG_W`)
    const LEN1: usize = 8 * Self::N / WOTS_LOG_W;

    /// Number of checksum chains
    const LEN2: usize;

    /// Total number of chains
    const LEN: usize = Self::LEN1 + Self::LEN2;

    /// Public key: `pub_seed || root`
    const PUBLIC_KEY_BYTES: usize = 2 * Self::N;

    /// Secret key: `sk_seed || pub_seed || root`
    const SECRET_KEY_BYTES: usize = 3 * Self::N;

    /// Signature: one chain value per chain
    const SIGNATURE_SIZE: usize = Self::LEN * Self::N;
}

/// WOTS with n = 16 over SHAKE128, NIST category 1
pub struct WotsShake128W16;

impl WotsParams for WotsShake128W16 {
    const NAME: &'static str = "wots-shake128-w16";
    const N: usize = 16;
    const SHAKE_BITS: usize = 128;
    const NIST_LEVEL: u8 = 1;
    // floor(log2(32 * 15) / 4) + 1
    const LEN2: usize = 3;
}

/// WOTS with n = 32 over SHAKE256, NIST category 5
pub struct WotsShake256W16;

impl WotsParams for WotsShake256W16 {
    const NAME: &'static str = "wots-shake256-w16";
    const N: usize = 32;
    const SHAKE_BITS: usize = 256;
    const NIST_LEVEL: u8 = 5;
    // floor(log2(64 * 15) / 4) + 1
    const LEN2: usize = 3;
}
