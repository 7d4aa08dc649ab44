//! Chain arithmetic shared by every variant
//!
//! Hash inputs, all over SHAKE truncated to `n` bytes:
//!
//! - chain start `i`: `0x00 || pub_seed || sk_seed || u16(i)`
//! - step `j` of chain `i`: `0x01 || pub_seed || u16(i) || u8(j) || x`
//! - public root: `0x02 || pub_seed || end_0 || ... || end_{len-1}`
//! - message digest: `0x03 || pub_seed || root || message`
//!
//! Variants differ only in how many chain hashes they compute at once, which
//! is what [`ChainEngine`] abstracts.

use zeroize::Zeroizing;

use switchcrypt_algorithms::xof::{ShakeSession, ShakeVariant, XofSession};
use switchcrypt_internal::constant_time::ct_eq;
use switchcrypt_params::pqc::wots::{WotsParams, WOTS_W};

use crate::error::{Error, Result};

/// Largest supported hash length
pub(crate) const MAX_N: usize = 32;

/// Largest supported chain count
pub(crate) const MAX_LEN: usize = 67;

/// Longest chain-start or chain-step input
pub(crate) const MAX_STEP_INPUT: usize = 1 + MAX_N + 2 + 1 + MAX_N;

const DOMAIN_SECRET: u8 = 0x00;
const DOMAIN_CHAIN: u8 = 0x01;
const DOMAIN_ROOT: u8 = 0x02;
const DOMAIN_MESSAGE: u8 = 0x03;

const LAST_POSITION: u8 = (WOTS_W - 1) as u8;

/// One `n`-byte value per chain, zero-padded to `MAX_N`
pub(crate) type ChainValues = [[u8; MAX_N]; MAX_LEN];

/// Per-chain positions or step counts
pub(crate) type ChainDigits = [u8; MAX_LEN];

/// Computes chain hashes, one or several at a time
pub(crate) trait ChainEngine {
    /// Sets `values[i]` to the start of chain `i` for every chain
    fn derive_secrets<P: WotsParams>(
        pub_seed: &[u8],
        sk_seed: &[u8],
        values: &mut ChainValues,
    ) -> Result<()>;

    /// Moves chain `i` from position `start[i]` forward by `steps[i]`
    fn advance<P: WotsParams>(
        pub_seed: &[u8],
        values: &mut ChainValues,
        start: &ChainDigits,
        steps: &ChainDigits,
    ) -> Result<()>;
}

pub(crate) fn shake_variant<P: WotsParams>() -> ShakeVariant {
    if P::SHAKE_BITS == 128 {
        ShakeVariant::Shake128
    } else {
        ShakeVariant::Shake256
    }
}

fn check_params<P: WotsParams>() -> Result<()> {
    if P::N > MAX_N || P::LEN > MAX_LEN || !matches!(P::SHAKE_BITS, 128 | 256) {
        return Err(Error::InvalidParameter(format!(
            "{} is outside the supported WOTS sizes",
            P::NAME
        )));
    }
    Ok(())
}

pub(crate) fn secret_input_len<P: WotsParams>() -> usize {
    1 + 2 * P::N + 2
}

/// Input deriving the start of `chain`
pub(crate) fn secret_input<P: WotsParams>(
    pub_seed: &[u8],
    sk_seed: &[u8],
    chain: usize,
) -> Zeroizing<[u8; MAX_STEP_INPUT]> {
    let n = P::N;
    let mut buf = Zeroizing::new([0u8; MAX_STEP_INPUT]);
    buf[0] = DOMAIN_SECRET;
    buf[1..1 + n].copy_from_slice(pub_seed);
    buf[1 + n..1 + 2 * n].copy_from_slice(sk_seed);
    buf[1 + 2 * n..3 + 2 * n].copy_from_slice(&(chain as u16).to_be_bytes());
    buf
}

/// Writes the input that moves `x` from position `step` to `step + 1` of
/// `chain` and returns its length
pub(crate) fn step_input<P: WotsParams>(
    pub_seed: &[u8],
    chain: usize,
    step: u8,
    x: &[u8],
    buf: &mut [u8; MAX_STEP_INPUT],
) -> usize {
    let n = P::N;
    buf[0] = DOMAIN_CHAIN;
    buf[1..1 + n].copy_from_slice(pub_seed);
    buf[1 + n..3 + n].copy_from_slice(&(chain as u16).to_be_bytes());
    buf[3 + n] = step;
    buf[4 + n..4 + 2 * n].copy_from_slice(&x[..n]);
    4 + 2 * n
}

fn shake_into<P: WotsParams>(parts: &[&[u8]], out: &mut [u8]) -> Result<()> {
    let mut session = ShakeSession::new(shake_variant::<P>());
    for part in parts {
        session.absorb(part)?;
    }
    session.finalize_into(out)?;
    Ok(())
}

fn message_digest<P: WotsParams>(pub_seed: &[u8], root: &[u8], message: &[u8]) -> Result<[u8; MAX_N]> {
    let mut digest = [0u8; MAX_N];
    shake_into::<P>(&[&[DOMAIN_MESSAGE][..], pub_seed, root, message], &mut digest[..P::N])?;
    Ok(digest)
}

fn root_of<P: WotsParams>(pub_seed: &[u8], ends: &ChainValues) -> Result<[u8; MAX_N]> {
    let mut session = ShakeSession::new(shake_variant::<P>());
    session.absorb(&[DOMAIN_ROOT])?;
    session.absorb(pub_seed)?;
    for end in &ends[..P::LEN] {
        session.absorb(&end[..P::N])?;
    }
    let mut root = [0u8; MAX_N];
    session.finalize_into(&mut root[..P::N])?;
    Ok(root)
}

/// Base-16 digits of the digest, high nibble first, followed by the
/// checksum digits
pub(crate) fn chain_digits<P: WotsParams>(digest: &[u8]) -> ChainDigits {
    let mut digits = [0u8; MAX_LEN];
    for (i, byte) in digest[..P::N].iter().enumerate() {
        digits[2 * i] = byte >> 4;
        digits[2 * i + 1] = byte & 0x0f;
    }
    let checksum: u32 = digits[..P::LEN1]
        .iter()
        .map(|&d| u32::from(LAST_POSITION - d))
        .sum();
    for k in 0..P::LEN2 {
        let shift = 4 * (P::LEN2 - 1 - k);
        digits[P::LEN1 + k] = ((checksum >> shift) & 0x0f) as u8;
    }
    digits
}

pub(crate) fn keypair_from_seed<P: WotsParams, E: ChainEngine>(
    seed: &[u8],
    public_key: &mut [u8],
    secret_key: &mut [u8],
) -> Result<()> {
    check_params::<P>()?;
    let n = P::N;
    let (sk_seed, pub_seed) = seed.split_at(n);

    let mut chains = Zeroizing::new([[0u8; MAX_N]; MAX_LEN]);
    E::derive_secrets::<P>(pub_seed, sk_seed, &mut chains)?;
    E::advance::<P>(pub_seed, &mut chains, &[0; MAX_LEN], &[LAST_POSITION; MAX_LEN])?;
    let root = root_of::<P>(pub_seed, &chains)?;

    public_key[..n].copy_from_slice(pub_seed);
    public_key[n..2 * n].copy_from_slice(&root[..n]);
    secret_key[..n].copy_from_slice(sk_seed);
    secret_key[n..2 * n].copy_from_slice(pub_seed);
    secret_key[2 * n..3 * n].copy_from_slice(&root[..n]);
    Ok(())
}

pub(crate) fn sign<P: WotsParams, E: ChainEngine>(
    signature: &mut [u8],
    message: &[u8],
    secret_key: &[u8],
) -> Result<()> {
    check_params::<P>()?;
    let n = P::N;
    let (sk_seed, rest) = secret_key.split_at(n);
    let (pub_seed, root) = rest.split_at(n);

    let digest = message_digest::<P>(pub_seed, root, message)?;
    let digits = chain_digits::<P>(&digest);

    let mut chains = Zeroizing::new([[0u8; MAX_N]; MAX_LEN]);
    E::derive_secrets::<P>(pub_seed, sk_seed, &mut chains)?;
    E::advance::<P>(pub_seed, &mut chains, &[0; MAX_LEN], &digits)?;

    for (chunk, value) in signature.chunks_exact_mut(n).zip(chains.iter()) {
        chunk.copy_from_slice(&value[..n]);
    }
    Ok(())
}

pub(crate) fn verify<P: WotsParams, E: ChainEngine>(
    message: &[u8],
    signature: &[u8],
    public_key: &[u8],
) -> Result<()> {
    check_params::<P>()?;
    let n = P::N;
    let (pub_seed, root) = public_key.split_at(n);

    let digest = message_digest::<P>(pub_seed, root, message)?;
    let digits = chain_digits::<P>(&digest);
    let remaining = digits.map(|d| LAST_POSITION.saturating_sub(d));

    let mut chains = [[0u8; MAX_N]; MAX_LEN];
    for (value, chunk) in chains.iter_mut().zip(signature.chunks_exact(n)) {
        value[..n].copy_from_slice(chunk);
    }
    E::advance::<P>(pub_seed, &mut chains, &digits, &remaining)?;
    let candidate = root_of::<P>(pub_seed, &chains)?;

    if ct_eq(&candidate[..n], root) {
        Ok(())
    } else {
        Err(Error::Verification {
            algorithm: P::NAME,
            details: "recomputed public key does not match".to_string(),
        })
    }
}
