//! SHAKE extendable output functions
//!
//! SHAKE128 and SHAKE256 as specified in FIPS PUB 202, built on a single
//! Keccak-f[1600] sponge. The sponge keeps absorbing until the first squeeze
//! and afterwards emits output incrementally, so this is the reference for
//! backends with native incremental squeeze.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::lanes::XofSession;
use super::ShakeVariant;
use crate::error::{Error, Result};

const KECCAK_ROUNDS: usize = 24;
const KECCAK_LANES: usize = 25; // 5x5 of 64-bit words

/// SHAKE domain separation and first padding bit
const SHAKE_PAD: u8 = 0x1f;

// Round constants for Keccak
const RC: [u64; KECCAK_ROUNDS] = [
    0x0000000000000001, 0x0000000000008082, 0x800000000000808A, 0x8000000080008000,
    0x000000000000808B, 0x0000000080000001, 0x8000000080008081, 0x8000000000008009,
    0x000000000000008A, 0x0000000000000088, 0x0000000080008009, 0x000000008000000A,
    0x000000008000808B, 0x800000000000008B, 0x8000000000008089, 0x8000000000008003,
    0x8000000000008002, 0x8000000000000080, 0x000000000000800A, 0x800000008000000A,
    0x8000000080008081, 0x8000000000008080, 0x0000000080000001, 0x8000000080008008,
];

// Rotation offsets, in pi order
const RHO: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14,
    27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

// Lane visited at each step of the combined rho/pi walk
const PI: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4,
    15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// The Keccak-f[1600] permutation
pub(crate) fn keccak_f1600(a: &mut [u64; KECCAK_LANES]) {
    for rc in RC {
        // Theta
        let mut c = [0u64; 5];
        for x in 0..5 {
            c[x] = a[x] ^ a[x + 5] ^ a[x + 10] ^ a[x + 15] ^ a[x + 20];
        }
        for x in 0..5 {
            let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
            for y in 0..5 {
                a[x + 5 * y] ^= d;
            }
        }

        // Rho and pi
        let mut last = a[1];
        for (&j, &r) in PI.iter().zip(RHO.iter()) {
            let tmp = a[j];
            a[j] = last.rotate_left(r);
            last = tmp;
        }

        // Chi
        for y in 0..5 {
            let mut row = [0u64; 5];
            row.copy_from_slice(&a[5 * y..5 * y + 5]);
            for x in 0..5 {
                a[5 * y + x] = row[x] ^ ((!row[(x + 1) % 5]) & row[(x + 2) % 5]);
            }
        }

        // Iota
        a[0] ^= rc;
    }
}

#[inline(always)]
fn xor_byte_in_state(state: &mut [u64; KECCAK_LANES], pos: usize, val: u8) {
    state[pos / 8] ^= (val as u64) << ((pos % 8) * 8);
}

#[inline(always)]
fn get_byte_from_state(state: &[u64; KECCAK_LANES], pos: usize) -> u8 {
    (state[pos / 8] >> ((pos % 8) * 8)) as u8
}

/// Keccak sponge with SHAKE padding
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct KeccakSponge {
    state: [u64; KECCAK_LANES],
    rate: usize,
    pos: usize,
    squeezing: bool,
}

impl KeccakSponge {
    pub(crate) fn new(rate: usize) -> Self {
        KeccakSponge {
            state: [0u64; KECCAK_LANES],
            rate,
            pos: 0,
            squeezing: false,
        }
    }

    pub(crate) fn is_squeezing(&self) -> bool {
        self.squeezing
    }

    pub(crate) fn absorb(&mut self, data: &[u8]) -> Result<()> {
        if self.squeezing {
            return Err(Error::Processing {
                operation: "SHAKE absorb",
                details: "Cannot update after squeezing has begun",
            });
        }
        for &byte in data {
            xor_byte_in_state(&mut self.state, self.pos, byte);
            self.pos += 1;
            if self.pos == self.rate {
                keccak_f1600(&mut self.state);
                self.pos = 0;
            }
        }
        Ok(())
    }

    fn pad(&mut self) {
        xor_byte_in_state(&mut self.state, self.pos, SHAKE_PAD);
        xor_byte_in_state(&mut self.state, self.rate - 1, 0x80);
        keccak_f1600(&mut self.state);
        self.pos = 0;
        self.squeezing = true;
    }

    pub(crate) fn squeeze(&mut self, out: &mut [u8]) {
        if !self.squeezing {
            self.pad();
        }
        for byte in out.iter_mut() {
            if self.pos == self.rate {
                keccak_f1600(&mut self.state);
                self.pos = 0;
            }
            *byte = get_byte_from_state(&self.state, self.pos);
            self.pos += 1;
        }
    }
}

/// A SHAKE instance whose variant is chosen at runtime
///
/// This is the session type used by the reference lane backend. It supports
/// native incremental squeeze.
#[derive(Clone)]
pub struct ShakeSession {
    variant: ShakeVariant,
    sponge: KeccakSponge,
}

impl ShakeSession {
    pub fn new(variant: ShakeVariant) -> Self {
        ShakeSession {
            variant,
            sponge: KeccakSponge::new(variant.rate()),
        }
    }

    pub fn variant(&self) -> ShakeVariant {
        self.variant
    }

    /// Hash `input` and fill `out` in a single call
    pub fn digest_into(variant: ShakeVariant, input: &[u8], out: &mut [u8]) -> Result<()> {
        let mut session = Self::new(variant);
        session.sponge.absorb(input)?;
        session.sponge.squeeze(out);
        Ok(())
    }
}

impl XofSession for ShakeSession {
    fn open(variant: ShakeVariant) -> Result<Self> {
        Ok(Self::new(variant))
    }

    fn absorb(&mut self, data: &[u8]) -> Result<()> {
        self.sponge.absorb(data)
    }

    fn try_clone(&self) -> Result<Self> {
        Ok(self.clone())
    }

    fn finalize_into(mut self, out: &mut [u8]) -> Result<()> {
        if self.sponge.is_squeezing() {
            return Err(Error::Processing {
                operation: "SHAKE finalize",
                details: "session already squeezed",
            });
        }
        self.sponge.squeeze(out);
        Ok(())
    }

    fn supports_incremental_squeeze(&self) -> bool {
        true
    }

    fn squeeze(&mut self, out: &mut [u8]) -> Result<()> {
        self.sponge.squeeze(out);
        Ok(())
    }
}
