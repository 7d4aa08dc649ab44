//! Constants for hash functions and extendable-output functions

/// Output size of SHA-256 in bytes
pub const SHA256_OUTPUT_SIZE: usize = 32;

/// Output size of SHA-384 in bytes
pub const SHA384_OUTPUT_SIZE: usize = 48;

/// Output size of SHA-512 in bytes
pub const SHA512_OUTPUT_SIZE: usize = 64;

/// Internal block size of SHA-256 in bytes
pub const SHA256_BLOCK_SIZE: usize = 64;

/// Internal block size of SHA-384 and SHA-512 in bytes
pub const SHA512_BLOCK_SIZE: usize = 128;

/// Size of the Keccak-f[1600] state in bytes
pub const KECCAK_STATE_SIZE: usize = 200;

/// Rate of SHAKE128 in bytes
pub const SHAKE128_RATE: usize = 168;

/// Rate of SHAKE256 in bytes
pub const SHAKE256_RATE: usize = 136;

/// Number of lanes processed together by the batched XOF
pub const XOF_LANES: usize = 4;
