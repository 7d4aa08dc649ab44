//! Known-answer vectors (FIPS 180-4 and FIPS 202 examples)

/// One message with its expected digests
pub struct HashVector {
    pub message: &'static [u8],
    pub sha256: &'static str,
    pub sha384: &'static str,
    pub sha512: &'static str,
    /// First 32 bytes of SHAKE128 output
    pub shake128: &'static str,
    /// First 64 bytes of SHAKE256 output
    pub shake256: &'static str,
}

pub const HASH_VECTORS: &[HashVector] = &[
    HashVector {
        message: b"",
        sha256: "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
        sha384: "38b060a751ac96384cd9327eb1b1e36a21fdb71114be07434c0cc7bf63f6e1da\
                 274edebfe76f65fbd51ad2f14898b95b",
        sha512: "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
                 47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e",
        shake128: "7f9c2ba4e88f827d616045507605853ed73b8093f6efbc88eb1a6eacfa66ef26",
        shake256: "46b9dd2b0ba88d13233b3feb743eeb243fcd52ea62b81b82b50c27646ed5762f\
                   d75dc4ddd8c0f200cb05019d67b592f6fc821c49479ab48640292eacb3b7c4be",
    },
    HashVector {
        message: b"abc",
        sha256: "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        sha384: "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed\
                 8086072ba1e7cc2358baeca134c825a7",
        sha512: "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
                 2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f",
        shake128: "5881092dd818bf5cf8a3ddb793fbcba74097d5c526a6d35f97b83351940f2cc8",
        shake256: "483366601360a8771c6863080cc4114d8db44530f8f1e1ee4f94ea37e78b5739\
                   d5a15bef186a5386c75744c0527e1faa9f8726e462a12a4feb06bd8801e751e4",
    },
];

/// Decodes a vector, panicking on malformed hex
pub fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s).expect("malformed test vector")
}
