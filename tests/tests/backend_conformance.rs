//! Every bundled backend against the known answers and against each other

use std::sync::atomic::{AtomicUsize, Ordering};

use switchcrypt_algorithms::backend::{
    BackendRegistry, DigestCallbacks, DigestSession, HashContext, LaneXofContext, Sha2Callbacks,
};
use switchcrypt_algorithms::hash::{
    HashFunction, Sha256, Sha256Algorithm, Sha384Algorithm, Sha512Algorithm,
};
use switchcrypt_algorithms::xof::{Shake128Algorithm, Shake256Algorithm};
use switchcrypt_algorithms::{Error, Result};
use switchcrypt_tests::backends::registries;
use switchcrypt_tests::vectors::{unhex, HASH_VECTORS};

#[test]
fn test_sha2_known_answers() {
    for (name, registry) in registries() {
        for v in HASH_VECTORS {
            let mut d256 = [0u8; 32];
            let mut d384 = [0u8; 48];
            let mut d512 = [0u8; 64];
            registry.try_sha256(&mut d256, v.message).unwrap();
            registry.try_sha384(&mut d384, v.message).unwrap();
            registry.try_sha512(&mut d512, v.message).unwrap();
            assert_eq!(d256.to_vec(), unhex(v.sha256), "{name}");
            assert_eq!(d384.to_vec(), unhex(v.sha384), "{name}");
            assert_eq!(d512.to_vec(), unhex(v.sha512), "{name}");
        }
    }
}

#[test]
fn test_incremental_sha2_matches_oneshot() {
    let message: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
    for (name, registry) in registries() {
        let mut expected = [0u8; 48];
        registry.try_hash::<Sha384Algorithm>(&mut expected, &message).unwrap();

        // Two whole 128-byte blocks, a ragged absorb, then a tail
        let mut ctx = HashContext::<Sha384Algorithm>::new();
        registry.try_inc_init(&mut ctx).unwrap();
        registry.try_inc_absorb_blocks(&mut ctx, &message[..256]).unwrap();
        registry.try_inc_absorb(&mut ctx, &message[256..901]).unwrap();
        let mut digest = [0u8; 48];
        registry.try_inc_finalize(&mut digest, &mut ctx, &message[901..]).unwrap();

        assert_eq!(digest, expected, "{name}");
        assert!(!ctx.is_live());
    }
}

#[test]
fn test_x4_known_answers() {
    for (name, registry) in registries() {
        for v in HASH_VECTORS {
            let input = [v.message; 4];

            let mut ctx = LaneXofContext::<Shake128Algorithm>::new();
            registry.try_x4_init(&mut ctx).unwrap();
            registry.try_x4_absorb(&mut ctx, input).unwrap();
            registry.try_x4_finalize(&mut ctx).unwrap();
            let mut out = [[0u8; 32]; 4];
            let [a, b, c, d] = &mut out;
            registry.try_x4_squeeze(&mut ctx, [a, b, c, d]).unwrap();
            for lane in &out {
                assert_eq!(lane.to_vec(), unhex(v.shake128), "{name}");
            }

            let mut out = [[0u8; 64]; 4];
            let [a, b, c, d] = &mut out;
            registry
                .try_x4_hash::<Shake256Algorithm>([a, b, c, d], input)
                .unwrap();
            for lane in &out {
                assert_eq!(lane.to_vec(), unhex(v.shake256), "{name}");
            }
        }
    }
}

#[test]
fn test_backends_agree_on_squeeze_schedule() {
    let inputs: Vec<Vec<u8>> = (0..4u8).map(|i| vec![i; 200]).collect();
    let schedule = [1usize, 0, 31, 168, 200, 7];
    let total: usize = schedule.iter().sum();

    let mut streams = Vec::new();
    for (_, registry) in registries() {
        let mut ctx = LaneXofContext::<Shake256Algorithm>::new();
        registry.try_x4_init(&mut ctx).unwrap();
        registry
            .try_x4_absorb(&mut ctx, [&inputs[0], &inputs[1], &inputs[2], &inputs[3]])
            .unwrap();
        registry.try_x4_finalize(&mut ctx).unwrap();

        let mut lanes = vec![Vec::new(); 4];
        for &len in &schedule {
            let mut out = [[0u8; 200]; 4];
            let [a, b, c, d] = &mut out;
            registry
                .try_x4_squeeze(&mut ctx, [&mut a[..len], &mut b[..len], &mut c[..len], &mut d[..len]])
                .unwrap();
            for (lane, chunk) in lanes.iter_mut().zip(&out) {
                lane.extend_from_slice(&chunk[..len]);
            }
        }
        assert_eq!(ctx.total_squeezed(), total);
        registry.try_x4_release(&mut ctx).unwrap();
        streams.push(lanes);
    }

    for other in &streams[1..] {
        assert_eq!(other, &streams[0]);
    }
}

static INITS: AtomicUsize = AtomicUsize::new(0);

/// SHA-256 that counts the sessions it opens
struct CountingSha256(Sha256);

impl DigestSession for CountingSha256 {
    fn absorb(&mut self, data: &[u8]) -> Result<()> {
        self.0.update(data)?;
        Ok(())
    }

    fn try_clone(&self) -> Result<Box<dyn DigestSession>> {
        Ok(Box::new(CountingSha256(self.0.clone())))
    }

    fn finalize_into(mut self: Box<Self>, out: &mut [u8]) -> Result<()> {
        out.copy_from_slice(self.0.finalize()?.as_ref());
        Ok(())
    }
}

fn counting_hash(out: &mut [u8], input: &[u8]) -> Result<()> {
    out.copy_from_slice(Sha256::digest(input)?.as_ref());
    Ok(())
}

fn counting_init() -> Result<Box<dyn DigestSession>> {
    INITS.fetch_add(1, Ordering::SeqCst);
    Ok(Box::new(CountingSha256(Sha256::new())))
}

#[test]
fn test_custom_backend_install() {
    let mut registry = BackendRegistry::new();
    registry.set_sha2_callbacks(Some(Sha2Callbacks {
        sha256: DigestCallbacks::with_session(counting_hash, counting_init),
        ..Sha2Callbacks::EMPTY
    }));

    let before = INITS.load(Ordering::SeqCst);
    let mut ctx = HashContext::<Sha256Algorithm>::new();
    registry.inc_init(&mut ctx);
    registry.inc_absorb(&mut ctx, b"abc");
    let mut digest = [0u8; 32];
    registry.inc_finalize(&mut digest, &mut ctx, b"");
    assert_eq!(INITS.load(Ordering::SeqCst), before + 1);
    assert_eq!(digest.to_vec(), unhex(HASH_VECTORS[1].sha256));

    // The rest of the family is now absent
    let mut d512 = [0u8; 64];
    registry.sha512(&mut d512, b"abc");
    assert_eq!(d512, [0u8; 64]);
    assert!(matches!(
        registry.try_hash::<Sha512Algorithm>(&mut d512, b"abc"),
        Err(Error::BackendUnavailable { .. })
    ));
}
