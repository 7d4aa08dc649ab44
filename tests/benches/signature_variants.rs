use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use switchcrypt_internal::{CpuExtension, CpuExtensions, StaticProbe};
use switchcrypt_sign::{provider_with_probe, SelectionPolicy, ALGORITHMS};

static EVERYTHING: StaticProbe = StaticProbe::new(CpuExtensions::from_slice(&CpuExtension::ALL));

fn bench_sign(c: &mut Criterion) {
    let mut group = c.benchmark_group("wots_sign");
    for name in ALGORITHMS {
        for policy in ["portable", "x4"] {
            let provider =
                provider_with_probe(name, &EVERYTHING, SelectionPolicy::parse(policy)).unwrap();
            let mut pk = vec![0u8; provider.length_public_key()];
            let mut sk = vec![0u8; provider.length_secret_key()];
            provider
                .keypair(&mut ChaCha20Rng::seed_from_u64(0), &mut pk, &mut sk)
                .unwrap();
            let mut sig = vec![0u8; provider.length_signature()];

            let id = BenchmarkId::new(*name, provider.selected_variant());
            group.bench_function(id, |b| {
                b.iter(|| provider.sign(black_box(&mut sig), black_box(b"message"), &sk).unwrap())
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_sign);
criterion_main!(benches);
