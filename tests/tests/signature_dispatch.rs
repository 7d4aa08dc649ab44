//! Provider lookup and variant selection across the signature crate

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use switchcrypt_internal::{CpuExtension, CpuExtensions, StaticProbe};
use switchcrypt_sign::{provider_new, provider_with_probe, SelectionPolicy, SignatureProvider, ALGORITHMS};

static NO_EXTENSIONS: StaticProbe = StaticProbe::none();
static EVERYTHING: StaticProbe = StaticProbe::new(CpuExtensions::from_slice(&CpuExtension::ALL));

fn keys(provider: &SignatureProvider, seed: u64) -> (Vec<u8>, Vec<u8>) {
    let mut pk = vec![0u8; provider.length_public_key()];
    let mut sk = vec![0u8; provider.length_secret_key()];
    provider
        .keypair(&mut ChaCha20Rng::seed_from_u64(seed), &mut pk, &mut sk)
        .unwrap();
    (pk, sk)
}

#[test]
fn test_every_listed_algorithm_roundtrips() {
    for name in ALGORITHMS {
        let provider = provider_new(name).unwrap();
        let (pk, sk) = keys(&provider, 3);
        let mut sig = vec![0u8; provider.length_signature()];
        provider.sign(&mut sig, b"dispatch", &sk).unwrap();
        provider.verify(b"dispatch", &sig, &pk).unwrap();
        assert!(provider.verify(b"dispatcH", &sig, &pk).is_err());
    }
}

#[test]
fn test_variants_are_interchangeable() {
    for name in ALGORITHMS {
        let providers: Vec<_> = [
            SelectionPolicy::Auto,
            SelectionPolicy::Portable,
            SelectionPolicy::parse("x4"),
        ]
        .into_iter()
        .flat_map(|policy| {
            [
                provider_with_probe(name, &EVERYTHING, policy.clone()).unwrap(),
                provider_with_probe(name, &NO_EXTENSIONS, policy).unwrap(),
            ]
        })
        .collect();

        let reference = keys(&providers[0], 11);
        let mut expected = vec![0u8; providers[0].length_signature()];
        providers[0].sign(&mut expected, b"same bytes", &reference.1).unwrap();

        for provider in &providers {
            assert_eq!(keys(provider, 11), reference, "{}", provider.selected_variant());
            let mut sig = vec![0u8; provider.length_signature()];
            provider.sign(&mut sig, b"same bytes", &reference.1).unwrap();
            assert_eq!(sig, expected, "{}", provider.selected_variant());
            provider.verify(b"same bytes", &expected, &reference.0).unwrap();
        }
    }
}

#[test]
fn test_selection_follows_probe() {
    let name = ALGORITHMS[0];
    let bare = provider_with_probe(name, &NO_EXTENSIONS, SelectionPolicy::Auto).unwrap();
    let rich = provider_with_probe(name, &EVERYTHING, SelectionPolicy::Auto).unwrap();
    let accelerated = rich.variant_names().len() > 1;

    assert_eq!(rich.selected_variant(), if accelerated { "x4" } else { "portable" });
    if cfg!(target_arch = "x86_64") || cfg!(target_arch = "aarch64") {
        assert!(accelerated);
    }
    // Default features probe the CPU, so a bare CPU gets portable code
    assert_eq!(bare.selected_variant(), "portable");
}

#[test]
fn test_compiled_out_or_unknown_is_none() {
    assert!(provider_new("sphincs-shake-128f").is_none());
    if !ALGORITHMS.contains(&"wots-shake256-w16") {
        assert!(provider_new("wots-shake256-w16").is_none());
    }
}

#[test]
fn test_metadata_is_fixed_across_policies() {
    for name in ALGORITHMS {
        let a = provider_with_probe(name, &EVERYTHING, SelectionPolicy::Auto).unwrap();
        let b = provider_with_probe(name, &NO_EXTENSIONS, SelectionPolicy::Portable).unwrap();
        assert_eq!(a.method_name(), b.method_name());
        assert_eq!(a.alg_version(), b.alg_version());
        assert_eq!(a.claimed_nist_level(), b.claimed_nist_level());
        assert!(!a.euf_cma());
        assert_eq!(a.length_public_key(), b.length_public_key());
        assert_eq!(a.length_secret_key(), b.length_secret_key());
        assert_eq!(a.length_signature(), b.length_signature());
    }
}
