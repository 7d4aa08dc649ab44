//! Registries configured with each bundled backend

use switchcrypt_algorithms::backend::{reference, BackendRegistry};

/// Every registry configuration the conformance tests run against, by name
pub fn registries() -> Vec<(&'static str, BackendRegistry)> {
    let mut configs = vec![("reference", BackendRegistry::new())];

    let mut oneshot = BackendRegistry::new();
    oneshot.set_shake_x4_callbacks(Some(reference::oneshot_shake_x4_callbacks()));
    configs.push(("reference-oneshot", oneshot));

    #[cfg(feature = "rustcrypto")]
    {
        use switchcrypt_algorithms::backend::rustcrypto;
        let mut registry = BackendRegistry::new();
        registry.set_sha2_callbacks(Some(rustcrypto::sha2_callbacks()));
        registry.set_shake_x4_callbacks(Some(rustcrypto::shake_x4_callbacks()));
        configs.push(("rustcrypto", registry));
    }

    configs
}
