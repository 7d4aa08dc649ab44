//! Single-lane chain engine

use zeroize::Zeroizing;

use switchcrypt_algorithms::xof::ShakeSession;
use switchcrypt_params::pqc::wots::WotsParams;

use super::chain::{
    secret_input, secret_input_len, shake_variant, step_input, ChainDigits, ChainEngine,
    ChainValues, MAX_STEP_INPUT,
};
use crate::error::Result;

/// Computes one chain hash per SHAKE call
pub(crate) struct Portable;

impl ChainEngine for Portable {
    fn derive_secrets<P: WotsParams>(
        pub_seed: &[u8],
        sk_seed: &[u8],
        values: &mut ChainValues,
    ) -> Result<()> {
        let variant = shake_variant::<P>();
        for (chain, value) in values.iter_mut().enumerate().take(P::LEN) {
            let input = secret_input::<P>(pub_seed, sk_seed, chain);
            ShakeSession::digest_into(variant, &input[..secret_input_len::<P>()], &mut value[..P::N])?;
        }
        Ok(())
    }

    fn advance<P: WotsParams>(
        pub_seed: &[u8],
        values: &mut ChainValues,
        start: &ChainDigits,
        steps: &ChainDigits,
    ) -> Result<()> {
        let variant = shake_variant::<P>();
        let mut buf = Zeroizing::new([0u8; MAX_STEP_INPUT]);
        for (chain, value) in values.iter_mut().enumerate().take(P::LEN) {
            for position in start[chain]..start[chain] + steps[chain] {
                let len = step_input::<P>(pub_seed, chain, position, &value[..], &mut buf);
                ShakeSession::digest_into(variant, &buf[..len], &mut value[..P::N])?;
            }
        }
        Ok(())
    }
}
