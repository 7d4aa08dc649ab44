//! Four-lane chain engine
//!
//! Chains are processed in groups of four through [`LaneXof`], one lockstep
//! SHAKE call per step. Lanes whose chain is already done, or that fall past
//! the last chain, hash a dummy input of the same length and their output is
//! dropped, so every group costs as many calls as its longest chain.

use core::array;

use zeroize::Zeroizing;

use switchcrypt_algorithms::xof::lanes::{LaneXof, LANES};
use switchcrypt_algorithms::xof::{ShakeSession, ShakeVariant};
use switchcrypt_params::pqc::wots::WotsParams;

use super::chain::{
    secret_input, secret_input_len, shake_variant, step_input, ChainDigits, ChainEngine,
    ChainValues, MAX_N, MAX_STEP_INPUT,
};
use crate::error::Result;

/// Computes four chain hashes per lockstep call
pub(crate) struct X4;

fn hash_lanes(
    variant: ShakeVariant,
    inputs: [&[u8]; LANES],
    outputs: [&mut [u8]; LANES],
) -> Result<()> {
    let mut xof = LaneXof::<ShakeSession>::new(variant)?;
    xof.absorb(inputs)?;
    xof.finalize()?;
    xof.squeeze(outputs)?;
    Ok(())
}

impl ChainEngine for X4 {
    fn derive_secrets<P: WotsParams>(
        pub_seed: &[u8],
        sk_seed: &[u8],
        values: &mut ChainValues,
    ) -> Result<()> {
        let variant = shake_variant::<P>();
        let (n, len) = (P::N, secret_input_len::<P>());
        for group in (0..P::LEN).step_by(LANES) {
            // Lanes past the end recompute the last chain
            let chains: [usize; LANES] = array::from_fn(|k| (group + k).min(P::LEN - 1));
            let inputs = chains.map(|chain| secret_input::<P>(pub_seed, sk_seed, chain));
            let mut outputs = Zeroizing::new([[0u8; MAX_N]; LANES]);
            let [i0, i1, i2, i3] = &inputs;
            let [o0, o1, o2, o3] = &mut *outputs;
            hash_lanes(
                variant,
                [&i0[..len], &i1[..len], &i2[..len], &i3[..len]],
                [&mut o0[..n], &mut o1[..n], &mut o2[..n], &mut o3[..n]],
            )?;
            for (k, output) in outputs.iter().enumerate() {
                if group + k < P::LEN {
                    values[group + k] = *output;
                }
            }
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
        let n = P::N;
        let idle = [0u8; MAX_N];
        let mut inputs = Zeroizing::new([[0u8; MAX_STEP_INPUT]; LANES]);
        let mut outputs = Zeroizing::new([[0u8; MAX_N]; LANES]);

        for group in (0..P::LEN).step_by(LANES) {
            let chains: [usize; LANES] = array::from_fn(|k| group + k);
            let is_active = |chain: usize, round: u8| chain < P::LEN && round < steps[chain];
            let rounds = chains
                .iter()
                .filter(|&&chain| chain < P::LEN)
                .map(|&chain| steps[chain])
                .max()
                .unwrap_or(0);

            for round in 0..rounds {
                let mut len = 0;
                for (k, &chain) in chains.iter().enumerate() {
                    len = if is_active(chain, round) {
                        step_input::<P>(pub_seed, chain, start[chain] + round, &values[chain], &mut inputs[k])
                    } else {
                        step_input::<P>(pub_seed, 0, 0, &idle, &mut inputs[k])
                    };
                }

                let [i0, i1, i2, i3] = &*inputs;
                let [o0, o1, o2, o3] = &mut *outputs;
                hash_lanes(
                    variant,
                    [&i0[..len], &i1[..len], &i2[..len], &i3[..len]],
                    [&mut o0[..n], &mut o1[..n], &mut o2[..n], &mut o3[..n]],
                )?;

                for (k, &chain) in chains.iter().enumerate() {
                    if is_active(chain, round) {
                        values[chain] = outputs[k];
                    }
                }
            }
        }
        Ok(())
    }
}
