//! Properties of the 4-lane XOF engine, native and emulated

use proptest::prelude::*;

use switchcrypt_algorithms::xof::lanes::{LaneXof, LANES};
use switchcrypt_algorithms::xof::{OneShot, ShakeSession, ShakeVariant, XofSession};

fn variant() -> impl Strategy<Value = ShakeVariant> {
    prop_oneof![Just(ShakeVariant::Shake128), Just(ShakeVariant::Shake256)]
}

/// Four distinct inputs of one shared length
fn lane_inputs() -> impl Strategy<Value = [Vec<u8>; LANES]> {
    (0usize..400).prop_flat_map(|len| {
        [
            prop::collection::vec(any::<u8>(), len),
            prop::collection::vec(any::<u8>(), len),
            prop::collection::vec(any::<u8>(), len),
            prop::collection::vec(any::<u8>(), len),
        ]
    })
}

fn absorbed<S: XofSession>(variant: ShakeVariant, inputs: &[Vec<u8>; LANES]) -> LaneXof<S> {
    let mut xof = LaneXof::<S>::new(variant).unwrap();
    xof.absorb([&inputs[0], &inputs[1], &inputs[2], &inputs[3]]).unwrap();
    xof.finalize().unwrap();
    xof
}

/// Runs the squeeze schedule and returns each lane's concatenated output
fn squeeze_all<S: XofSession>(xof: &mut LaneXof<S>, schedule: &[usize]) -> Vec<Vec<u8>> {
    let mut lanes = vec![Vec::new(); LANES];
    for &len in schedule {
        let mut out = vec![0u8; len * LANES];
        let (ab, cd) = out.split_at_mut(2 * len);
        let (a, b) = ab.split_at_mut(len);
        let (c, d) = cd.split_at_mut(len);
        xof.squeeze([a, b, c, d]).unwrap();
        for (lane, chunk) in lanes.iter_mut().zip(out.chunks(len.max(1))) {
            lane.extend_from_slice(chunk);
        }
    }
    lanes
}

fn one_call(len: usize, variant: ShakeVariant, input: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; len];
    ShakeSession::digest_into(variant, input, &mut out).unwrap();
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn split_squeeze_matches_single_call(
        variant in variant(),
        inputs in lane_inputs(),
        schedule in prop::collection::vec(0usize..200, 1..6),
    ) {
        let total: usize = schedule.iter().sum();
        let mut native = absorbed::<ShakeSession>(variant, &inputs);
        let mut emulated = absorbed::<OneShot<ShakeSession>>(variant, &inputs);

        let native_out = squeeze_all(&mut native, &schedule);
        let emulated_out = squeeze_all(&mut emulated, &schedule);

        prop_assert_eq!(native.total_squeezed(), total);
        prop_assert_eq!(emulated.total_squeezed(), total);
        for (k, input) in inputs.iter().enumerate() {
            let expected = one_call(total, variant, input);
            prop_assert_eq!(&native_out[k], &expected);
            prop_assert_eq!(&emulated_out[k], &expected);
        }
    }

    #[test]
    fn clone_is_isolated(
        variant in variant(),
        inputs in lane_inputs(),
        first in 0usize..100,
        second in 1usize..100,
    ) {
        let mut original = absorbed::<OneShot<ShakeSession>>(variant, &inputs);
        squeeze_all(&mut original, &[first]);

        let mut copy = original.try_clone().unwrap();
        prop_assert_eq!(copy.total_squeezed(), first);
        // Advance the copy well past the original
        squeeze_all(&mut copy, &[second, second]);

        let from_original = squeeze_all(&mut original, &[second]);
        let mut reference = absorbed::<ShakeSession>(variant, &inputs);
        let expected = squeeze_all(&mut reference, &[first, second]);
        for k in 0..LANES {
            prop_assert_eq!(&from_original[k][..], &expected[k][first..]);
        }
    }

    #[test]
    fn reset_matches_fresh_init(
        variant in variant(),
        stale in lane_inputs(),
        inputs in lane_inputs(),
        len in 1usize..300,
    ) {
        let mut reused = absorbed::<OneShot<ShakeSession>>(variant, &stale);
        squeeze_all(&mut reused, &[len]);
        reused.reset().unwrap();
        prop_assert_eq!(reused.total_squeezed(), 0);
        reused.absorb([&inputs[0], &inputs[1], &inputs[2], &inputs[3]]).unwrap();
        reused.finalize().unwrap();

        let mut fresh = absorbed::<OneShot<ShakeSession>>(variant, &inputs);
        prop_assert_eq!(squeeze_all(&mut reused, &[len]), squeeze_all(&mut fresh, &[len]));
    }
}

#[test]
fn test_three_byte_input_split_squeeze() {
    let input = [b"abc".to_vec(), b"abc".to_vec(), b"abc".to_vec(), b"abc".to_vec()];
    let mut whole = absorbed::<OneShot<ShakeSession>>(ShakeVariant::Shake128, &input);
    let mut halves = absorbed::<OneShot<ShakeSession>>(ShakeVariant::Shake128, &input);

    let whole_out = squeeze_all(&mut whole, &[16]);
    let halves_out = squeeze_all(&mut halves, &[8, 8]);
    assert_eq!(whole_out, halves_out);
    assert_eq!(hex::encode(&whole_out[0]), "5881092dd818bf5cf8a3ddb793fbcba7");
}
