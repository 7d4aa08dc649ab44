use super::*;
use crate::xof::ShakeSession;
use std::cell::Cell;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
    static BUDGET: Cell<usize> = const { Cell::new(usize::MAX) };
}

fn live() -> isize {
    LIVE.with(Cell::get)
}

fn set_budget(n: usize) {
    BUDGET.with(|b| b.set(n));
}

/// One-shot session that counts live instances and fails once the budget of
/// successful opens and clones is spent
struct Counted {
    inner: OneShot<ShakeSession>,
}

impl Counted {
    fn make(inner: OneShot<ShakeSession>) -> Result<Self> {
        let left = BUDGET.with(Cell::get);
        if left == 0 {
            return Err(Error::Allocation {
                context: "test session",
            });
        }
        BUDGET.with(|b| b.set(left - 1));
        LIVE.with(|l| l.set(l.get() + 1));
        Ok(Counted { inner })
    }
}

impl Drop for Counted {
    fn drop(&mut self) {
        LIVE.with(|l| l.set(l.get() - 1));
    }
}

impl XofSession for Counted {
    fn open(variant: ShakeVariant) -> Result<Self> {
        Counted::make(OneShot::open(variant)?)
    }

    fn absorb(&mut self, data: &[u8]) -> Result<()> {
        self.inner.absorb(data)
    }

    fn try_clone(&self) -> Result<Self> {
        Counted::make(self.inner.try_clone()?)
    }

    fn finalize_into(self, out: &mut [u8]) -> Result<()> {
        self.inner.clone().finalize_into(out)
    }
}

fn inputs() -> [Vec<u8>; LANES] {
    [
        b"lane zero input".to_vec(),
        b"lane one input!".to_vec(),
        b"lane two input?".to_vec(),
        b"lane three inpt".to_vec(),
    ]
}

fn refs(v: &[Vec<u8>; LANES]) -> [&[u8]; LANES] {
    [&v[0], &v[1], &v[2], &v[3]]
}

/// Squeeze `schedule` byte counts and return each lane's concatenated output
fn run<S: XofSession>(
    variant: ShakeVariant,
    input: [&[u8]; LANES],
    schedule: &[usize],
) -> [Vec<u8>; LANES] {
    let mut xof = LaneXof::<S>::new(variant).unwrap();
    xof.absorb(input).unwrap();
    xof.finalize().unwrap();
    let mut acc: [Vec<u8>; LANES] = Default::default();
    for &len in schedule {
        let mut o = [vec![0u8; len], vec![0u8; len], vec![0u8; len], vec![0u8; len]];
        let [a, b, c, d] = &mut o;
        xof.squeeze([a, b, c, d]).unwrap();
        for (lane, chunk) in acc.iter_mut().zip(o) {
            lane.extend(chunk);
        }
    }
    assert_eq!(xof.total_squeezed(), schedule.iter().sum::<usize>());
    acc
}

fn expected(variant: ShakeVariant, input: &[u8], len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    ShakeSession::digest_into(variant, input, &mut out).unwrap();
    out
}

#[test]
fn test_emulated_matches_native() {
    let data = inputs();
    let schedule = [0usize, 5, 168, 1, 300, 136];
    for variant in [ShakeVariant::Shake128, ShakeVariant::Shake256] {
        let native = run::<ShakeSession>(variant, refs(&data), &schedule);
        let emulated = run::<OneShot<ShakeSession>>(variant, refs(&data), &schedule);
        assert_eq!(native, emulated);
        for (lane, out) in native.iter().enumerate() {
            assert_eq!(*out, expected(variant, &data[lane], out.len()));
        }
    }
}

#[test]
fn test_split_squeeze_three_byte_input() {
    let input: [&[u8]; LANES] = [b"abc", b"abc", b"abc", b"abc"];
    let whole = run::<OneShot<ShakeSession>>(ShakeVariant::Shake128, input, &[16]);
    let halves = run::<OneShot<ShakeSession>>(ShakeVariant::Shake128, input, &[8, 8]);
    assert_eq!(whole, halves);
    assert_eq!(
        hex::encode(&whole[0]),
        "5881092dd818bf5cf8a3ddb793fbcba7"
    );
}

#[test]
fn test_zero_length_squeeze_is_noop() {
    let data = inputs();
    let mut xof = LaneXof::<OneShot<ShakeSession>>::new(ShakeVariant::Shake256).unwrap();
    xof.absorb(refs(&data)).unwrap();
    let mut empty = [[0u8; 0]; LANES];
    let [a, b, c, d] = &mut empty;
    xof.squeeze([a, b, c, d]).unwrap();
    assert_eq!(xof.total_squeezed(), 0);
    // Still absorbing: nothing was squeezed
    xof.absorb([b"", b"", b"", b""]).unwrap();
}

#[test]
fn test_clone_isolation() {
    let data = inputs();
    let mut xof = LaneXof::<OneShot<ShakeSession>>::new(ShakeVariant::Shake128).unwrap();
    xof.absorb(refs(&data)).unwrap();
    let mut o = [[0u8; 10]; LANES];
    let [a, b, c, d] = &mut o;
    xof.squeeze([a, b, c, d]).unwrap();

    let mut copy = xof.try_clone().unwrap();
    assert_eq!(copy.total_squeezed(), 10);
    let mut junk = [[0u8; 50]; LANES];
    let [a, b, c, d] = &mut junk;
    copy.squeeze([a, b, c, d]).unwrap();
    drop(copy);

    let mut next = [[0u8; 20]; LANES];
    let [a, b, c, d] = &mut next;
    xof.squeeze([a, b, c, d]).unwrap();
    for lane in 0..LANES {
        assert_eq!(
            next[lane].to_vec(),
            expected(ShakeVariant::Shake128, &data[lane], 30)[10..]
        );
        assert_eq!(junk[lane].to_vec(), expected(ShakeVariant::Shake128, &data[lane], 60)[10..]);
    }
}

#[test]
fn test_reset_matches_fresh() {
    let data = inputs();
    let mut xof = LaneXof::<OneShot<ShakeSession>>::new(ShakeVariant::Shake256).unwrap();
    xof.absorb([b"xx", b"yy", b"zz", b"ww"]).unwrap();
    let mut o = [[0u8; 7]; LANES];
    let [a, b, c, d] = &mut o;
    xof.squeeze([a, b, c, d]).unwrap();

    xof.reset().unwrap();
    assert_eq!(xof.total_squeezed(), 0);
    xof.absorb(refs(&data)).unwrap();
    let mut after = [[0u8; 40]; LANES];
    let [a, b, c, d] = &mut after;
    xof.squeeze([a, b, c, d]).unwrap();

    let fresh = run::<ShakeSession>(ShakeVariant::Shake256, refs(&data), &[40]);
    for lane in 0..LANES {
        assert_eq!(after[lane].to_vec(), fresh[lane]);
    }
}

#[test]
fn test_unequal_lengths_rejected() {
    let mut xof = LaneXof::<ShakeSession>::new(ShakeVariant::Shake128).unwrap();
    assert!(xof.absorb([b"ab", b"ab", b"a", b"ab"]).is_err());

    let (mut a, mut b, mut c, mut d) = ([0u8; 4], [0u8; 4], [0u8; 4], [0u8; 3]);
    assert!(xof.squeeze([&mut a, &mut b, &mut c, &mut d]).is_err());
    assert_eq!(xof.total_squeezed(), 0);
}

#[test]
fn test_absorb_after_squeeze_rejected() {
    let mut xof = LaneXof::<OneShot<ShakeSession>>::new(ShakeVariant::Shake128).unwrap();
    let mut o = [[0u8; 1]; LANES];
    let [a, b, c, d] = &mut o;
    xof.squeeze([a, b, c, d]).unwrap();
    assert!(xof.absorb([b"x", b"x", b"x", b"x"]).is_err());
}

#[test]
fn test_init_failure_releases_opened_lanes() {
    set_budget(2);
    let res = LaneXof::<Counted>::new(ShakeVariant::Shake128);
    assert!(matches!(res, Err(Error::Allocation { .. })));
    assert_eq!(live(), 0);
}

#[test]
fn test_clone_failure_releases_cloned_lanes() {
    set_budget(usize::MAX);
    let xof = LaneXof::<Counted>::new(ShakeVariant::Shake128).unwrap();
    assert_eq!(live(), 4);

    set_budget(3);
    assert!(xof.try_clone().is_err());
    assert_eq!(live(), 4);
    drop(xof);
    assert_eq!(live(), 0);
}

#[test]
fn test_failed_reset_poisons() {
    let data = inputs();
    set_budget(usize::MAX);
    let mut xof = LaneXof::<Counted>::new(ShakeVariant::Shake128).unwrap();
    xof.absorb(refs(&data)).unwrap();

    set_budget(1);
    assert!(matches!(xof.reset(), Err(Error::Allocation { .. })));
    assert_eq!(live(), 4);
    set_budget(usize::MAX);
    let abc: &[u8] = b"abc";
    assert!(xof.absorb([abc; LANES]).is_err());
    let mut out = [[0u8; 16]; LANES];
    let [a, b, c, d] = &mut out;
    assert!(xof.squeeze([a, b, c, d]).is_err());
    assert_eq!(out, [[0u8; 16]; LANES]);

    xof.reset().unwrap();
    xof.absorb([abc; LANES]).unwrap();
    let [a, b, c, d] = &mut out;
    xof.squeeze([a, b, c, d]).unwrap();
    assert_eq!(out[0].to_vec(), expected(ShakeVariant::Shake128, b"abc", 16));
    drop(xof);
    assert_eq!(live(), 0);
}

#[test]
fn test_squeeze_failure_is_atomic() {
    let data = inputs();
    set_budget(usize::MAX);
    let mut xof = LaneXof::<Counted>::new(ShakeVariant::Shake256).unwrap();
    xof.absorb(refs(&data)).unwrap();
    let mut first = [[0u8; 5]; LANES];
    let [a, b, c, d] = &mut first;
    xof.squeeze([a, b, c, d]).unwrap();
    assert_eq!(live(), 4);

    // Scratch clones for lanes 0 and 1 succeed, lane 2 fails
    set_budget(2);
    let mut out = [[0xaau8; 9]; LANES];
    let [a, b, c, d] = &mut out;
    assert!(xof.squeeze([a, b, c, d]).is_err());
    assert_eq!(out, [[0xaau8; 9]; LANES]);
    assert_eq!(xof.total_squeezed(), 5);
    assert_eq!(live(), 4);

    set_budget(usize::MAX);
    let [a, b, c, d] = &mut out;
    xof.squeeze([a, b, c, d]).unwrap();
    for lane in 0..LANES {
        assert_eq!(
            out[lane].to_vec(),
            expected(ShakeVariant::Shake256, &data[lane], 14)[5..]
        );
    }
    drop(xof);
    assert_eq!(live(), 0);
}

mod props {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn emulated_squeeze_follows_stream(schedule in prop::collection::vec(0usize..300, 1..6)) {
            let data = inputs();
            let emulated = run::<OneShot<ShakeSession>>(ShakeVariant::Shake128, refs(&data), &schedule);
            let total: usize = schedule.iter().sum();
            for lane in 0..LANES {
                prop_assert_eq!(&emulated[lane], &expected(ShakeVariant::Shake128, &data[lane], total));
            }
        }
    }
}
