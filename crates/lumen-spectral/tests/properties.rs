//! Property tests for the magnitude primitives.

use lumen_core::Sample;
use lumen_spectral::{reduce, sqrt_rounded};
use proptest::prelude::*;

proptest! {
    #[test]
    fn sqrt_rounded_agrees_with_float(input in any::<u32>()) {
        let expect = f64::from(input).sqrt().round() as u32;
        prop_assert_eq!(sqrt_rounded(input), expect);
    }

    #[test]
    fn sqrt_rounded_is_monotone(a in any::<u32>(), b in any::<u32>()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(sqrt_rounded(lo) <= sqrt_rounded(hi));
    }

    #[test]
    fn reduce_output_is_in_range(
        mut buf in prop::collection::vec(any::<Sample>(), 2..=64usize)
            .prop_filter("even length", |v| v.len() % 2 == 0),
        sqrt in any::<bool>(),
    ) {
        let n = buf.len();
        reduce(&mut buf, sqrt);
        for &m in &buf[..n / 2] {
            prop_assert!(m >= 0);
        }
        prop_assert!(buf[n / 2..].iter().all(|&s| s == 0));
    }
}
