//! Magnitude reduction: interleaved complex pairs to per-bucket energy.
//!
//! After a forward transform the buffer holds `N/2` interleaved
//! `(re, im)` pairs. Reduction collapses each pair to `re² + im²` in an
//! unsigned 32-bit intermediate (exact over the full 16-bit bin range;
//! the signed sum would overflow for a pair of full-scale bins),
//! optionally takes the rounded integer square root, and packs the
//! results into the first `N/2` slots. The back half of the buffer is
//! defined to be zero afterwards — consumers treat it as "no data".

use lumen_core::Sample;

/// Integer square root with arithmetic rounding: a true fractional part
/// of 0.5 or more rounds the result up.
///
/// Digit-by-digit radical extraction, two bits per step.
///
/// ```rust
/// use lumen_spectral::sqrt_rounded;
///
/// assert_eq!(sqrt_rounded(2), 1);
/// assert_eq!(sqrt_rounded(3), 2);
/// assert_eq!(sqrt_rounded(8), 3);
/// ```
pub fn sqrt_rounded(input: u32) -> u32 {
    let mut op = input;
    let mut res = 0u32;
    // Highest power of four at or below the argument.
    let mut one = 1u32 << 30;
    while one > op {
        one >>= 2;
    }

    while one != 0 {
        if op >= res + one {
            op -= res + one;
            res += 2 * one;
        }
        res >>= 1;
        one >>= 2;
    }

    // Arithmetic rounding: the remainder exceeding the root means the
    // true fractional part was at least one half.
    if op > res {
        res += 1;
    }
    res
}

/// Collapse interleaved `(re, im)` pairs into per-bucket magnitudes in
/// place. With `sqrt` the bucket is the rounded amplitude; without it,
/// the raw energy `re² + im²` (saturated into the sample range). Buckets
/// at and beyond `N/2` are zero-filled.
pub fn reduce(buf: &mut [Sample], sqrt: bool) {
    let n = buf.len();
    debug_assert_eq!(n % 2, 0);

    for k in (0..n).step_by(2) {
        let re = i32::from(buf[k]);
        let im = i32::from(buf[k + 1]);
        // Each square fits i32, the sum of two full-scale squares does
        // not; u32 holds it exactly.
        let mut out = (re * re) as u32 + (im * im) as u32;
        if sqrt {
            out = sqrt_rounded(out);
        }
        buf[k / 2] = out.min(Sample::MAX as u32) as Sample;
    }

    for s in &mut buf[n / 2..] {
        *s = 0;
    }
}
