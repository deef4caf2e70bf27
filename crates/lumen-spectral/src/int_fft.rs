//! Integer radix-2 FFT backend.
//!
//! A fixed-point decimation-in-time FFT in the classic fix_fft mold: i16
//! twiddles from a 3/4-wave sine table, a rounding 15-bit fractional
//! multiply, and an unconditional per-stage `>> 1` so values can never
//! leave the i16 range. The per-stage scaling means the output spectrum
//! is `X[k] / N`; callers feed reasonably hot input (the analyzer windows
//! full-range microphone samples) so the buckets stay usable.
//!
//! The transform itself runs on separate real/imaginary arrays owned by
//! the backend. Afterwards the two half-length arrays are merged back
//! into the caller's buffer as interleaved pairs by a strided copy that
//! walks both arrays backward from the midpoint, per the shared
//! [`Transform`](crate::Transform) contract.
//!
//! The sine table is instance-owned and built lazily on the first
//! transform, like every coefficient table in this crate.

use crate::transform::Transform;
use lumen_core::Sample;
use std::cell::OnceCell;
use std::f32::consts::TAU;

/// Fractional multiply of two Q15 values, with arithmetic rounding on the
/// dropped bit.
#[inline]
fn fix_mpy(a: i16, b: i16) -> i16 {
    let c = (i32::from(a) * i32::from(b)) >> 14;
    ((c >> 1) + (c & 1)) as i16
}

/// Fixed-point FFT backend on separate integer re/im arrays.
pub struct IntFft {
    size: usize,
    log2: u32,
    re: Vec<i16>,
    im: Vec<i16>,
    /// 3/4 of a sine period is enough to read both sin and cos for the
    /// first quadrant sweep the butterflies make.
    sine: OnceCell<Vec<i16>>,
}

impl IntFft {
    /// Create a backend for `size`-point transforms. `size` must be a
    /// power of two; anything else is a caller contract violation.
    pub fn new(size: usize) -> Self {
        debug_assert!(size.is_power_of_two() && size >= 4);
        Self {
            size,
            log2: size.trailing_zeros(),
            re: vec![0; size],
            im: vec![0; size],
            sine: OnceCell::new(),
        }
    }
}

impl Transform for IntFft {
    fn size(&self) -> usize {
        self.size
    }

    fn forward(&mut self, buf: &mut [Sample]) {
        debug_assert_eq!(buf.len(), self.size);
        let n = self.size;

        self.re.copy_from_slice(buf);
        self.im.fill(0);

        // Decimation in time: bit-reversal reorder.
        let mut mr = 0usize;
        for m in 1..n {
            let mut l = n;
            loop {
                l >>= 1;
                if mr + l <= n - 1 {
                    break;
                }
            }
            mr = (mr & (l - 1)) + l;
            if mr <= m {
                continue;
            }
            self.re.swap(m, mr);
            self.im.swap(m, mr);
        }

        // Lazily built here, not in a &self helper, so the borrow stays
        // scoped to the `sine` field while `re`/`im` are mutated below.
        let sine = self.sine.get_or_init(|| {
            #[cfg(feature = "tracing")]
            tracing::debug!(size = n, "building sine table");
            (0..n * 3 / 4)
                .map(|i| (32767.0 * libm::sinf(TAU * i as f32 / n as f32)) as i16)
                .collect()
        });

        // Butterflies with fixed per-stage scaling.
        let mut l = 1usize;
        let mut k = self.log2 - 1;
        loop {
            let istep = l << 1;
            for m in 0..l {
                let j = m << k;
                let wr = sine[j + n / 4] >> 1; // cos
                let wi = (-sine[j]) >> 1; // -sin
                let mut i = m;
                while i < n {
                    let jj = i + l;
                    let tr = fix_mpy(wr, self.re[jj]).wrapping_sub(fix_mpy(wi, self.im[jj]));
                    let ti = fix_mpy(wr, self.im[jj]).wrapping_add(fix_mpy(wi, self.re[jj]));
                    let qr = self.re[i] >> 1;
                    let qi = self.im[i] >> 1;
                    self.re[jj] = qr.wrapping_sub(tr);
                    self.im[jj] = qi.wrapping_sub(ti);
                    self.re[i] = qr.wrapping_add(tr);
                    self.im[i] = qi.wrapping_add(ti);
                    i += istep;
                }
            }
            l = istep;
            if l >= n {
                break;
            }
            k -= 1;
        }

        // Merge the half-length re/im arrays into interleaved pairs,
        // walking backward from the midpoint so nothing is clobbered
        // before it is read.
        for idx in (0..n / 2).rev() {
            buf[2 * idx + 1] = self.im[idx];
            buf[2 * idx] = self.re[idx];
        }
    }
}
