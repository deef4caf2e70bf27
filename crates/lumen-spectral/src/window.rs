//! Hanning window over integer sample buffers.
//!
//! Tapers the buffer edges toward zero before the transform to reduce
//! spectral leakage:
//!
//! ```text
//! w(n) = 0.5 - 0.5 * cos(2π * n / (N - 1))
//! ```
//!
//! The integer path scales the coefficients into `[0, 0x8000)` and applies
//! them with a 15-bit multiply-and-shift, matching the float path within
//! integer rounding. Both paths subtract a bias first, since the window
//! assumes zero-centered input (see `lumen_core::filters::BiasCalc`).
//!
//! The coefficient table is owned by the instance and built once on first
//! use, so independent pipelines never share tables.

use lumen_core::Sample;
use std::cell::OnceCell;
use std::f32::consts::TAU;

/// Hanning window of a fixed size, with a lazily-built integer
/// coefficient table.
#[derive(Debug)]
pub struct Hanning {
    size: usize,
    coeffs: OnceCell<Vec<i16>>,
}

impl Hanning {
    /// Create a window for buffers of `size` samples. The coefficient
    /// table is not built until the first integer apply.
    pub fn new(size: usize) -> Self {
        debug_assert!(size >= 2);
        Self {
            size,
            coeffs: OnceCell::new(),
        }
    }

    /// Window size in samples.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The float coefficient for position `n`, in `[0, 1]`.
    fn coefficient(&self, n: usize) -> f32 {
        let mult = 1.0 / (self.size - 1) as f32;
        0.5 - 0.5 * libm::cosf(TAU * n as f32 * mult)
    }

    fn coeffs(&self) -> &[i16] {
        self.coeffs.get_or_init(|| {
            #[cfg(feature = "tracing")]
            tracing::debug!(size = self.size, "building hanning coefficient table");
            (0..self.size)
                .map(|n| {
                    // [0, 1] -> [0, 0x7fff]
                    let scaled = (32768.0 * self.coefficient(n)) as i32;
                    scaled.min(0x7fff) as i16
                })
                .collect()
        })
    }

    /// Apply the window in place with the integer table, subtracting
    /// `bias` from each sample first.
    pub fn apply(&self, buf: &mut [Sample], bias: Sample) {
        debug_assert_eq!(buf.len(), self.size);
        for (s, &c) in buf.iter_mut().zip(self.coeffs()) {
            let val = i32::from(*s) - i32::from(bias);
            *s = ((val * i32::from(c)) >> 15) as Sample;
        }
    }

    /// Apply the window in place with float math. Reference path; the
    /// integer apply matches it within rounding.
    pub fn apply_f32(&self, buf: &mut [Sample], bias: f32) {
        debug_assert_eq!(buf.len(), self.size);
        for (n, s) in buf.iter_mut().enumerate() {
            *s = ((f32::from(*s) - bias) * self.coefficient(n)) as Sample;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_taper_center_passes() {
        let w = Hanning::new(64);
        let mut buf = [10000 as Sample; 64];
        w.apply(&mut buf, 0);

        assert_eq!(buf[0], 0);
        assert_eq!(buf[63], 0);
        // The two middle samples straddle the peak of the cosine bump.
        assert!(i32::from(buf[31]) > 9900);
        assert!(i32::from(buf[32]) > 9900);
    }

    #[test]
    fn integer_matches_float_within_rounding() {
        let w = Hanning::new(128);
        let mut int_buf = [0 as Sample; 128];
        let mut float_buf = [0 as Sample; 128];
        for i in 0..128 {
            let v = ((i as i32 * 517) % 16001 - 8000) as Sample;
            int_buf[i] = v;
            float_buf[i] = v;
        }

        w.apply(&mut int_buf, 0);
        w.apply_f32(&mut float_buf, 0.0);

        for (i, (a, b)) in int_buf.iter().zip(float_buf.iter()).enumerate() {
            let diff = (i32::from(*a) - i32::from(*b)).abs();
            assert!(diff <= 2, "sample {i}: integer {a} vs float {b}");
        }
    }

    #[test]
    fn bias_is_removed_before_weighting() {
        let w = Hanning::new(64);
        // Constant buffer equal to the bias windows to exactly zero.
        let mut buf = [500 as Sample; 64];
        w.apply(&mut buf, 500);
        assert!(buf.iter().all(|&s| s == 0));
    }

    #[test]
    fn table_is_instance_owned() {
        // Two windows of different sizes coexist; tables never collide.
        let a = Hanning::new(32);
        let b = Hanning::new(64);
        let mut buf_a = [1000 as Sample; 32];
        let mut buf_b = [1000 as Sample; 64];
        a.apply(&mut buf_a, 0);
        b.apply(&mut buf_b, 0);
        assert_eq!(buf_a[0], 0);
        assert_eq!(buf_b[0], 0);
    }
}
