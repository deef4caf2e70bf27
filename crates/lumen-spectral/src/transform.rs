//! Transform backend contract and the float (rustfft) backend.
//!
//! Every backend shares one buffer contract: the caller hands in `N` real
//! samples `[r, r, r, ...]` and gets back the first `N/2` frequency bins
//! as interleaved pairs `[r, i, r, i, ...]` in the same buffer. The
//! magnitude stage (`crate::magnitude::reduce`) then collapses the pairs.
//!
//! The transform size is fixed when a backend is constructed; there is no
//! runtime reconfiguration. A wrong-size buffer is a caller contract
//! violation, checked only by `debug_assert`.
//!
//! [`FloatFft`] is the accurate backend: it delegates to `rustfft` through
//! a one-time planned FFT that is owned by the backend and reused across
//! calls. Planning is the single fallible setup step in the whole pipeline
//! (spectral sizes must be powers of two), surfaced as [`SpectralError`]
//! before any transform call can happen.

use lumen_core::Sample;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;
use std::sync::Arc;
use thiserror::Error;

/// Spectral pipeline setup errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpectralError {
    /// Transform sizes must be powers of two (and large enough to have a
    /// meaningful spectrum).
    #[error("transform size {0} is not a power of two >= 4")]
    InvalidSize(usize),
}

/// A forward transform backend.
///
/// Implementations own whatever setup state they need (FFT plans, sine
/// tables, scratch buffers) and are used by exactly one pipeline at a
/// time; none of them lock internally.
pub trait Transform {
    /// The fixed transform size `N`.
    fn size(&self) -> usize;

    /// Forward-transform `N` real samples into `N/2` interleaved
    /// `(re, im)` pairs, in place.
    fn forward(&mut self, buf: &mut [Sample]);
}

/// Floating-point FFT backend over `rustfft`.
///
/// Output bins are scaled by `2/N` so a full-scale windowed tone lands
/// near full scale in the `i16` output instead of overflowing it; the
/// final cast saturates.
pub struct FloatFft {
    size: usize,
    fft: Arc<dyn rustfft::Fft<f32>>,
    bins: Vec<Complex<f32>>,
}

impl FloatFft {
    /// Plan a forward FFT of `size` points. The plan is built once here
    /// and reused for every [`Transform::forward`] call.
    pub fn new(size: usize) -> Result<Self, SpectralError> {
        if !size.is_power_of_two() || size < 4 {
            return Err(SpectralError::InvalidSize(size));
        }
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        #[cfg(feature = "tracing")]
        tracing::debug!(size, "planned forward fft");
        Ok(Self {
            size,
            fft,
            bins: vec![Complex::new(0.0, 0.0); size],
        })
    }
}

impl Transform for FloatFft {
    fn size(&self) -> usize {
        self.size
    }

    fn forward(&mut self, buf: &mut [Sample]) {
        debug_assert_eq!(buf.len(), self.size);

        for (c, &s) in self.bins.iter_mut().zip(buf.iter()) {
            *c = Complex::new(f32::from(s), 0.0);
        }
        self.fft.process(&mut self.bins);

        // Only bins below Nyquist are meaningful for real input; pack
        // them as interleaved pairs over the whole buffer.
        let scale = 2.0 / self.size as f32;
        for k in 0..self.size / 2 {
            buf[2 * k] = (self.bins[k].re * scale) as Sample;
            buf[2 * k + 1] = (self.bins[k].im * scale) as Sample;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    #[test]
    fn rejects_non_power_of_two() {
        for bad in [100, 0, 2] {
            assert!(
                matches!(FloatFft::new(bad), Err(SpectralError::InvalidSize(s)) if s == bad),
                "size {bad} should be rejected"
            );
        }
        assert!(FloatFft::new(64).is_ok());
    }

    #[test]
    fn dc_lands_in_bin_zero() {
        let mut fft = FloatFft::new(64).unwrap();
        let mut buf = [1000 as Sample; 64];
        fft.forward(&mut buf);

        // DC bin: sum of samples * 2/N = 2000; everything else ~zero.
        assert!((i32::from(buf[0]) - 2000).abs() <= 2);
        for k in 1..32 {
            assert!(i32::from(buf[2 * k]).abs() <= 2, "bin {k} leaked");
            assert!(i32::from(buf[2 * k + 1]).abs() <= 2, "bin {k} leaked");
        }
    }

    #[test]
    fn pure_tone_lands_in_its_bin() {
        let mut fft = FloatFft::new(64).unwrap();
        let mut buf = [0 as Sample; 64];
        for (n, s) in buf.iter_mut().enumerate() {
            *s = (8000.0 * libm::cosf(TAU * 5.0 * n as f32 / 64.0)) as Sample;
        }
        fft.forward(&mut buf);

        // Unwindowed integral-bin tone: bin 5 real part = amplitude.
        assert!((i32::from(buf[2 * 5]) - 8000).abs() <= 8);
        for k in (0..32).filter(|&k| k != 5) {
            let mag = i32::from(buf[2 * k]).abs() + i32::from(buf[2 * k + 1]).abs();
            assert!(mag <= 16, "bin {k} has energy {mag}");
        }
    }
}
