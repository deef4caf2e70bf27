//! Single-pole smoothing and bias filters for raw sample buffers.
//!
//! These run ahead of the spectral pipeline: the windowing stage assumes
//! zero-centered input, and a microphone's raw stream carries a DC offset,
//! so a bias is measured once per cycle and subtracted from every sample.
//! The low/high-pass pair is the usual exponential running average,
//!
//! ```text
//! avg = sample * alpha + avg * (1 - alpha)
//! ```
//!
//! seeded from the first sample seen rather than zero, so there is no
//! startup transient to settle out. Low-pass emits the average; high-pass
//! emits the residual `sample - avg` — that residual is the only
//! difference between the two.
//!
//! Each filter is a single-purpose stateful object: one alpha, one running
//! average, reset by [`reset`](LowPass::reset) or reconstruction.

/// A raw audio sample. Full `i16` range represents `(-1, 1)`.
pub type Sample = i16;

/// Whole-buffer filter over raw samples.
///
/// `dst` and `src` have equal length and are not aliased.
pub trait Filter {
    /// Filter `src` into `dst`, advancing internal state.
    fn apply(&mut self, dst: &mut [Sample], src: &[Sample]);
}

/// Exponential running-average low-pass.
#[derive(Debug, Clone)]
pub struct LowPass {
    alpha: f32,
    alpha_minus: f32,
    avg: f32,
    seeded: bool,
}

impl LowPass {
    /// Create with the given smoothing factor. `alpha` is the weight of
    /// the incoming sample; `0.9` tracks quickly, `0.1` smooths hard.
    pub fn new(alpha: f32) -> Self {
        let mut filter = Self {
            alpha: 0.0,
            alpha_minus: 0.0,
            avg: 0.0,
            seeded: false,
        };
        filter.set_alpha(alpha);
        filter
    }

    /// Change the smoothing factor without disturbing the running average.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
        self.alpha_minus = 1.0 - alpha;
    }

    /// Forget the running average; the next buffer re-seeds it.
    pub fn reset(&mut self) {
        self.avg = 0.0;
        self.seeded = false;
    }

    fn seed(&mut self, src: &[Sample]) {
        if !self.seeded {
            if let Some(&first) = src.first() {
                self.avg = f32::from(first);
                self.seeded = true;
            }
        }
    }

    #[inline]
    fn step(&mut self, sample: Sample) -> f32 {
        self.avg = f32::from(sample) * self.alpha + self.avg * self.alpha_minus;
        self.avg
    }
}

impl Filter for LowPass {
    fn apply(&mut self, dst: &mut [Sample], src: &[Sample]) {
        debug_assert_eq!(dst.len(), src.len());
        self.seed(src);
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = self.step(s) as Sample;
        }
    }
}

/// Exponential running-average high-pass: emits the residual against the
/// same running average [`LowPass`] keeps.
#[derive(Debug, Clone)]
pub struct HighPass {
    inner: LowPass,
}

impl HighPass {
    /// Create with the given smoothing factor for the tracked average.
    pub fn new(alpha: f32) -> Self {
        Self {
            inner: LowPass::new(alpha),
        }
    }

    /// Change the smoothing factor without disturbing the running average.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.inner.set_alpha(alpha);
    }

    /// Forget the running average; the next buffer re-seeds it.
    pub fn reset(&mut self) {
        self.inner.reset();
    }
}

impl Filter for HighPass {
    fn apply(&mut self, dst: &mut [Sample], src: &[Sample]) {
        debug_assert_eq!(dst.len(), src.len());
        self.inner.seed(src);
        for (d, &s) in dst.iter_mut().zip(src) {
            let avg = self.inner.step(s);
            *d = (f32::from(s) - avg) as Sample;
        }
    }
}

/// Measures the arithmetic mean of a buffer. Run once per cycle; feed the
/// result to [`BiasApply`] or the windowing stage.
#[derive(Debug, Clone, Default)]
pub struct BiasCalc {
    bias: Sample,
}

impl BiasCalc {
    /// Create with zero bias.
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure `src` and store its mean.
    pub fn measure(&mut self, src: &[Sample]) {
        debug_assert!(!src.is_empty());
        let sum: i32 = src.iter().map(|&s| i32::from(s)).sum();
        self.bias = (sum / src.len() as i32) as Sample;
    }

    /// The last measured mean.
    pub fn bias(&self) -> Sample {
        self.bias
    }
}

impl Filter for BiasCalc {
    /// Measures only; `dst` is left untouched.
    fn apply(&mut self, _dst: &mut [Sample], src: &[Sample]) {
        self.measure(src);
    }
}

/// Subtracts a previously measured bias from every sample.
#[derive(Debug, Clone, Default)]
pub struct BiasApply {
    bias: Sample,
}

impl BiasApply {
    /// Create with the bias to subtract.
    pub fn new(bias: Sample) -> Self {
        Self { bias }
    }

    /// Replace the bias.
    pub fn set_bias(&mut self, bias: Sample) {
        self.bias = bias;
    }
}

impl Filter for BiasApply {
    fn apply(&mut self, dst: &mut [Sample], src: &[Sample]) {
        debug_assert_eq!(dst.len(), src.len());
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = s.saturating_sub(self.bias);
        }
    }
}
