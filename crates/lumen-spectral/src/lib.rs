//! Lumen spectral - fixed-size spectrum analysis for audio-reactive light
//!
//! Turns a buffer of raw microphone samples into per-bucket magnitudes a
//! renderer can map onto color. One cycle is: bias removal, Hanning
//! windowing, a forward transform, and magnitude reduction, all over a
//! single fixed-size `i16` buffer.
//!
//! # Components
//!
//! - [`Analyzer`] - the assembled pipeline, generic over the backend
//! - [`Hanning`] - integer windowing with a lazily-built coefficient table
//! - [`Transform`] - the shared backend contract: `N` real samples in,
//!   `N/2` interleaved complex pairs out
//! - [`FloatFft`] - accurate backend over `rustfft` (owned one-time plan)
//! - [`IntFft`] - fixed-point radix-2 FFT for FPU-less targets
//! - [`TinyDft`] - `O(N²)` cosine-correlation approximation for the
//!   smallest targets
//! - [`reduce`] / [`sqrt_rounded`] - magnitude reduction primitives
//!
//! # Choosing a backend
//!
//! All three backends honor the same buffer contract and slot into
//! [`Analyzer`] interchangeably; they trade accuracy for footprint.
//! Backend and size are fixed at construction — there is no runtime
//! reconfiguration, and only [`FloatFft::new`] can fail (bad size).
//!
//! # Example
//!
//! ```rust
//! use lumen_spectral::{Analyzer, IntFft};
//!
//! let mut analyzer = Analyzer::new(IntFft::new(128));
//! analyzer.samples_mut().fill(0);
//! analyzer.process();
//! assert!(analyzer.magnitudes().iter().all(|&m| m == 0));
//! ```

pub mod analyzer;
pub mod int_fft;
pub mod magnitude;
pub mod tiny;
pub mod transform;
pub mod window;

pub use analyzer::Analyzer;
pub use int_fft::IntFft;
pub use magnitude::{reduce, sqrt_rounded};
pub use tiny::TinyDft;
pub use transform::{FloatFft, SpectralError, Transform};
pub use window::Hanning;
