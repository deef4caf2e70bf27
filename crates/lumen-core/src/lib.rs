//! Lumen core - fixed-point numerics for audio-reactive lighting
//!
//! The allocation-free numeric foundation of the lumen device firmware:
//! everything here is deterministic integer math suitable for a
//! microcontroller without a usable FPU.
//!
//! # Components
//!
//! - [`Fixed`] - generic scaled-integer numeric type, parameterized by
//!   storage type and integer/fractional bit widths, with a compile-time
//!   overflow-headroom check
//! - [`color`] - value-semantic RGB/HSV color model built on [`Fixed`],
//!   with lossless corner-hue conversion, interpolation, and clamping
//! - [`filters`] - single-pole low/high-pass smoothing and per-cycle bias
//!   estimation for raw sample buffers
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded targets. Disable the
//! default `std` feature:
//!
//! ```toml
//! [dependencies]
//! lumen-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **No heap**: every type here is a plain value; nothing allocates
//! - **Deterministic**: fixed-point arithmetic gives the same answer on
//!   every target, FPU or not
//! - **Overflow by contract**: bit-width combinations that cannot absorb
//!   intermediate products are rejected at compile time; beyond that,
//!   arithmetic wraps silently by design

#![cfg_attr(not(feature = "std"), no_std)]

pub mod color;
pub mod filters;
pub mod fixed;

pub use color::{Color, Component, Hsv, Rgb};
pub use filters::{BiasApply, BiasCalc, Filter, HighPass, LowPass, Sample};
pub use fixed::{Fixed, FixedI32x7x8, FixedU16x3x4, FixedU16x4x4, FixedU32x8x8, Storage};
