//! Polymorphic RGB/HSV color model over fixed-point components.
//!
//! Two value-semantic variants, [`Rgb`] and [`Hsv`], share the object-safe
//! [`Color`] trait so code can accept either representation without heap
//! allocation (`&dyn Color` on the stack is enough). Components are
//! [`Component`] (`Fixed<i32, 7, 8>`); hue lives in `[0, 1)`, the other
//! channels nominally in `[0, 1]`.
//!
//! Conversions are computed fresh on every call, never cached. A round trip
//! `rgb -> hsv -> rgb` reproduces the original within one raw unit of the
//! fractional scale; it is bit-exact only for the corner hues where exactly
//! one channel saturates.
//!
//! Interpolation is keyed off the *left* operand's concrete type: lerping
//! from an [`Rgb`] always happens in RGB space, converting the right-hand
//! operand first, and likewise for [`Hsv`]. This is deliberately not
//! commutative; the two spaces give different in-between colors.
//!
//! # Example
//!
//! ```rust
//! use lumen_core::color::{Color, Component, Hsv};
//!
//! let red = Hsv::new(
//!     Component::zero(),
//!     Component::one(),
//!     Component::one(),
//! );
//! let rgb = red.to_rgb();
//! assert_eq!(rgb.r, Component::one());
//! assert_eq!(rgb.g, Component::zero());
//! ```

use crate::fixed::Fixed;

/// Fixed-point channel type shared by both color variants.
pub type Component = Fixed<i32, 7, 8>;

/// Capability interface over the two color representations.
///
/// Object-safe so pipelines can hand around `&dyn Color` while the values
/// themselves stay on the stack.
pub trait Color {
    /// This color in RGB space.
    fn to_rgb(&self) -> Rgb;
    /// This color in HSV space.
    fn to_hsv(&self) -> Hsv;
}

/// An RGB triple.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Rgb {
    /// Red channel, nominally `[0, 1]`.
    pub r: Component,
    /// Green channel, nominally `[0, 1]`.
    pub g: Component,
    /// Blue channel, nominally `[0, 1]`.
    pub b: Component,
}

/// An HSV triple.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Hsv {
    /// Hue, always normalized into `[0, 1)` by the conversions.
    pub h: Component,
    /// Saturation, nominally `[0, 1]`.
    pub s: Component,
    /// Value, nominally `[0, 1]`.
    pub v: Component,
}

impl Rgb {
    /// Construct from three components. No clamping is applied; call
    /// [`Rgb::clamp`] explicitly when bounding is required.
    pub fn new(r: Component, g: Component, b: Component) -> Self {
        Self { r, g, b }
    }

    /// Construct from float channels (convenience for tests and setup
    /// paths; the processing path stays in fixed point).
    pub fn from_f32(r: f32, g: f32, b: f32) -> Self {
        Self::new(
            Component::from_f32(r),
            Component::from_f32(g),
            Component::from_f32(b),
        )
    }

    /// Per-channel linear interpolation `lhs + (rhs - lhs) * t` in RGB
    /// space.
    pub fn lerp(lhs: Rgb, rhs: Rgb, t: Component) -> Rgb {
        Rgb {
            r: lhs.r + (rhs.r - lhs.r) * t,
            g: lhs.g + (rhs.g - lhs.g) * t,
            b: lhs.b + (rhs.b - lhs.b) * t,
        }
    }

    /// Interpolate from `self` toward any color, in RGB space. The right
    /// operand is converted first; swapping operands changes the
    /// interpolation space.
    pub fn lerp_toward(&self, rhs: &dyn Color, t: Component) -> Rgb {
        Rgb::lerp(*self, rhs.to_rgb(), t)
    }

    /// Clamp each channel independently into `[lo, hi]` per channel.
    pub fn clamp(&mut self, lo: Rgb, hi: Rgb) -> &mut Self {
        self.r = self.r.clamp(lo.r, hi.r);
        self.g = self.g.clamp(lo.g, hi.g);
        self.b = self.b.clamp(lo.b, hi.b);
        self
    }
}

impl Hsv {
    /// Construct from three components. No clamping and no hue
    /// normalization is applied on construction.
    pub fn new(h: Component, s: Component, v: Component) -> Self {
        Self { h, s, v }
    }

    /// Construct from float channels.
    pub fn from_f32(h: f32, s: f32, v: f32) -> Self {
        Self::new(
            Component::from_f32(h),
            Component::from_f32(s),
            Component::from_f32(v),
        )
    }

    /// Per-channel linear interpolation in HSV space. Hue interpolates
    /// numerically; it does not take the short way around the circle.
    pub fn lerp(lhs: Hsv, rhs: Hsv, t: Component) -> Hsv {
        Hsv {
            h: lhs.h + (rhs.h - lhs.h) * t,
            s: lhs.s + (rhs.s - lhs.s) * t,
            v: lhs.v + (rhs.v - lhs.v) * t,
        }
    }

    /// Interpolate from `self` toward any color, in HSV space.
    pub fn lerp_toward(&self, rhs: &dyn Color, t: Component) -> Hsv {
        Hsv::lerp(*self, rhs.to_hsv(), t)
    }

    /// Clamp each channel independently. Hue is clamped like any other
    /// channel, not renormalized.
    pub fn clamp(&mut self, lo: Hsv, hi: Hsv) -> &mut Self {
        self.h = self.h.clamp(lo.h, hi.h);
        self.s = self.s.clamp(lo.s, hi.s);
        self.v = self.v.clamp(lo.v, hi.v);
        self
    }
}

impl Color for Rgb {
    fn to_rgb(&self) -> Rgb {
        *self
    }

    /// Max/min/delta sector conversion.
    ///
    /// `value` is the max channel; `saturation` is `delta / max` with the
    /// achromatic (`delta == 0`) and black (`max == 0`) cases special-cased
    /// to zero instead of dividing. Hue picks a sixth-of-circle offset from
    /// whichever channel is the max; only the red branch can go negative,
    /// so only it folds back into `[0, 1)`.
    fn to_hsv(&self) -> Hsv {
        let zero = Component::zero();
        let one = Component::one();
        let six = Component::from_int(6);
        let third = one / Component::from_int(3);

        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;

        let value = max;
        let saturation = if delta == zero || max == zero {
            zero
        } else {
            delta / max
        };

        let hue = if max == min {
            zero
        } else if max == self.r {
            // Red sits at the hue origin; a blue-ish red lands negative
            // and wraps back below one.
            let mut h = ((self.g - self.b) / delta) / six;
            h %= one;
            if h < zero {
                h += one;
            }
            h
        } else if max == self.g {
            third + ((self.b - self.r) / delta) / six
        } else {
            third + third + ((self.r - self.g) / delta) / six
        };

        Hsv::new(hue, saturation, value)
    }
}

/// Primary/secondary hues at the six sector corners, in hue order.
fn sector_corners() -> [Rgb; 6] {
    let o = Component::one();
    let z = Component::zero();
    [
        Rgb::new(o, z, z), // red
        Rgb::new(o, o, z), // yellow
        Rgb::new(z, o, z), // green
        Rgb::new(z, o, o), // cyan
        Rgb::new(z, z, o), // blue
        Rgb::new(o, z, o), // magenta
    ]
}

impl Color for Hsv {
    /// Sector-table conversion: pick the two corner hues bracketing
    /// `h * 6`, interpolate by the fractional sector position, then blend
    /// toward white by `1 - s` and toward black by `1 - v`.
    fn to_rgb(&self) -> Rgb {
        let zero = Component::zero();
        let one = Component::one();
        let six = Component::from_int(6);

        let h6 = self.h * six;
        let sector = (h6.to_int().rem_euclid(6)) as usize;
        let frac = h6 % one;

        let corners = sector_corners();
        let full = Rgb::lerp(corners[sector], corners[(sector + 1) % 6], frac);

        let white = Rgb::new(one, one, one);
        let black = Rgb::new(zero, zero, zero);
        let saturated = Rgb::lerp(full, white, one - self.s);
        Rgb::lerp(saturated, black, one - self.v)
    }

    fn to_hsv(&self) -> Hsv {
        *self
    }
}
