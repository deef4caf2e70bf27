//! Scaled-integer fixed-point arithmetic.
//!
//! [`Fixed`] represents a real number as an integer pre-multiplied by
//! `2^FRAC_BITS`, giving deterministic, allocation-free arithmetic on
//! targets without a usable FPU:
//!
//! ```text
//! value = raw / 2^FRAC_BITS
//! a * b = (a.raw * b.raw) / 2^FRAC_BITS
//! a / b = (a.raw * 2^FRAC_BITS) / b.raw
//! ```
//!
//! The bit budget `INT_BITS + FRAC_BITS + sign` must fit in half the
//! storage width. The spare upper half absorbs the intermediate product in
//! multiply/divide, so those never need a wider temporary. The check is a
//! compile-time assertion evaluated when a constructor is instantiated; a
//! bad combination fails the build, never the running program.
//!
//! Overflow beyond that headroom is deliberately unchecked: arithmetic uses
//! wrapping operations and it is the caller's job to pick bit widths that
//! fit. See [`FixedI32x7x8`] and friends for the combinations used
//! throughout lumen.
//!
//! # Example
//!
//! ```rust
//! use lumen_core::FixedI32x7x8;
//!
//! let a = FixedI32x7x8::from_f32(1.5);
//! let b = FixedI32x7x8::from_int(2);
//! assert_eq!((a * b).to_f32(), 3.0);
//! ```

use core::ops::{
    Add, AddAssign, BitAnd, Div, DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign, Sub,
    SubAssign,
};

mod private {
    pub trait Sealed {}
}

/// Integer storage for a [`Fixed`] value.
///
/// Sealed; implemented for `i16`, `i32`, `u16`, and `u32`. Exposes the bit
/// width, signedness, and the wrapping arithmetic [`Fixed`] is built on.
pub trait Storage:
    Copy
    + core::fmt::Debug
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + Div<Output = Self>
    + Rem<Output = Self>
    + BitAnd<Output = Self>
    + Not<Output = Self>
    + private::Sealed
{
    /// Total bit width of the storage type.
    const BITS: u32;
    /// Whether the storage type is signed.
    const SIGNED: bool;
    /// The zero value.
    const ZERO: Self;

    /// Truncating conversion from `i64`.
    fn from_i64(v: i64) -> Self;
    /// Widening conversion to `i64`.
    fn to_i64(self) -> i64;
    /// Truncating conversion from `f64` (toward zero).
    fn from_f64(v: f64) -> Self;
    /// Conversion to `f64`.
    fn to_f64(self) -> f64;
    /// Wrapping addition.
    fn wrapping_add(self, rhs: Self) -> Self;
    /// Wrapping subtraction.
    fn wrapping_sub(self, rhs: Self) -> Self;
    /// Wrapping multiplication.
    fn wrapping_mul(self, rhs: Self) -> Self;
    /// Wrapping negation.
    fn wrapping_neg(self) -> Self;
}

macro_rules! impl_storage {
    ($($ty:ty => $signed:expr),+ $(,)?) => {$(
        impl private::Sealed for $ty {}

        impl Storage for $ty {
            const BITS: u32 = <$ty>::BITS;
            const SIGNED: bool = $signed;
            const ZERO: Self = 0;

            #[inline]
            fn from_i64(v: i64) -> Self {
                v as $ty
            }

            #[inline]
            fn to_i64(self) -> i64 {
                self as i64
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $ty
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$ty>::wrapping_add(self, rhs)
            }

            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$ty>::wrapping_sub(self, rhs)
            }

            #[inline]
            fn wrapping_mul(self, rhs: Self) -> Self {
                <$ty>::wrapping_mul(self, rhs)
            }

            #[inline]
            fn wrapping_neg(self) -> Self {
                <$ty>::wrapping_neg(self)
            }
        }
    )+};
}

impl_storage! {
    i16 => true,
    i32 => true,
    u16 => false,
    u32 => false,
}

/// Fixed-point number: `raw / 2^FRAC_BITS` stored in `T`.
///
/// Value-semantic, `Copy`, no heap. The total order (and `==`) is the raw
/// order, which matches real-number order for a fixed scale.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Fixed<T: Storage, const INT_BITS: u32, const FRAC_BITS: u32> {
    raw: T,
}

impl<T: Storage, const INT_BITS: u32, const FRAC_BITS: u32> Fixed<T, INT_BITS, FRAC_BITS> {
    /// `INT_BITS + FRAC_BITS + sign <= BITS / 2`, checked when any
    /// constructor of a given instantiation is compiled.
    const WIDTH_OK: () = assert!(
        INT_BITS + FRAC_BITS + (if T::SIGNED { 1 } else { 0 }) <= T::BITS / 2,
        "integer + fractional + sign bits exceed half the storage width"
    );

    #[inline]
    fn scale_raw() -> T {
        T::from_i64(1i64 << FRAC_BITS)
    }

    /// Construct from an unscaled integer (multiplies by the scale).
    #[inline]
    pub fn from_int(v: T) -> Self {
        const { Self::WIDTH_OK };
        Self {
            raw: v.wrapping_mul(Self::scale_raw()),
        }
    }

    /// Construct from an already-scaled raw value. No scaling is applied;
    /// this is the arithmetic operators' constructor.
    #[inline]
    pub fn from_raw(raw: T) -> Self {
        const { Self::WIDTH_OK };
        Self { raw }
    }

    /// Construct from `f32`, truncating toward zero at the raw scale.
    #[inline]
    pub fn from_f32(v: f32) -> Self {
        Self::from_f64(f64::from(v))
    }

    /// Construct from `f64`, truncating toward zero at the raw scale.
    #[inline]
    pub fn from_f64(v: f64) -> Self {
        const { Self::WIDTH_OK };
        Self {
            raw: T::from_f64(v * (1i64 << FRAC_BITS) as f64),
        }
    }

    /// Zero.
    #[inline]
    pub fn zero() -> Self {
        Self::from_raw(T::ZERO)
    }

    /// One.
    #[inline]
    pub fn one() -> Self {
        Self::from_raw(Self::scale_raw())
    }

    /// Smallest representable positive step (one raw unit).
    #[inline]
    pub fn eps() -> Self {
        Self::from_raw(T::from_i64(1))
    }

    /// Most negative representable value (zero for unsigned storage).
    #[inline]
    pub fn min_val() -> Self {
        let raw = if T::SIGNED {
            -(1i64 << (INT_BITS + FRAC_BITS))
        } else {
            0
        };
        Self::from_raw(T::from_i64(raw))
    }

    /// Most positive representable value.
    #[inline]
    pub fn max_val() -> Self {
        Self::from_raw(T::from_i64((1i64 << (INT_BITS + FRAC_BITS)) - 1))
    }

    /// Raw mask covering the value bits (integer plus fractional).
    #[inline]
    pub fn mask_raw() -> T {
        T::from_i64((1i64 << (INT_BITS + FRAC_BITS)) - 1)
    }

    /// The raw (scaled) value.
    #[inline]
    pub fn raw(self) -> T {
        self.raw
    }

    /// The raw value masked by `mask`.
    #[inline]
    pub fn raw_masked(self, mask: T) -> T {
        self.raw & mask
    }

    /// Overwrite the raw value without scaling.
    #[inline]
    pub fn set_raw(&mut self, raw: T) -> &mut Self {
        self.raw = raw;
        self
    }

    /// The integer part, truncated toward zero.
    #[inline]
    pub fn to_int(self) -> T {
        self.raw / Self::scale_raw()
    }

    /// The integer part masked by `mask`.
    #[inline]
    pub fn to_int_masked(self, mask: T) -> T {
        self.to_int() & mask
    }

    /// Conversion to `f32` (divide by scale).
    #[inline]
    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }

    /// Conversion to `f64` (divide by scale).
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.raw.to_f64() / (1i64 << FRAC_BITS) as f64
    }

    /// Clamp into `[lo, hi]` (fixed-point bounds).
    ///
    /// By value, like the derived `Ord::clamp` it shadows; the inherent
    /// method must win resolution or callers silently get the trait one.
    #[inline]
    #[must_use]
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        self.clamp_raw(lo.raw, hi.raw)
    }

    /// Clamp into `[lo, hi]` given unscaled integer bounds.
    #[inline]
    #[must_use]
    pub fn clamp_int(self, lo: T, hi: T) -> Self {
        self.clamp(Self::from_int(lo), Self::from_int(hi))
    }

    /// Clamp the raw value into `[lo, hi]`.
    #[inline]
    #[must_use]
    pub fn clamp_raw(mut self, lo: T, hi: T) -> Self {
        if self.raw < lo {
            self.raw = lo;
        }
        if self.raw > hi {
            self.raw = hi;
        }
        self
    }

    /// Shrink toward zero by one raw unit. Zero stays zero. Used for
    /// saturating-rounding adjustments after a truncating conversion.
    #[inline]
    pub fn clamp_down(&mut self) -> &mut Self {
        let unit = T::from_i64(1);
        if self.raw > T::ZERO {
            self.raw = self.raw.wrapping_sub(unit);
        } else if self.raw < T::ZERO {
            self.raw = self.raw.wrapping_add(unit);
        }
        self
    }

    /// Zero the low `N` raw bits. Cheap quantization primitive; leaves the
    /// sign bit alone for signed storage. `N` larger than the value width
    /// is rejected at compile time.
    #[inline]
    pub fn truncate<const N: u32>(&mut self) -> &mut Self {
        const {
            assert!(
                N <= INT_BITS + FRAC_BITS,
                "trying to truncate more bits than available"
            );
        }
        let mask = !T::from_i64((1i64 << N) - 1);
        self.raw = self.raw & mask;
        self
    }

    /// Approximate equality against a floating-point reference. Intended
    /// for tests comparing against float math.
    #[inline]
    pub fn approx_eq(self, reference: f64, eps: f64) -> bool {
        let v = self.to_f64();
        (v + eps) > reference && (v - eps) < reference
    }
}

impl<T: Storage, const INT_BITS: u32, const FRAC_BITS: u32> Default
    for Fixed<T, INT_BITS, FRAC_BITS>
{
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Storage, const INT_BITS: u32, const FRAC_BITS: u32> Add for Fixed<T, INT_BITS, FRAC_BITS> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::from_raw(self.raw.wrapping_add(rhs.raw))
    }
}

impl<T: Storage, const INT_BITS: u32, const FRAC_BITS: u32> Sub for Fixed<T, INT_BITS, FRAC_BITS> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_raw(self.raw.wrapping_sub(rhs.raw))
    }
}

impl<T: Storage, const INT_BITS: u32, const FRAC_BITS: u32> Mul for Fixed<T, INT_BITS, FRAC_BITS> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::from_raw(self.raw.wrapping_mul(rhs.raw) / Self::scale_raw())
    }
}

impl<T: Storage, const INT_BITS: u32, const FRAC_BITS: u32> Div for Fixed<T, INT_BITS, FRAC_BITS> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        Self::from_raw(self.raw.wrapping_mul(Self::scale_raw()) / rhs.raw)
    }
}

impl<T: Storage, const INT_BITS: u32, const FRAC_BITS: u32> Rem for Fixed<T, INT_BITS, FRAC_BITS> {
    type Output = Self;

    #[inline]
    fn rem(self, rhs: Self) -> Self {
        // Raw-domain remainder keeps fractional semantics; `x % one()` is
        // the fractional part (hue wraparound relies on this).
        Self::from_raw(self.raw % rhs.raw)
    }
}

impl<T: Storage, const INT_BITS: u32, const FRAC_BITS: u32> Neg for Fixed<T, INT_BITS, FRAC_BITS> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::from_raw(self.raw.wrapping_neg())
    }
}

impl<T: Storage, const INT_BITS: u32, const FRAC_BITS: u32> AddAssign
    for Fixed<T, INT_BITS, FRAC_BITS>
{
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Storage, const INT_BITS: u32, const FRAC_BITS: u32> SubAssign
    for Fixed<T, INT_BITS, FRAC_BITS>
{
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Storage, const INT_BITS: u32, const FRAC_BITS: u32> MulAssign
    for Fixed<T, INT_BITS, FRAC_BITS>
{
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Storage, const INT_BITS: u32, const FRAC_BITS: u32> DivAssign
    for Fixed<T, INT_BITS, FRAC_BITS>
{
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl<T: Storage, const INT_BITS: u32, const FRAC_BITS: u32> RemAssign
    for Fixed<T, INT_BITS, FRAC_BITS>
{
    #[inline]
    fn rem_assign(&mut self, rhs: Self) {
        *self = *self % rhs;
    }
}

/// Unsigned 32-bit storage, 8 integer / 8 fractional bits.
pub type FixedU32x8x8 = Fixed<u32, 8, 8>;
/// Signed 32-bit storage, 7 integer / 8 fractional bits. The color model's
/// component type.
pub type FixedI32x7x8 = Fixed<i32, 7, 8>;
/// Unsigned 16-bit storage, 4 integer / 4 fractional bits.
pub type FixedU16x4x4 = Fixed<u16, 4, 4>;
/// Unsigned 16-bit storage, 3 integer / 4 fractional bits.
pub type FixedU16x3x4 = Fixed<u16, 3, 4>;

#[cfg(test)]
mod tests {
    use super::*;

    type F = FixedI32x7x8;

    #[test]
    fn int_roundtrip_truncates() {
        assert_eq!(F::from_int(5).to_int(), 5);
        assert_eq!(F::from_f32(5.7).to_int(), 5);
        assert_eq!(F::from_f32(-5.7).to_int(), -5);
    }

    #[test]
    fn scale_rule_for_mul_div() {
        let a = F::from_f32(1.5);
        let b = F::from_f32(2.0);
        assert_eq!((a * b).to_f32(), 3.0);
        assert_eq!((a / b).to_f32(), 0.75);
    }

    #[test]
    fn rem_is_raw_domain() {
        let x = F::from_f32(2.25);
        let frac = x % F::one();
        assert_eq!(frac.to_f32(), 0.25);
    }

    #[test]
    fn negative_rem_stays_negative() {
        // Truncated division semantics, like the raw integer `%`.
        let x = F::from_f32(-0.25);
        let r = x % F::one();
        assert!(r < F::zero());
        assert_eq!(r.to_f32(), -0.25);
    }

    #[test]
    fn generators() {
        assert_eq!(F::one().raw(), 1 << 8);
        assert_eq!(F::eps().raw(), 1);
        assert_eq!(F::max_val().raw(), (1 << 15) - 1);
        assert_eq!(F::min_val().raw(), -(1 << 15));
        assert_eq!(FixedU32x8x8::min_val().raw(), 0);
    }

    #[test]
    fn clamp_family() {
        assert_eq!(F::from_int(10).clamp_int(0, 5).to_int(), 5);
        assert_eq!(F::from_int(-3).clamp(F::zero(), F::one()), F::zero());
        assert_eq!(F::from_raw(100).clamp_raw(0, 50).raw(), 50);
    }

    #[test]
    fn clamp_resolves_to_fixed_point_bounds() {
        // The derived Ord also provides a clamp; the inherent one must be
        // the method that resolves, with the same answer either way.
        let below = F::from_int(-3).clamp(F::zero(), F::one());
        assert_eq!(below.raw(), 0);
        let above = F::from_f32(1.5).clamp(F::zero(), F::one());
        assert_eq!(above, F::one());
        let inside = F::from_f32(0.5).clamp(F::zero(), F::one());
        assert_eq!(inside, F::from_f32(0.5));
    }

    #[test]
    fn clamp_down_shrinks_toward_zero() {
        let mut pos = F::from_raw(10);
        pos.clamp_down();
        assert_eq!(pos.raw(), 9);

        let mut neg = F::from_raw(-10);
        neg.clamp_down();
        assert_eq!(neg.raw(), -9);

        let mut zero = F::zero();
        zero.clamp_down();
        assert_eq!(zero, F::zero());
    }

    #[test]
    fn truncate_zeroes_low_bits() {
        let mut x = F::from_raw(0b1011_1111);
        x.truncate::<4>();
        assert_eq!(x.raw(), 0b1011_0000);

        let mut n = F::from_raw(-1);
        n.truncate::<8>();
        // Sign bit survives; only the low byte is cleared.
        assert!(n.raw() < 0);
        assert_eq!(n.raw() & 0xff, 0);
    }

    #[test]
    fn order_matches_value_order() {
        assert!(F::from_f32(0.5) < F::one());
        assert!(F::from_int(-1) < F::zero());
        assert!(F::max_val() > F::one());
    }

    #[test]
    fn approx_eq_window() {
        let x = F::from_f32(0.333);
        assert!(x.approx_eq(1.0 / 3.0, 0.01));
        assert!(!x.approx_eq(0.5, 0.01));
    }

    #[test]
    fn unsigned_storage_works() {
        let a = FixedU16x4x4::from_f32(2.5);
        let b = FixedU16x4x4::from_f32(1.25);
        assert_eq!((a * b).to_f32(), 3.125);
        assert_eq!((a - b).to_f32(), 1.25);
    }
}
