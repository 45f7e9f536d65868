//! Scalar fields the orthogonalizers work over.
//!
//! Vector entries may be real (`f32`, `f64`) or complex (`Complex<f32>`, `Complex<f64>`).
//! Norms, tolerances and the orthogonality error always live in the associated real type.

use num_complex::Complex;
use num_traits::{Float, Num};
use std::fmt::Debug;
use std::ops::Neg;

/// A real or complex scalar.
pub trait Field: Num + Neg<Output = Self> + Copy + Debug + Send + Sync + 'static {
    /// Real type of norms and tolerances.
    type Real: Float + Debug + Send + Sync + 'static;

    /// Complex conjugate; the identity for real scalars.
    fn conj(self) -> Self;
    /// Embed a real number.
    fn from_real(re: Self::Real) -> Self;
    /// Real part.
    fn re(self) -> Self::Real;
    /// Modulus.
    fn modulus(self) -> Self::Real;
    /// True if no component is infinite or NaN.
    fn is_finite(self) -> bool;
}

macro_rules! impl_real_field {
    ($($t:ty),*) => {$(
        impl Field for $t {
            type Real = $t;
            #[inline]
            fn conj(self) -> Self {
                self
            }
            #[inline]
            fn from_real(re: $t) -> Self {
                re
            }
            #[inline]
            fn re(self) -> $t {
                self
            }
            #[inline]
            fn modulus(self) -> $t {
                self.abs()
            }
            #[inline]
            fn is_finite(self) -> bool {
                <$t>::is_finite(self)
            }
        }
    )*};
}

macro_rules! impl_complex_field {
    ($($t:ty),*) => {$(
        impl Field for Complex<$t> {
            type Real = $t;
            #[inline]
            fn conj(self) -> Self {
                Complex::conj(&self)
            }
            #[inline]
            fn from_real(re: $t) -> Self {
                Complex::new(re, 0.0)
            }
            #[inline]
            fn re(self) -> $t {
                self.re
            }
            #[inline]
            fn modulus(self) -> $t {
                self.norm()
            }
            #[inline]
            fn is_finite(self) -> bool {
                self.re.is_finite() && self.im.is_finite()
            }
        }
    )*};
}

impl_real_field!(f32, f64);
impl_complex_field!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_fields_are_self_conjugate() {
        assert_eq!(Field::conj(-2.5f64), -2.5);
        assert_eq!(Field::modulus(-2.5f32), 2.5);
        assert!(!Field::is_finite(f64::NAN));
    }

    #[test]
    fn complex_field_operations() {
        let z = Complex::new(3.0f64, -4.0);
        assert_eq!(Field::conj(z), Complex::new(3.0, 4.0));
        assert_eq!(Field::modulus(z), 5.0);
        assert_eq!(Field::re(z), 3.0);
        assert_eq!(<Complex<f64> as Field>::from_real(2.0), Complex::new(2.0, 0.0));
        assert!(!Field::is_finite(Complex::new(1.0f32, f32::INFINITY)));
    }
}
