//! Scalar type bounds for views, kernels and factorizations.

use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Element types usable in views, kernels and the LU factorization.
///
/// Besides field arithmetic, a scalar reports its [`magnitude`](Scalar::magnitude)
/// so that optional pivot checks can compare against a real tolerance for both
/// real and complex element types.
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Zero
    + One
    + 'static
{
    /// Absolute value (modulus for complex numbers) as `f64`.
    fn magnitude(self) -> f64;
}

macro_rules! impl_scalar_real {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                #[inline]
                fn magnitude(self) -> f64 {
                    self.abs() as f64
                }
            }
        )*
    };
}

impl_scalar_real!(f32, f64);

macro_rules! impl_scalar_complex {
    ($($t:ty),*) => {
        $(
            impl Scalar for Complex<$t> {
                #[inline]
                fn magnitude(self) -> f64 {
                    self.norm() as f64
                }
            }
        )*
    };
}

impl_scalar_complex!(f32, f64);
