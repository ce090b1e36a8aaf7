//! The arithmetic the statistics functions need from an element type.
//!
//! Every function in [`crate::statistics`] is generic over [`Numeric`]. The
//! result of `mean`, `median`, `variance` and `pvariance` has the same type as
//! the input elements, so exact types stay exact: a slice of [`Fraction`]s has a
//! `Fraction` mean, a slice of [`Decimal`]s a `Decimal` variance.
//!
//! Standard deviations go through [`Numeric::sqrt`], whose output type is
//! chosen per implementation. Floats stay in their own width. The exact types
//! cannot represent most square roots (they are irrational), so they convert to
//! `f64` first and the result carries ordinary floating-point error.
//!
//! Mixing representations inside one slice is only possible through
//! [`Number`], which applies its promotion rules on every operation.
//!
//! [`Fraction`]: crate::Fraction
//! [`Decimal`]: crate::Decimal
//! [`Number`]: crate::Number

use std::ops::{Add, Div, Mul, Sub};

use num_traits::Zero;

/// A scalar type the statistics functions can operate on.
pub trait Numeric:
    Clone + PartialOrd + Zero + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Div<Output = Self>
{
    /// Type produced by [`Numeric::sqrt`].
    type Root;

    /// Converts an element count into this type, for use as a divisor.
    fn from_count(count: usize) -> Self;

    /// Non-negative square root.
    fn sqrt(self) -> Self::Root;
}

impl Numeric for f64 {
    type Root = Self;

    fn from_count(count: usize) -> Self {
        count as Self
    }

    fn sqrt(self) -> Self {
        Self::sqrt(self)
    }
}

impl Numeric for f32 {
    type Root = Self;

    fn from_count(count: usize) -> Self {
        count as Self
    }

    fn sqrt(self) -> Self {
        Self::sqrt(self)
    }
}
