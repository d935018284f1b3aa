// Copyright 2024 the Pathwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The floating point abstraction shared by every geometric type.

use core::fmt::{Debug, Display};

use num_traits::{Float, FloatConst};

/// A floating point type usable as the coordinate type of curves.
///
/// This is implemented for `f32` and `f64`. All of the geometry in this
/// crate is generic over it, with `f64` as the default.
pub trait Scalar: Float + FloatConst + Default + Debug + Display + 'static {
    /// Convert an `f64` constant to this type, rounding if needed.
    fn from_f64(v: f64) -> Self;

    /// Convert a count or index to this type, rounding if needed.
    fn from_usize(n: usize) -> Self;

    /// The value `2`.
    #[inline]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// The value `3`.
    #[inline]
    fn three() -> Self {
        Self::two() + Self::one()
    }

    /// The value `0.5`.
    #[inline]
    fn half() -> Self {
        Self::from_f64(0.5)
    }

    /// Linearly interpolate between `a` and `b`.
    #[inline]
    fn lerp(a: Self, b: Self, t: Self) -> Self {
        a + (b - a) * t
    }
}

impl Scalar for f32 {
    #[inline]
    fn from_f64(v: f64) -> f32 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "narrowing constants to f32 is the point of this impl"
        )]
        let v = v as f32;
        v
    }

    #[inline]
    fn from_usize(n: usize) -> f32 {
        n as f32
    }
}

impl Scalar for f64 {
    #[inline]
    fn from_f64(v: f64) -> f64 {
        v
    }

    #[inline]
    fn from_usize(n: usize) -> f64 {
        n as f64
    }
}
