// Copyright 2024 the Pathwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A simple 2D vector.

use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::{Point, Scalar};

/// A 2D vector.
///
/// This is intended primarily for a vector in the mathematical sense,
/// but it can be interpreted as a translation, and converted to and
/// from a point (vector relative to the origin).
#[derive(Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2<S = f64> {
    /// The x-coordinate.
    pub x: S,
    /// The y-coordinate.
    pub y: S,
}

impl<S: Scalar> Vec2<S> {
    /// Create a new vector.
    #[inline]
    pub const fn new(x: S, y: S) -> Self {
        Vec2 { x, y }
    }

    /// The vector (0, 0).
    #[inline]
    pub fn zero() -> Self {
        Vec2::new(S::zero(), S::zero())
    }

    /// Convert this vector into a `Point`.
    #[inline]
    pub fn to_point(self) -> Point<S> {
        Point::new(self.x, self.y)
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(self, other: Self) -> S {
        self.x * other.x + self.y * other.y
    }

    /// Cross product of two vectors.
    ///
    /// This is the 2D wedge product, signed so that (1, 0) × (0, 1) = 1.
    #[inline]
    pub fn cross(self, other: Self) -> S {
        self.x * other.y - self.y * other.x
    }

    /// Magnitude of vector.
    #[inline]
    pub fn hypot(self) -> S {
        self.x.hypot(self.y)
    }

    /// Magnitude squared of vector.
    #[inline]
    pub fn hypot2(self) -> S {
        self.dot(self)
    }

    /// Linearly interpolate between two vectors.
    #[inline]
    pub fn lerp(self, other: Self, t: S) -> Self {
        self + (other - self) * t
    }

    /// Returns a vector of magnitude 1.0 with the same angle as `self`.
    ///
    /// This produces `NaN` values when the magnitude is `0`.
    #[inline]
    pub fn normalize(self) -> Self {
        self / self.hypot()
    }

    /// Is this vector finite?
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Is this vector NaN?
    #[inline]
    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }
}

impl<S: Scalar> From<(S, S)> for Vec2<S> {
    #[inline]
    fn from(v: (S, S)) -> Self {
        Vec2 { x: v.0, y: v.1 }
    }
}

impl<S: Scalar> From<Vec2<S>> for (S, S) {
    #[inline]
    fn from(v: Vec2<S>) -> (S, S) {
        (v.x, v.y)
    }
}

impl<S: Scalar> Add for Vec2<S> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl<S: Scalar> AddAssign for Vec2<S> {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl<S: Scalar> Sub for Vec2<S> {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl<S: Scalar> SubAssign for Vec2<S> {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl<S: Scalar> Mul<S> for Vec2<S> {
    type Output = Self;

    #[inline]
    fn mul(self, other: S) -> Self {
        Vec2::new(self.x * other, self.y * other)
    }
}

impl<S: Scalar> MulAssign<S> for Vec2<S> {
    #[inline]
    fn mul_assign(&mut self, other: S) {
        *self = *self * other;
    }
}

impl<S: Scalar> Div<S> for Vec2<S> {
    type Output = Self;

    /// Note: division by a scalar is implemented by multiplying by the
    /// reciprocal.
    #[inline]
    fn div(self, other: S) -> Self {
        self * other.recip()
    }
}

impl<S: Scalar> DivAssign<S> for Vec2<S> {
    #[inline]
    fn div_assign(&mut self, other: S) {
        *self = *self / other;
    }
}

impl<S: Scalar> Neg for Vec2<S> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Vec2::new(-self.x, -self.y)
    }
}

macro_rules! scalar_times_vec {
    ($($t:ty),*) => {$(
        impl Mul<Vec2<$t>> for $t {
            type Output = Vec2<$t>;

            #[inline]
            fn mul(self, other: Vec2<$t>) -> Vec2<$t> {
                other * self
            }
        }
    )*};
}

scalar_times_vec!(f32, f64);

impl<S: fmt::Debug> fmt::Debug for Vec2<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl<S: fmt::Display> fmt::Display for Vec2<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "𝐯=(")?;
        fmt::Display::fmt(&self.x, formatter)?;
        write!(formatter, ", ")?;
        fmt::Display::fmt(&self.y, formatter)?;
        write!(formatter, ")")
    }
}

// Conversions to and from mint
#[cfg(feature = "mint")]
impl<S: Scalar> From<Vec2<S>> for mint::Vector2<S> {
    #[inline]
    fn from(p: Vec2<S>) -> mint::Vector2<S> {
        mint::Vector2 { x: p.x, y: p.y }
    }
}

#[cfg(feature = "mint")]
impl<S: Scalar> From<mint::Vector2<S>> for Vec2<S> {
    #[inline]
    fn from(p: mint::Vector2<S>) -> Vec2<S> {
        Vec2 { x: p.x, y: p.y }
    }
}
