// Copyright 2024 the Pathwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A 2D point.

use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use crate::{Scalar, Vec2};

/// A 2D point.
#[derive(Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<S = f64> {
    /// The x coordinate.
    pub x: S,
    /// The y coordinate.
    pub y: S,
}

impl<S: Scalar> Point<S> {
    /// Create a new `Point` with the provided `x` and `y` coordinates.
    #[inline]
    pub const fn new(x: S, y: S) -> Self {
        Point { x, y }
    }

    /// The point at the origin; (0, 0).
    #[inline]
    pub fn origin() -> Self {
        Point::new(S::zero(), S::zero())
    }

    /// Convert this point into a `Vec2`.
    #[inline]
    pub fn to_vec2(self) -> Vec2<S> {
        Vec2::new(self.x, self.y)
    }

    /// Linearly interpolate between two points.
    #[inline]
    pub fn lerp(self, other: Self, t: S) -> Self {
        self.to_vec2().lerp(other.to_vec2(), t).to_point()
    }

    /// Determine the midpoint of two points.
    #[inline]
    pub fn midpoint(self, other: Self) -> Self {
        Point::new(
            S::half() * (self.x + other.x),
            S::half() * (self.y + other.y),
        )
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Self) -> S {
        (self - other).hypot()
    }

    /// Squared Euclidean distance.
    #[inline]
    pub fn distance_squared(self, other: Self) -> S {
        (self - other).hypot2()
    }

    /// Is this point finite?
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Is this point NaN?
    #[inline]
    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }
}

impl<S: Scalar> From<(S, S)> for Point<S> {
    #[inline]
    fn from(v: (S, S)) -> Self {
        Point { x: v.0, y: v.1 }
    }
}

impl<S: Scalar> From<Point<S>> for (S, S) {
    #[inline]
    fn from(v: Point<S>) -> (S, S) {
        (v.x, v.y)
    }
}

impl<S: Scalar> Add<Vec2<S>> for Point<S> {
    type Output = Self;

    #[inline]
    fn add(self, other: Vec2<S>) -> Self {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl<S: Scalar> AddAssign<Vec2<S>> for Point<S> {
    #[inline]
    fn add_assign(&mut self, other: Vec2<S>) {
        *self = *self + other;
    }
}

impl<S: Scalar> Sub<Vec2<S>> for Point<S> {
    type Output = Self;

    #[inline]
    fn sub(self, other: Vec2<S>) -> Self {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl<S: Scalar> SubAssign<Vec2<S>> for Point<S> {
    #[inline]
    fn sub_assign(&mut self, other: Vec2<S>) {
        *self = *self - other;
    }
}

impl<S: Scalar> Sub<Point<S>> for Point<S> {
    type Output = Vec2<S>;

    #[inline]
    fn sub(self, other: Self) -> Vec2<S> {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl<S: fmt::Debug> fmt::Debug for Point<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl<S: fmt::Display> fmt::Display for Point<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "(")?;
        fmt::Display::fmt(&self.x, formatter)?;
        write!(formatter, ", ")?;
        fmt::Display::fmt(&self.y, formatter)?;
        write!(formatter, ")")
    }
}

#[cfg(feature = "mint")]
impl<S: Scalar> From<Point<S>> for mint::Point2<S> {
    #[inline]
    fn from(p: Point<S>) -> mint::Point2<S> {
        mint::Point2 { x: p.x, y: p.y }
    }
}

#[cfg(feature = "mint")]
impl<S: Scalar> From<mint::Point2<S>> for Point<S> {
    #[inline]
    fn from(p: mint::Point2<S>) -> Point<S> {
        Point { x: p.x, y: p.y }
    }
}
