// Copyright 2024 the Pathwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Traits for curves parametrized by a scalar.

use core::ops::Range;

use crate::{Point, Scalar};

/// A curve parametrized by a scalar.
///
/// If the result is interpreted as a point, this represents a curve.
pub trait ParamCurve<S: Scalar>: Sized {
    /// Evaluate the curve at parameter `t`.
    ///
    /// The curve is defined for `t` in the range [0..1]. The parameter is
    /// not checked; values outside of it extrapolate the underlying
    /// polynomial, which numeric searches rely on.
    fn eval(&self, t: S) -> Point<S>;

    /// Split the curve at parameter `t`.
    ///
    /// Returns two curves of the same kind, the first covering [0..t] and
    /// the second [t..1] of the original.
    fn split(&self, t: S) -> (Self, Self);

    /// Get a subsegment of the curve for the given parameter range.
    fn subsegment(&self, range: Range<S>) -> Self;

    /// Subdivide into halves.
    #[inline]
    fn subdivide(&self) -> (Self, Self) {
        self.split(S::half())
    }

    /// The start point.
    #[inline]
    fn start(&self) -> Point<S> {
        self.eval(S::zero())
    }

    /// The end point.
    #[inline]
    fn end(&self) -> Point<S> {
        self.eval(S::one())
    }

    /// The centroid of the control points.
    fn centroid(&self) -> Point<S>;
}

/// A parametrized curve that can have its arc length measured.
pub trait ParamCurveArclen<S: Scalar>: ParamCurve<S> {
    /// The arc length of the curve.
    ///
    /// The default implementation sums `iterations` chords between
    /// uniformly spaced parameter values, see [`arc_length`].
    #[inline]
    fn arclen(&self, iterations: usize) -> S {
        arc_length(self, S::zero(), S::one(), iterations)
    }
}

/// A parametrized curve that reports the nearest point.
///
/// Only curves whose distance query reduces to a polynomial of degree three
/// or less implement this. Cubic Béziers deliberately don't.
pub trait ParamCurveDistance<S: Scalar>: ParamCurve<S> {
    /// Find the position on the curve nearest the given point.
    ///
    /// Returns the parameter and the square of the distance.
    fn nearest(&self, p: Point<S>) -> (S, S);

    /// The squared distance from `p` to the closest point of the curve.
    #[inline]
    fn squared_distance_from(&self, p: Point<S>) -> S {
        self.nearest(p).1
    }

    /// The distance from `p` to the closest point of the curve.
    #[inline]
    fn distance_from(&self, p: Point<S>) -> S {
        self.squared_distance_from(p).sqrt()
    }
}

/// Estimate the arc length of `curve` between parameters `t0` and `t1`.
///
/// This samples the curve at `iterations + 1` uniformly spaced parameter
/// values and sums the chord lengths. It doesn't use any lookup table, so
/// it doubles as a cross-check for [`ArcLengthReparam`](crate::ArcLengthReparam).
pub fn arc_length<S: Scalar, C: ParamCurve<S>>(curve: &C, t0: S, t1: S, iterations: usize) -> S {
    let iterations = iterations.max(1);
    let step = (t1 - t0) / S::from_usize(iterations);
    let mut last = curve.eval(t0);
    let mut sum = S::zero();
    for i in 1..=iterations {
        let next = curve.eval(t0 + step * S::from_usize(i));
        sum = sum + (next - last).hypot();
        last = next;
    }
    sum
}
