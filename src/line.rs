// Copyright 2024 the Pathwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lines.

use core::ops::Range;

use crate::{ParamCurve, ParamCurveArclen, ParamCurveDistance, Point, Scalar, Vec2};

/// A single line.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line<S = f64> {
    /// The line's start point.
    pub p0: Point<S>,
    /// The line's end point.
    pub p1: Point<S>,
}

impl<S: Scalar> Line<S> {
    /// Create a new line.
    #[inline]
    pub fn new(p0: impl Into<Point<S>>, p1: impl Into<Point<S>>) -> Self {
        Line {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// The length of the line.
    #[inline]
    pub fn length(&self) -> S {
        (self.p1 - self.p0).hypot()
    }

    /// Coefficients of the line as a polynomial in `t`, highest degree first.
    ///
    /// The line is `c[0] t + c[1]`, with the constant term as a vector from
    /// the origin.
    #[inline]
    pub fn polynomial_coefficients(&self) -> [Vec2<S>; 2] {
        [self.p1 - self.p0, self.p0.to_vec2()]
    }

    /// Returns a copy of this `Line` with the end points swapped.
    #[inline]
    #[must_use]
    pub fn reversed(&self) -> Self {
        Line {
            p0: self.p1,
            p1: self.p0,
        }
    }
}

impl<S: Scalar> ParamCurve<S> for Line<S> {
    #[inline]
    fn eval(&self, t: S) -> Point<S> {
        self.p0.lerp(self.p1, t)
    }

    #[inline]
    fn split(&self, t: S) -> (Self, Self) {
        let pm = self.eval(t);
        (Line { p0: self.p0, p1: pm }, Line { p0: pm, p1: self.p1 })
    }

    #[inline]
    fn subsegment(&self, range: Range<S>) -> Self {
        Line {
            p0: self.eval(range.start),
            p1: self.eval(range.end),
        }
    }

    #[inline]
    fn start(&self) -> Point<S> {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point<S> {
        self.p1
    }

    #[inline]
    fn centroid(&self) -> Point<S> {
        self.p0.midpoint(self.p1)
    }
}

impl<S: Scalar> ParamCurveArclen<S> for Line<S> {
    /// The exact length; no sampling needed.
    #[inline]
    fn arclen(&self, _iterations: usize) -> S {
        self.length()
    }
}

impl<S: Scalar> ParamCurveDistance<S> for Line<S> {
    fn nearest(&self, p: Point<S>) -> (S, S) {
        let [d, _] = self.polynomial_coefficients();
        let d_squared = d.hypot2();
        // Stationary point of |p0 + t d - p|²; degenerate lines fall through
        // to the endpoint comparison.
        let t = (p - self.p0).dot(d) / d_squared;
        if t >= S::zero() && t <= S::one() {
            (t, (p - self.eval(t)).hypot2())
        } else {
            let dist0 = (p - self.p0).hypot2();
            let dist1 = (p - self.p1).hypot2();
            if dist1 < dist0 {
                (S::one(), dist1)
            } else {
                (S::zero(), dist0)
            }
        }
    }
}
