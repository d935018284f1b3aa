// Copyright 2024 the Pathwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadratic Bézier segments.

use core::ops::Range;

use arrayvec::ArrayVec;

use crate::common::{real_roots, solve_cubic};
use crate::{CubicBez, ParamCurve, ParamCurveArclen, ParamCurveDistance, Point, Scalar, Vec2};

/// A single quadratic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadBez<S = f64> {
    /// The start point.
    pub p0: Point<S>,
    /// The control point.
    pub p1: Point<S>,
    /// The end point.
    pub p2: Point<S>,
}

impl<S: Scalar> QuadBez<S> {
    /// Create a new quadratic Bézier segment.
    #[inline]
    pub fn new(
        p0: impl Into<Point<S>>,
        p1: impl Into<Point<S>>,
        p2: impl Into<Point<S>>,
    ) -> Self {
        QuadBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
        }
    }

    /// Raise the order by 1.
    ///
    /// Returns a cubic Bézier segment that exactly represents this quadratic.
    #[inline]
    pub fn raise(&self) -> CubicBez<S> {
        let two_thirds = S::two() / S::three();
        CubicBez::new(
            self.p0,
            self.p0 + (self.p1 - self.p0) * two_thirds,
            self.p2 + (self.p1 - self.p2) * two_thirds,
            self.p2,
        )
    }

    /// Coefficients of the curve as a polynomial in `t`, highest degree first.
    ///
    /// The curve is `c[0] t² + c[1] t + c[2]`, with the constant term as a
    /// vector from the origin.
    #[inline]
    pub fn polynomial_coefficients(&self) -> [Vec2<S>; 3] {
        let p0 = self.p0.to_vec2();
        let p1 = self.p1.to_vec2();
        let p2 = self.p2.to_vec2();
        [p0 - p1 * S::two() + p2, (p1 - p0) * S::two(), p0]
    }

    /// Is this curve's control triangle counter-clockwise?
    ///
    /// Degenerate (collinear) triangles count as counter-clockwise.
    #[inline]
    pub fn is_ccw(&self) -> bool {
        (self.p2 - self.p1).cross(self.p1 - self.p0) >= S::zero()
    }

    /// Returns a copy of this curve with the end points swapped.
    #[inline]
    #[must_use]
    pub fn reversed(&self) -> Self {
        QuadBez {
            p0: self.p2,
            p1: self.p1,
            p2: self.p0,
        }
    }
}

impl<S: Scalar> ParamCurve<S> for QuadBez<S> {
    #[inline]
    fn eval(&self, t: S) -> Point<S> {
        let mt = S::one() - t;
        let v = self.p0.to_vec2() * (mt * mt)
            + (self.p1.to_vec2() * (mt * S::two()) + self.p2.to_vec2() * t) * t;
        v.to_point()
    }

    /// Split using de Casteljau.
    fn split(&self, t: S) -> (Self, Self) {
        let p01 = self.p0.lerp(self.p1, t);
        let p12 = self.p1.lerp(self.p2, t);
        let pm = p01.lerp(p12, t);
        (
            QuadBez {
                p0: self.p0,
                p1: p01,
                p2: pm,
            },
            QuadBez {
                p0: pm,
                p1: p12,
                p2: self.p2,
            },
        )
    }

    fn subsegment(&self, range: Range<S>) -> Self {
        let (t0, t1) = (range.start, range.end);
        let p0 = self.eval(t0);
        let p2 = self.eval(t1);
        let p1 = p0 + (self.p1 - self.p0).lerp(self.p2 - self.p1, t0) * (t1 - t0);
        QuadBez { p0, p1, p2 }
    }

    #[inline]
    fn start(&self) -> Point<S> {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point<S> {
        self.p2
    }

    #[inline]
    fn centroid(&self) -> Point<S> {
        let sum = self.p0.to_vec2() + self.p1.to_vec2() + self.p2.to_vec2();
        (sum / S::three()).to_point()
    }
}

impl<S: Scalar> ParamCurveArclen<S> for QuadBez<S> {}

impl<S: Scalar> ParamCurveDistance<S> for QuadBez<S> {
    /// Find the nearest point, using an analytical algorithm based on cubic
    /// root finding.
    ///
    /// The derivative of the squared distance is a cubic in `t`. Its roots
    /// inside [0..1] and both end points are the candidates.
    fn nearest(&self, p: Point<S>) -> (S, S) {
        let [c2, c1, c0] = self.polynomial_coefficients();
        // Direction from `p` to the curve, as a polynomial.
        let c0 = c0 - p.to_vec2();

        // (curve - p) · curve', expanded.
        let a = S::two() * c2.dot(c2);
        let b = S::three() * c2.dot(c1);
        let c = S::two() * c2.dot(c0) + c1.dot(c1);
        let d = c1.dot(c0);

        let mut candidates: ArrayVec<S, 5> = ArrayVec::new();
        if a > S::epsilon() {
            candidates.extend(real_roots(solve_cubic(a, b, c, d)));
        } else if c > S::epsilon() {
            // The control point sits on the chord midpoint; the curve is a
            // uniformly parametrized line.
            candidates.push(-d / c);
        }
        candidates.retain(|t| *t >= S::zero() && *t <= S::one());
        candidates.push(S::zero());
        candidates.push(S::one());

        let mut best = (S::zero(), (self.p0 - p).hypot2());
        for t in candidates {
            let r = (self.eval(t) - p).hypot2();
            if r < best.1 {
                best = (t, r);
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use crate::{ParamCurve, ParamCurveArclen, ParamCurveDistance, Point, QuadBez};
    use approx::assert_abs_diff_eq;

    fn assert_near(p0: Point, p1: Point, epsilon: f64) {
        assert!((p1 - p0).hypot() < epsilon, "{:?} != {:?}", p0, p1);
    }

    #[test]
    fn quadbez_arclen() {
        let q = QuadBez::new((0.0, 0.0), (0.0, 0.5), (1.0, 1.0));
        let true_arclen = 0.5 * 5.0f64.sqrt() + 0.25 * (2.0 + 5.0f64.sqrt()).ln();
        let error = q.arclen(1024) - true_arclen;
        assert!(error.abs() < 1e-5, "error {error:e}");
        // Chords never overestimate.
        assert!(q.arclen(8) <= true_arclen);
    }

    #[test]
    fn quadbez_split() {
        let q = QuadBez::new((3.1, 4.1), (5.9, 2.6), (5.3, 5.8));
        let epsilon = 1e-12;
        for &split_t in &[0.1, 0.5, 0.77] {
            let (a, b) = q.split(split_t);
            assert_eq!(a.p0, q.p0);
            assert_eq!(b.p2, q.p2);
            assert_near(a.p2, q.eval(split_t), epsilon);
            let n = 10;
            for i in 0..=n {
                let t = (i as f64) * (n as f64).recip();
                assert_near(a.eval(t), q.eval(t * split_t), epsilon);
                assert_near(b.eval(t), q.eval(split_t + t * (1.0 - split_t)), epsilon);
            }
        }
    }

    #[test]
    fn quadbez_subsegment() {
        let q = QuadBez::new((3.1, 4.1), (5.9, 2.6), (5.3, 5.8));
        let t0 = 0.1;
        let t1 = 0.8;
        let qs = q.subsegment(t0..t1);
        let epsilon = 1e-12;
        let n = 10;
        for i in 0..=n {
            let t = (i as f64) * (n as f64).recip();
            let ts = t0 + t * (t1 - t0);
            assert_near(q.eval(ts), qs.eval(t), epsilon);
        }
    }

    #[test]
    fn quadbez_raise() {
        let q = QuadBez::new((3.1, 4.1), (5.9, 2.6), (5.3, 5.8));
        let c = q.raise();
        let epsilon = 1e-12;
        let n = 10;
        for i in 0..=n {
            let t = (i as f64) * (n as f64).recip();
            assert_near(q.eval(t), c.eval(t), epsilon);
        }
    }

    #[test]
    fn quadbez_polynomial() {
        let q = QuadBez::new((3.1, 4.1), (5.9, 2.6), (5.3, 5.8));
        let [a, b, c] = q.polynomial_coefficients();
        for &t in &[0.0, 0.3, 0.9, 1.0] {
            let p = (a * (t * t) + b * t + c).to_point();
            assert_near(p, q.eval(t), 1e-12);
        }
    }

    #[test]
    fn quadbez_nearest() {
        fn verify(result: (f64, f64), expected: f64) {
            assert!(
                (result.0 - expected).abs() < 1e-6,
                "got {:?} expected {}",
                result,
                expected
            );
        }
        // y = x^2
        let q = QuadBez::new((-1.0, 1.0), (0.0, -1.0), (1.0, 1.0));
        verify(q.nearest(Point::new(0.0, 0.0)), 0.5);
        verify(q.nearest(Point::new(0.0, 0.1)), 0.5);
        verify(q.nearest(Point::new(0.0, -0.1)), 0.5);
        verify(q.nearest(Point::new(0.5, 0.25)), 0.75);
        verify(q.nearest(Point::new(1.0, 1.0)), 1.0);
        verify(q.nearest(Point::new(1.1, 1.1)), 1.0);
        verify(q.nearest(Point::new(-1.1, 1.1)), 0.0);
    }

    #[test]
    fn quadbez_distance() {
        // y = x^2
        let q = QuadBez::new((-1.0, 1.0), (0.0, -1.0), (1.0, 1.0));
        assert_abs_diff_eq!(q.squared_distance_from(Point::new(0.0, -0.5)), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(q.distance_from(Point::new(0.5, 0.25)), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(q.distance_from(Point::new(2.0, 1.0)), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn straight_quadbez_distance() {
        let q = QuadBez::new((0.0, 0.0), (1.0, 0.0), (2.0, 0.0));
        assert_abs_diff_eq!(q.distance_from(Point::new(0.5, 2.0)), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(q.nearest(Point::new(0.5, 2.0)).0, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn quadbez_orientation() {
        let q = QuadBez::new((0.0, 0.0), (1.0, 1.0), (2.0, 0.0));
        assert_ne!(q.is_ccw(), q.reversed().is_ccw());
    }
}
