// Copyright 2024 the Pathwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments.

use alloc::vec::Vec;
use core::ops::Range;

use smallvec::SmallVec;

use crate::{ParamCurve, ParamCurveArclen, Point, QuadBez, Scalar, Vec2};

/// Maximum number of times a piece of a cubic is bisected while looking for
/// a quadratic approximation.
///
/// Midpoint deviation shrinks by roughly a factor of eight per bisection, so
/// well-formed curves never get close to this.
pub const MAX_QUAD_SUBDIVISION_DEPTH: u32 = 16;

/// A single cubic Bézier segment.
///
/// There is no distance query for cubics: [`ParamCurveDistance`] is only
/// implemented for lines and quadratics. Approximate the cubic with
/// [`approximate_by_quadratics`] first if a distance is needed.
///
/// [`ParamCurveDistance`]: crate::ParamCurveDistance
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicBez<S = f64> {
    /// The start point.
    pub p0: Point<S>,
    /// The first control point.
    pub p1: Point<S>,
    /// The second control point.
    pub p2: Point<S>,
    /// The end point.
    pub p3: Point<S>,
}

impl<S: Scalar> CubicBez<S> {
    /// Create a new cubic Bézier segment.
    #[inline]
    pub fn new(
        p0: impl Into<Point<S>>,
        p1: impl Into<Point<S>>,
        p2: impl Into<Point<S>>,
        p3: impl Into<Point<S>>,
    ) -> Self {
        CubicBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// Convert to quadratic Béziers.
    ///
    /// Each entry holds the start and end parameter in the cubic of the
    /// quadratic, along with the quadratic itself. The quadratics follow the
    /// cubic's direction and are end-to-end continuous.
    ///
    /// A piece of the cubic is accepted once the quadratic built from the
    /// intersection of its end tangents deviates from it by less than
    /// `tolerance` at `t = 0.5`; otherwise it is bisected. See
    /// [`approximate_by_quadratics`] for the variant that normalizes the
    /// orientation of every quadratic.
    ///
    /// `tolerance` must be positive; this is debug-asserted. In release
    /// builds a zero, negative or `NaN` tolerance bisects every piece down to
    /// [`MAX_QUAD_SUBDIVISION_DEPTH`].
    pub fn to_quads(&self, tolerance: S) -> Vec<(S, S, QuadBez<S>)> {
        debug_assert!(
            tolerance > S::zero(),
            "approximation tolerance must be positive, got {tolerance}"
        );
        let mut result = Vec::new();
        let mut stack: SmallVec<[(CubicBez<S>, S, S, u32); 16]> = SmallVec::new();
        stack.push((*self, S::zero(), S::one(), 0));
        let mut capped = false;
        while let Some((c, t0, t1, depth)) = stack.pop() {
            let candidate = match c.tangent_intersection() {
                Some(p1) => Some(QuadBez {
                    p0: c.p0,
                    p1,
                    p2: c.p3,
                }),
                None if c.is_flat() => Some(c.midpoint_quad()),
                None => {
                    log::trace!("parallel end tangents at t = {t0}..{t1}, bisecting");
                    None
                }
            };
            let mid = c.eval(S::half());
            match candidate.filter(|q| (q.eval(S::half()) - mid).hypot() < tolerance) {
                Some(q) => result.push((t0, t1, q)),
                None if depth >= MAX_QUAD_SUBDIVISION_DEPTH => {
                    capped = true;
                    result.push((t0, t1, c.midpoint_quad()));
                }
                None => {
                    let tm = S::half() * (t0 + t1);
                    let (left, right) = c.subdivide();
                    // Pushed in reverse so that output follows the curve.
                    stack.push((right, tm, t1, depth + 1));
                    stack.push((left, t0, tm, depth + 1));
                }
            }
        }
        if capped {
            log::warn!(
                "cubic to quadratic approximation hit the subdivision cap of {} levels with tolerance {}",
                MAX_QUAD_SUBDIVISION_DEPTH,
                tolerance
            );
        }
        result
    }

    /// Intersection of the end tangent lines, using Cramer's rule.
    ///
    /// A tangent whose handle has zero length falls back to the direction of
    /// the other control point. Returns `None` when the tangents are parallel.
    fn tangent_intersection(&self) -> Option<Point<S>> {
        let eps = S::epsilon();
        let mut d0 = self.p1 - self.p0;
        if d0.hypot2() <= eps {
            d0 = self.p2 - self.p0;
        }
        let mut d1 = self.p2 - self.p3;
        if d1.hypot2() <= eps {
            d1 = self.p1 - self.p3;
        }
        // p0 + u d0 = p3 + v d1
        let det = d0.cross(d1);
        let scale = d0.hypot() * d1.hypot();
        if !(det.abs() > eps * scale) {
            return None;
        }
        let u = (self.p3 - self.p0).cross(d1) / det;
        let p1 = self.p0 + d0 * u;
        p1.is_finite().then_some(p1)
    }

    /// Are all control points on the chord (within epsilon)?
    fn is_flat(&self) -> bool {
        let chord = self.p3 - self.p0;
        let tolerance = S::epsilon() * chord.hypot2().max(S::one());
        chord.cross(self.p1 - self.p0).abs() <= tolerance
            && chord.cross(self.p2 - self.p0).abs() <= tolerance
    }

    /// The quadratic through the same end points that matches the cubic
    /// exactly at `t = 0.5`.
    fn midpoint_quad(&self) -> QuadBez<S> {
        let quarter = S::half() * S::half();
        let p1x2 = self.p1.to_vec2() * S::three() - self.p0.to_vec2();
        let p2x2 = self.p2.to_vec2() * S::three() - self.p3.to_vec2();
        QuadBez {
            p0: self.p0,
            p1: ((p1x2 + p2x2) * quarter).to_point(),
            p2: self.p3,
        }
    }

    /// The derivative of the curve at `t`.
    fn deriv_at(&self, t: S) -> Vec2<S> {
        let three = S::three();
        let d0 = (self.p1 - self.p0) * three;
        let d1 = (self.p2 - self.p1) * three;
        let d2 = (self.p3 - self.p2) * three;
        let mt = S::one() - t;
        d0 * (mt * mt) + (d1 * (mt * S::two()) + d2 * t) * t
    }
}

/// Approximate a cubic with a sequence of quadratics.
///
/// Every returned quadratic deviates from the corresponding piece of the
/// cubic by less than `tolerance` at its parametric midpoint. Each quadratic
/// is oriented so that its control triangle is counter-clockwise, swapping
/// its end points if needed, which is the form a curve rasterizer expects.
/// Use [`CubicBez::to_quads`] when the direction of travel matters.
///
/// Pieces that can't be resolved within [`MAX_QUAD_SUBDIVISION_DEPTH`]
/// bisections are emitted anyway and a warning is logged.
pub fn approximate_by_quadratics<S: Scalar>(cubic: &CubicBez<S>, tolerance: S) -> Vec<QuadBez<S>> {
    cubic
        .to_quads(tolerance)
        .into_iter()
        .map(|(_, _, q)| if q.is_ccw() { q } else { q.reversed() })
        .collect()
}

impl<S: Scalar> ParamCurve<S> for CubicBez<S> {
    #[inline]
    fn eval(&self, t: S) -> Point<S> {
        let mt = S::one() - t;
        let three = S::three();
        let v = self.p0.to_vec2() * (mt * mt * mt)
            + (self.p1.to_vec2() * (mt * mt * three)
                + (self.p2.to_vec2() * (mt * three) + self.p3.to_vec2() * t) * t)
                * t;
        v.to_point()
    }

    /// Split using de Casteljau.
    fn split(&self, t: S) -> (Self, Self) {
        let p01 = self.p0.lerp(self.p1, t);
        let p12 = self.p1.lerp(self.p2, t);
        let p23 = self.p2.lerp(self.p3, t);
        let p012 = p01.lerp(p12, t);
        let p123 = p12.lerp(p23, t);
        let pm = p012.lerp(p123, t);
        (
            CubicBez {
                p0: self.p0,
                p1: p01,
                p2: p012,
                p3: pm,
            },
            CubicBez {
                p0: pm,
                p1: p123,
                p2: p23,
                p3: self.p3,
            },
        )
    }

    fn subsegment(&self, range: Range<S>) -> Self {
        let (t0, t1) = (range.start, range.end);
        let p0 = self.eval(t0);
        let p3 = self.eval(t1);
        let scale = (t1 - t0) / S::three();
        let p1 = p0 + self.deriv_at(t0) * scale;
        let p2 = p3 - self.deriv_at(t1) * scale;
        CubicBez { p0, p1, p2, p3 }
    }

    #[inline]
    fn start(&self) -> Point<S> {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point<S> {
        self.p3
    }

    #[inline]
    fn centroid(&self) -> Point<S> {
        let sum = self.p0.to_vec2() + self.p1.to_vec2() + self.p2.to_vec2() + self.p3.to_vec2();
        (sum / S::from_f64(4.0)).to_point()
    }
}

impl<S: Scalar> ParamCurveArclen<S> for CubicBez<S> {}

#[cfg(test)]
mod tests {
    use crate::{approximate_by_quadratics, CubicBez, ParamCurve, ParamCurveArclen, Point};

    fn assert_near(p0: Point, p1: Point, epsilon: f64) {
        assert!((p1 - p0).hypot() < epsilon, "{:?} != {:?}", p0, p1);
    }

    #[test]
    fn cubicbez_arclen() {
        // y = x^2
        let c = CubicBez::new(
            (0.0, 0.0),
            (1.0 / 3.0, 0.0),
            (2.0 / 3.0, 1.0 / 3.0),
            (1.0, 1.0),
        );
        let true_arclen = 0.5 * 5.0f64.sqrt() + 0.25 * (2.0 + 5.0f64.sqrt()).ln();
        let error = c.arclen(1024) - true_arclen;
        assert!(error.abs() < 1e-5, "error {error:e}");
    }

    #[test]
    fn cubicbez_split() {
        let c = CubicBez::new((3.1, 4.1), (5.9, 2.6), (5.3, 5.8), (9.7, 9.3));
        let epsilon = 1e-12;
        for &split_t in &[0.1, 0.5, 0.9] {
            let (a, b) = c.split(split_t);
            assert_eq!(a.p0, c.p0);
            assert_eq!(a.p3, b.p0);
            assert_eq!(b.p3, c.p3);
            let n = 10;
            for i in 0..=n {
                let t = (i as f64) * (n as f64).recip();
                assert_near(a.eval(t), c.eval(t * split_t), epsilon);
                assert_near(b.eval(t), c.eval(split_t + t * (1.0 - split_t)), epsilon);
            }
        }
    }

    #[test]
    fn cubicbez_subsegment() {
        let c = CubicBez::new((3.1, 4.1), (5.9, 2.6), (5.3, 5.8), (9.7, 9.3));
        let t0 = 0.1;
        let t1 = 0.8;
        let cs = c.subsegment(t0..t1);
        let epsilon = 1e-12;
        let n = 10;
        for i in 0..=n {
            let t = (i as f64) * (n as f64).recip();
            let ts = t0 + t * (t1 - t0);
            assert_near(c.eval(ts), cs.eval(t), epsilon);
        }
    }

    #[test]
    fn cubicbez_centroid() {
        let c = CubicBez::new((0.0, 0.0), (1.0, 2.0), (3.0, 2.0), (4.0, 0.0));
        assert_eq!(c.centroid(), Point::new(2.0, 1.0));
    }

    #[test]
    fn cubicbez_to_quads_tolerance() {
        // y = x^3
        let c = CubicBez::new((0.0, 0.0), (1.0 / 3.0, 0.0), (2.0 / 3.0, 0.0), (1.0, 1.0));
        for i in 1..8 {
            let tolerance = 0.1f64.powi(i);
            let quads = c.to_quads(tolerance);
            assert!(!quads.is_empty());
            let mut last_t = 0.0;
            for (t0, t1, q) in quads {
                assert_eq!(t0, last_t);
                last_t = t1;
                let piece = c.subsegment(t0..t1);
                assert_near(q.p0, piece.p0, 1e-9);
                assert_near(q.p2, piece.p3, 1e-9);
                let deviation = (q.eval(0.5) - piece.eval(0.5)).hypot();
                assert!(deviation < tolerance, "got {deviation} wanted {tolerance}");
            }
            assert_eq!(last_t, 1.0);
        }
    }

    #[test]
    fn to_quads_depth_cap() {
        use crate::MAX_QUAD_SUBDIVISION_DEPTH;

        // No piece can meet this tolerance before the cap.
        let c = CubicBez::new((0.0, 0.0), (1.0, 2.0), (3.0, 2.0), (4.0, 0.0));
        let quads = c.to_quads(f64::MIN_POSITIVE);
        assert!(quads.len() <= 1 << MAX_QUAD_SUBDIVISION_DEPTH);
        assert!(quads.len() >= 1 << 12, "only {} pieces", quads.len());
        let mut last_t = 0.0;
        let mut last_end = c.p0;
        for (t0, t1, q) in &quads {
            assert_eq!(*t0, last_t);
            assert_near(q.p0, last_end, 1e-12);
            // Capped pieces match the cubic exactly at their midpoint.
            let piece = c.subsegment(*t0..*t1);
            assert_near(q.eval(0.5), piece.eval(0.5), 1e-9);
            last_t = *t1;
            last_end = q.p2;
        }
        assert_eq!(last_t, 1.0);
        assert_near(last_end, c.p3, 1e-12);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "approximation tolerance must be positive")]
    fn to_quads_rejects_zero_tolerance() {
        let c = CubicBez::new((0.0, 0.0), (1.0, 2.0), (3.0, 2.0), (4.0, 0.0));
        c.to_quads(0.0);
    }

    #[test]
    fn raised_quad_is_one_piece() {
        let q = crate::QuadBez::new((0.0, 0.0), (1.0, 2.0), (2.0, 0.0));
        let quads = q.raise().to_quads(1e-9);
        assert_eq!(quads.len(), 1);
        assert_near(quads[0].2.p1, q.p1, 1e-9);
    }

    #[test]
    fn approximation_is_ccw() {
        // An S-curve yields quadratics bending both ways.
        let c = CubicBez::new((0.0, 0.0), (1.0, 1.0), (2.0, -1.0), (3.0, 0.0));
        let quads = approximate_by_quadratics(&c, 1e-3);
        assert!(quads.len() > 1);
        for q in &quads {
            assert!(q.is_ccw(), "{q:?}");
        }
    }

    #[test]
    fn collinear_cubic() {
        let c = CubicBez::new((0.0, 0.0), (2.0, 0.0), (1.0, 0.0), (3.0, 0.0));
        let quads = c.to_quads(1e-6);
        assert_eq!(quads.len(), 1);
        assert_near(quads[0].2.eval(0.5), c.eval(0.5), 1e-12);
    }

    #[test]
    fn coincident_handles() {
        let c = CubicBez::new((0.0, 0.0), (0.0, 0.0), (3.0, 3.0), (3.0, 3.0));
        let quads = c.to_quads(1e-4);
        assert!(!quads.is_empty());
        for (_, _, q) in quads {
            assert!(q.p1.is_finite());
        }
    }
}
