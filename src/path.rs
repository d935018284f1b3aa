// Copyright 2024 the Pathwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paths made of line and Bézier segments.

use alloc::vec::Vec;
use core::ops::Range;

use crate::{
    CubicBez, Line, ParamCurve, ParamCurveArclen, ParamSpan, PathError, Point, QuadBez, Scalar,
};

/// A segment of a path.
///
/// The set of primitive kinds is closed; code dispatching on it matches
/// exhaustively.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathSeg<S = f64> {
    /// A line segment.
    Line(Line<S>),
    /// A quadratic Bézier segment.
    Quad(QuadBez<S>),
    /// A cubic Bézier segment.
    Cubic(CubicBez<S>),
}

impl<S: Scalar> PathSeg<S> {
    /// The control points of the segment, start point first.
    pub fn control_points(&self) -> impl Iterator<Item = Point<S>> {
        let (points, len) = match *self {
            PathSeg::Line(l) => ([l.p0, l.p1, l.p1, l.p1], 2),
            PathSeg::Quad(q) => ([q.p0, q.p1, q.p2, q.p2], 3),
            PathSeg::Cubic(c) => ([c.p0, c.p1, c.p2, c.p3], 4),
        };
        points.into_iter().take(len)
    }

    /// Does the segment collapse to a single point?
    ///
    /// This is the case exactly when the control polygon has zero length.
    pub fn is_degenerate(&self) -> bool {
        let start = self.start();
        self.control_points()
            .all(|p| (p - start).hypot2() <= S::epsilon() * S::epsilon())
    }

    /// Are all control points finite?
    pub fn is_finite(&self) -> bool {
        self.control_points().all(Point::is_finite)
    }

    /// Returns a copy of this segment running in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        match *self {
            PathSeg::Line(l) => PathSeg::Line(l.reversed()),
            PathSeg::Quad(q) => PathSeg::Quad(q.reversed()),
            PathSeg::Cubic(c) => PathSeg::Cubic(CubicBez {
                p0: c.p3,
                p1: c.p2,
                p2: c.p1,
                p3: c.p0,
            }),
        }
    }
}

impl<S: Scalar> ParamCurve<S> for PathSeg<S> {
    fn eval(&self, t: S) -> Point<S> {
        match *self {
            PathSeg::Line(line) => line.eval(t),
            PathSeg::Quad(quad) => quad.eval(t),
            PathSeg::Cubic(cubic) => cubic.eval(t),
        }
    }

    fn split(&self, t: S) -> (Self, Self) {
        match *self {
            PathSeg::Line(line) => {
                let (a, b) = line.split(t);
                (PathSeg::Line(a), PathSeg::Line(b))
            }
            PathSeg::Quad(quad) => {
                let (a, b) = quad.split(t);
                (PathSeg::Quad(a), PathSeg::Quad(b))
            }
            PathSeg::Cubic(cubic) => {
                let (a, b) = cubic.split(t);
                (PathSeg::Cubic(a), PathSeg::Cubic(b))
            }
        }
    }

    fn subsegment(&self, range: Range<S>) -> Self {
        match *self {
            PathSeg::Line(line) => PathSeg::Line(line.subsegment(range)),
            PathSeg::Quad(quad) => PathSeg::Quad(quad.subsegment(range)),
            PathSeg::Cubic(cubic) => PathSeg::Cubic(cubic.subsegment(range)),
        }
    }

    fn start(&self) -> Point<S> {
        match *self {
            PathSeg::Line(line) => line.p0,
            PathSeg::Quad(quad) => quad.p0,
            PathSeg::Cubic(cubic) => cubic.p0,
        }
    }

    fn end(&self) -> Point<S> {
        match *self {
            PathSeg::Line(line) => line.p1,
            PathSeg::Quad(quad) => quad.p2,
            PathSeg::Cubic(cubic) => cubic.p3,
        }
    }

    fn centroid(&self) -> Point<S> {
        match *self {
            PathSeg::Line(line) => line.centroid(),
            PathSeg::Quad(quad) => quad.centroid(),
            PathSeg::Cubic(cubic) => cubic.centroid(),
        }
    }
}

impl<S: Scalar> ParamCurveArclen<S> for PathSeg<S> {
    fn arclen(&self, iterations: usize) -> S {
        match *self {
            PathSeg::Line(line) => line.arclen(iterations),
            PathSeg::Quad(quad) => quad.arclen(iterations),
            PathSeg::Cubic(cubic) => cubic.arclen(iterations),
        }
    }
}

impl<S: Scalar> From<Line<S>> for PathSeg<S> {
    #[inline]
    fn from(line: Line<S>) -> Self {
        PathSeg::Line(line)
    }
}

impl<S: Scalar> From<QuadBez<S>> for PathSeg<S> {
    #[inline]
    fn from(quad: QuadBez<S>) -> Self {
        PathSeg::Quad(quad)
    }
}

impl<S: Scalar> From<CubicBez<S>> for PathSeg<S> {
    #[inline]
    fn from(cubic: CubicBez<S>) -> Self {
        PathSeg::Cubic(cubic)
    }
}

/// An ordered sequence of segments traversed end to end.
///
/// Segments are expected to be connected, each starting where the previous
/// one ends. This isn't enforced; traversal simply concatenates their
/// lengths.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path<S = f64> {
    segments: Vec<PathSeg<S>>,
}

impl<S: Scalar> Path<S> {
    /// Create a new, empty path.
    #[inline]
    pub fn new() -> Self {
        Path {
            segments: Vec::new(),
        }
    }

    /// Create a path from a vector of segments.
    #[inline]
    pub fn from_vec(segments: Vec<PathSeg<S>>) -> Self {
        Path { segments }
    }

    /// Append a segment.
    #[inline]
    pub fn push(&mut self, seg: impl Into<PathSeg<S>>) {
        self.segments.push(seg.into());
    }

    /// The segments of the path.
    #[inline]
    pub fn segments(&self) -> &[PathSeg<S>] {
        &self.segments
    }

    /// The number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the path has no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The estimated length of the whole path.
    ///
    /// Each curved segment is sampled with `iterations` chords.
    pub fn arclen(&self, iterations: usize) -> S {
        self.segments
            .iter()
            .fold(S::zero(), |sum, seg| sum + seg.arclen(iterations))
    }

    /// Check that the path can be traversed.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Empty`] for a path without segments, and the
    /// first non-finite or zero-length segment otherwise.
    pub fn validate(&self) -> Result<(), PathError> {
        if self.segments.is_empty() {
            return Err(PathError::Empty);
        }
        for (index, seg) in self.segments.iter().enumerate() {
            if !seg.is_finite() {
                return Err(PathError::NonFiniteSegment { index });
            }
            if seg.is_degenerate() {
                return Err(PathError::DegenerateSegment { index });
            }
        }
        Ok(())
    }

    /// Replace every cubic segment with quadratics.
    ///
    /// See [`CubicBez::to_quads`] for the meaning of `tolerance`. The
    /// quadratics keep the direction of the cubic they replace, so the path
    /// stays connected.
    #[must_use]
    pub fn to_quadratic(&self, tolerance: S) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len());
        for seg in &self.segments {
            match seg {
                PathSeg::Cubic(cubic) => segments.extend(
                    cubic
                        .to_quads(tolerance)
                        .into_iter()
                        .map(|(_, _, q)| PathSeg::Quad(q)),
                ),
                PathSeg::Line(_) | PathSeg::Quad(_) => segments.push(*seg),
            }
        }
        Path { segments }
    }

    /// The pieces of the path covered by traversal spans.
    ///
    /// Spans referring to segments this path doesn't have are skipped.
    pub fn spans_to_segments<'a>(
        &'a self,
        spans: &'a [ParamSpan<S>],
    ) -> impl Iterator<Item = PathSeg<S>> + 'a {
        spans.iter().filter_map(|span| {
            self.segments
                .get(span.seg_index)
                .map(|seg| seg.subsegment(span.t0..span.t1))
        })
    }
}

/// Builds a connected [`Path`] one segment at a time.
///
/// Every segment starts where the previous one ended.
///
/// ```
/// use pathwalk::PathBuilder;
///
/// let path = PathBuilder::new((0.0, 0.0))
///     .line_to((1.0, 0.0))
///     .quad_to((2.0, 0.0), (2.0, 1.0))
///     .curve_to((2.0, 2.0), (3.0, 3.0), (4.0, 2.0))
///     .build();
/// assert_eq!(path.len(), 3);
/// assert!(path.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct PathBuilder<S = f64> {
    current: Point<S>,
    segments: Vec<PathSeg<S>>,
}

impl<S: Scalar> PathBuilder<S> {
    /// Start a path at `p`.
    #[inline]
    pub fn new(p: impl Into<Point<S>>) -> Self {
        PathBuilder {
            current: p.into(),
            segments: Vec::new(),
        }
    }

    /// Add a line to `p`.
    #[must_use]
    pub fn line_to(mut self, p: impl Into<Point<S>>) -> Self {
        let p1 = p.into();
        self.segments.push(PathSeg::Line(Line {
            p0: self.current,
            p1,
        }));
        self.current = p1;
        self
    }

    /// Add a quadratic Bézier through control point `p1` to `p2`.
    #[must_use]
    pub fn quad_to(mut self, p1: impl Into<Point<S>>, p2: impl Into<Point<S>>) -> Self {
        let p2 = p2.into();
        self.segments.push(PathSeg::Quad(QuadBez {
            p0: self.current,
            p1: p1.into(),
            p2,
        }));
        self.current = p2;
        self
    }

    /// Add a cubic Bézier through control points `p1` and `p2` to `p3`.
    #[must_use]
    pub fn curve_to(
        mut self,
        p1: impl Into<Point<S>>,
        p2: impl Into<Point<S>>,
        p3: impl Into<Point<S>>,
    ) -> Self {
        let p3 = p3.into();
        self.segments.push(PathSeg::Cubic(CubicBez {
            p0: self.current,
            p1: p1.into(),
            p2: p2.into(),
            p3,
        }));
        self.current = p3;
        self
    }

    /// The end point of the last segment, or the start point.
    #[inline]
    pub fn current_point(&self) -> Point<S> {
        self.current
    }

    /// Finish the path.
    #[inline]
    pub fn build(self) -> Path<S> {
        Path::from_vec(self.segments)
    }
}

impl<S: Scalar> From<Vec<PathSeg<S>>> for Path<S> {
    #[inline]
    fn from(segments: Vec<PathSeg<S>>) -> Self {
        Path::from_vec(segments)
    }
}

impl<S: Scalar, T: Into<PathSeg<S>>> FromIterator<T> for Path<S> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Path::from_vec(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Scalar, T: Into<PathSeg<S>>> Extend<T> for Path<S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.segments.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a, S: Scalar> IntoIterator for &'a Path<S> {
    type Item = &'a PathSeg<S>;
    type IntoIter = core::slice::Iter<'a, PathSeg<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        CubicBez, Line, ParamCurve, ParamSpan, Path, PathBuilder, PathError, PathSeg, Point,
        QuadBez,
    };
    use approx::assert_abs_diff_eq;

    fn three_kinds() -> Path {
        let mut path = Path::new();
        path.push(Line::new((0.0, 0.0), (1.0, 0.0)));
        path.push(QuadBez::new((1.0, 0.0), (2.0, 0.0), (2.0, 1.0)));
        path.push(CubicBez::new((2.0, 1.0), (2.0, 2.0), (3.0, 3.0), (4.0, 2.0)));
        path
    }

    #[test]
    fn builder_connects_segments() {
        let built = PathBuilder::new((0.0, 0.0))
            .line_to((1.0, 0.0))
            .quad_to((2.0, 0.0), (2.0, 1.0))
            .curve_to((2.0, 2.0), (3.0, 3.0), (4.0, 2.0));
        assert_eq!(built.current_point(), Point::new(4.0, 2.0));
        assert_eq!(built.build(), three_kinds());
    }

    #[test]
    fn validate_accepts_connected_path() {
        assert_eq!(three_kinds().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_bad_paths() {
        assert_eq!(Path::<f64>::new().validate(), Err(PathError::Empty));

        let mut path = three_kinds();
        path.push(QuadBez::new((4.0, 2.0), (4.0, 2.0), (4.0, 2.0)));
        assert_eq!(
            path.validate(),
            Err(PathError::DegenerateSegment { index: 3 })
        );

        let path: Path = [Line::new((0.0, 0.0), (f64::NAN, 1.0))].into_iter().collect();
        assert_eq!(
            path.validate(),
            Err(PathError::NonFiniteSegment { index: 0 })
        );
    }

    #[test]
    fn loop_is_not_degenerate() {
        // Goes out and comes back; zero chord but non-zero length.
        let seg = PathSeg::Quad(QuadBez::new((0.0, 0.0), (1.0, 1.0), (0.0, 0.0)));
        assert!(!seg.is_degenerate());
    }

    #[test]
    fn path_arclen() {
        let path: Path = [
            Line::new((0.0, 0.0), (3.0, 4.0)),
            Line::new((3.0, 4.0), (3.0, 0.0)),
        ]
        .into_iter()
        .collect();
        assert_abs_diff_eq!(path.arclen(1), 9.0, epsilon = 1e-12);
    }

    #[test]
    fn to_quadratic_keeps_connectivity() {
        let quads = three_kinds().to_quadratic(1e-4);
        assert!(quads.len() > 3);
        assert!(quads
            .segments()
            .iter()
            .all(|seg| !matches!(seg, PathSeg::Cubic(_))));
        for pair in quads.segments().windows(2) {
            assert!((pair[0].end() - pair[1].start()).hypot() < 1e-9);
        }
        assert_eq!(quads.segments()[0].start(), Point::new(0.0, 0.0));
        assert!((quads.segments()[quads.len() - 1].end() - Point::new(4.0, 2.0)).hypot() < 1e-9);
    }

    #[test]
    fn spans_to_segments_follow_spans() {
        let path = three_kinds();
        let spans = [
            ParamSpan {
                seg_index: 0,
                t0: 0.5,
                t1: 1.0,
            },
            ParamSpan {
                seg_index: 1,
                t0: 0.0,
                t1: 0.25,
            },
            ParamSpan {
                seg_index: 7,
                t0: 0.0,
                t1: 1.0,
            },
        ];
        let pieces: Vec<_> = path.spans_to_segments(&spans).collect();
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].start(), Point::new(0.5, 0.0));
        assert_eq!(pieces[0].end(), Point::new(1.0, 0.0));
        let quad = path.segments()[1];
        assert!((pieces[1].end() - quad.eval(0.25)).hypot() < 1e-12);
    }

    #[test]
    fn reversed_segment() {
        let seg = PathSeg::Cubic(CubicBez::new((0.0, 0.0), (1.0, 2.0), (3.0, 2.0), (4.0, 0.0)));
        let rev = seg.reversed();
        assert_eq!(rev.start(), seg.end());
        assert!((rev.eval(0.3) - seg.eval(0.7)).hypot() < 1e-12);
    }
}
