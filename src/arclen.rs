// Copyright 2024 the Pathwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arc length reparametrization.
//!
//! Bézier curves are not parametrized by arc length: equal steps in `t`
//! cover unequal distances along the curve. The types here map a distance
//! along a segment back to the parameter reaching it, so a traversal can
//! move at constant speed.
//!
//! Lines need no table; their parameter is a scaled distance. Curves are
//! sampled densely once, and the inverse is stored in a small lookup table
//! that is linearly interpolated on query.

use alloc::vec::Vec;

use crate::{ParamCurve, PathError, PathSeg, Scalar};

/// Resolution settings for [`LutReparam`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReparamConfig {
    /// Number of entries in the lookup table, at least 2.
    pub lut_size: usize,
    /// Number of chords the curve is sampled with while building the
    /// table, at least 1.
    pub max_subdivisions: usize,
}

impl ReparamConfig {
    /// Create new resolution settings.
    #[inline]
    pub const fn new(lut_size: usize, max_subdivisions: usize) -> Self {
        ReparamConfig {
            lut_size,
            max_subdivisions,
        }
    }

    /// Check that both resolutions are large enough.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidResolution`] naming the first setting
    /// that is too small.
    pub fn validate(&self) -> Result<(), PathError> {
        if self.lut_size < 2 {
            return Err(PathError::InvalidResolution {
                name: "lut_size",
                value: self.lut_size,
                min: 2,
            });
        }
        if self.max_subdivisions < 1 {
            return Err(PathError::InvalidResolution {
                name: "max_subdivisions",
                value: self.max_subdivisions,
                min: 1,
            });
        }
        Ok(())
    }
}

impl Default for ReparamConfig {
    fn default() -> Self {
        ReparamConfig::new(128, 1024)
    }
}

/// Table-based inverse of arc length for a curved segment.
#[derive(Clone, Debug, PartialEq)]
pub struct LutReparam<S = f64> {
    /// Parameter values at uniformly spaced arc lengths, from `0` at
    /// arc length zero to `1` at `max_arclen`.
    parameter_lut: Vec<S>,
    max_arclen: S,
}

impl<S: Scalar> LutReparam<S> {
    /// Build the lookup table for `curve`.
    ///
    /// The curve is sampled with `config.max_subdivisions` chords. Each
    /// table entry is found by binary search over the cumulative chord
    /// lengths, interpolating linearly inside the chord containing it.
    ///
    /// The curve must have non-zero length and `config` must pass
    /// [`ReparamConfig::validate`]; both are debug-asserted. Resolutions
    /// that are too small are raised to their minimum.
    pub fn new<C: ParamCurve<S>>(curve: &C, config: ReparamConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid {config:?}");
        let n = config.max_subdivisions.max(1);
        let lut_size = config.lut_size.max(2);
        let step = S::from_usize(n).recip();

        let mut cumulative = Vec::with_capacity(n + 1);
        cumulative.push(S::zero());
        let mut last = curve.eval(S::zero());
        let mut sum = S::zero();
        for i in 1..=n {
            let next = curve.eval(step * S::from_usize(i));
            sum = sum + (next - last).hypot();
            cumulative.push(sum);
            last = next;
        }
        let max_arclen = sum;
        debug_assert!(
            max_arclen > S::epsilon(),
            "arc length reparametrization of a zero-length curve"
        );

        let lut_step = max_arclen / S::from_usize(lut_size - 1);
        let mut parameter_lut = Vec::with_capacity(lut_size);
        parameter_lut.push(S::zero());
        for i in 1..lut_size {
            let target = lut_step * S::from_usize(i);
            // First sample at or past the target, never the leading zero.
            let hi = cumulative.partition_point(|&s| s < target).clamp(1, n);
            let (s0, s1) = (cumulative[hi - 1], cumulative[hi]);
            let frac = if s1 > s0 {
                ((target - s0) / (s1 - s0)).max(S::zero()).min(S::one())
            } else {
                S::zero()
            };
            let t = S::lerp(step * S::from_usize(hi - 1), step * S::from_usize(hi), frac);
            parameter_lut.push(t);
        }

        let reparam = LutReparam {
            parameter_lut,
            max_arclen,
        };
        #[cfg(debug_assertions)]
        reparam.check_round_trip(&cumulative, step);
        reparam
    }

    /// The parameter reaching arc length `arclen` along the curve.
    ///
    /// The input is clamped to `[0, max_arclen]`. Results are monotonically
    /// non-decreasing in `arclen`.
    pub fn parameter_value(&self, arclen: S) -> S {
        let max_bucket = self.parameter_lut.len().saturating_sub(1);
        let arclen = arclen.max(S::zero()).min(self.max_arclen);
        let q = arclen / self.max_arclen * S::from_usize(max_bucket);
        let bucket = q.floor();
        // A zero-length curve gives a `NaN` position, which lands on the end.
        match bucket.to_usize().filter(|&b| b < max_bucket) {
            Some(b) => match (self.parameter_lut.get(b), self.parameter_lut.get(b + 1)) {
                (Some(&t0), Some(&t1)) => S::lerp(t0, t1, q - bucket),
                _ => S::one(),
            },
            None => S::one(),
        }
    }

    /// The arc length of the whole curve, as measured by the sampling.
    #[inline]
    pub fn max_arclen(&self) -> S {
        self.max_arclen
    }

    /// The lookup table.
    #[inline]
    pub fn parameter_lut(&self) -> &[S] {
        &self.parameter_lut
    }

    /// Log samples whose arc length doesn't invert back to their parameter.
    ///
    /// The table is linearly interpolated, so curves whose speed changes
    /// sharply can miss by more than one sampling step near the fast
    /// change.
    #[cfg(debug_assertions)]
    fn check_round_trip(&self, cumulative: &[S], step: S) {
        let buckets = S::from_usize(self.parameter_lut.len() - 1);
        let tolerance = step + buckets.recip();
        let worst = cumulative
            .iter()
            .enumerate()
            .map(|(i, &s)| (self.parameter_value(s) - step * S::from_usize(i)).abs())
            .fold(S::zero(), S::max);
        if worst > tolerance {
            log::warn!(
                "arc length lookup table misses by {worst} (tolerance {tolerance}); \
                 consider a larger lut_size"
            );
        }
    }
}

/// Inverse of arc length for a line, which is just a scale.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineReparam<S = f64> {
    /// Reciprocal of the line's length.
    scale: S,
}

impl<S: Scalar> LineReparam<S> {
    /// Reparametrization for a line of the given length.
    ///
    /// The length must be non-zero; this is debug-asserted.
    #[inline]
    pub fn new(length: S) -> Self {
        debug_assert!(length > S::epsilon(), "zero-length line");
        LineReparam {
            scale: length.recip(),
        }
    }

    /// The parameter reaching arc length `arclen`, clamped to the line.
    #[inline]
    pub fn parameter_value(&self, arclen: S) -> S {
        (arclen * self.scale).max(S::zero()).min(S::one())
    }

    /// The length of the line.
    #[inline]
    pub fn max_arclen(&self) -> S {
        self.scale.recip()
    }
}

/// Maps arc length along one path segment to its curve parameter.
#[derive(Clone, Debug, PartialEq)]
pub enum ArcLengthReparam<S = f64> {
    /// Exact inverse for a line.
    Line(LineReparam<S>),
    /// Table for a quadratic Bézier.
    Quad(LutReparam<S>),
    /// Table for a cubic Bézier.
    Cubic(LutReparam<S>),
}

impl<S: Scalar> ArcLengthReparam<S> {
    /// Build the reparametrization of `seg`.
    ///
    /// `lut_size` and `max_subdivisions` only apply to curved segments.
    #[inline]
    pub fn new(seg: &PathSeg<S>, lut_size: usize, max_subdivisions: usize) -> Self {
        Self::with_config(seg, ReparamConfig::new(lut_size, max_subdivisions))
    }

    /// Build the reparametrization of `seg` with the given resolutions.
    pub fn with_config(seg: &PathSeg<S>, config: ReparamConfig) -> Self {
        match seg {
            PathSeg::Line(line) => ArcLengthReparam::Line(LineReparam::new(line.length())),
            PathSeg::Quad(quad) => ArcLengthReparam::Quad(LutReparam::new(quad, config)),
            PathSeg::Cubic(cubic) => ArcLengthReparam::Cubic(LutReparam::new(cubic, config)),
        }
    }

    /// The length of the segment.
    #[inline]
    pub fn max_arclen(&self) -> S {
        match self {
            ArcLengthReparam::Line(r) => r.max_arclen(),
            ArcLengthReparam::Quad(r) | ArcLengthReparam::Cubic(r) => r.max_arclen(),
        }
    }

    /// The parameter reaching arc length `arclen` along the segment.
    ///
    /// The result is always within `[0, 1]`.
    #[inline]
    pub fn parameter_value(&self, arclen: S) -> S {
        match self {
            ArcLengthReparam::Line(r) => r.parameter_value(arclen),
            ArcLengthReparam::Quad(r) | ArcLengthReparam::Cubic(r) => r.parameter_value(arclen),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        arc_length, ArcLengthReparam, CubicBez, Line, LineReparam, LutReparam, ParamCurve,
        PathError, PathSeg, Point, QuadBez, ReparamConfig,
    };
    use approx::assert_abs_diff_eq;

    fn curves() -> [PathSeg; 3] {
        [
            QuadBez::new((0.0, 0.0), (0.0, 0.5), (1.0, 1.0)).into(),
            CubicBez::new((0.0, 0.0), (1.0, 2.0), (3.0, 2.0), (4.0, 0.0)).into(),
            CubicBez::new((0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)).into(),
        ]
    }

    #[test]
    fn config_validation() {
        assert_eq!(ReparamConfig::default(), ReparamConfig::new(128, 1024));
        assert_eq!(ReparamConfig::default().validate(), Ok(()));
        assert_eq!(
            ReparamConfig::new(1, 16).validate(),
            Err(PathError::InvalidResolution {
                name: "lut_size",
                value: 1,
                min: 2
            })
        );
        assert!(ReparamConfig::new(16, 0).validate().is_err());
    }

    #[test]
    fn round_trip() {
        let config = ReparamConfig::default();
        let tolerance = 1.0 / config.max_subdivisions as f64;
        for seg in curves() {
            let reparam = ArcLengthReparam::with_config(&seg, config);
            for i in 0..=20 {
                let t = i as f64 / 20.0;
                let s = arc_length(&seg, 0.0, t, config.max_subdivisions);
                let got = reparam.parameter_value(s);
                assert!(
                    (got - t).abs() <= tolerance,
                    "{seg:?}: t={t} s={s} got {got}"
                );
            }
        }
    }

    #[test]
    fn table_is_monotone() {
        for seg in curves() {
            let reparam = LutReparam::new(&seg, ReparamConfig::new(64, 512));
            let lut = reparam.parameter_lut();
            assert_eq!(lut.len(), 64);
            assert_eq!(lut[0], 0.0);
            assert_abs_diff_eq!(lut[63], 1.0, epsilon = 1e-9);
            assert!(lut.windows(2).all(|w| w[0] <= w[1]));

            let mut prev = 0.0;
            for i in 0..=300 {
                let t = reparam.parameter_value(reparam.max_arclen() * i as f64 / 300.0);
                assert!(t >= prev, "{seg:?}: not monotone at {i}");
                prev = t;
            }
        }
    }

    #[test]
    fn clamps_out_of_range() {
        let seg: PathSeg = CubicBez::new((0.0, 0.0), (1.0, 2.0), (3.0, 2.0), (4.0, 0.0)).into();
        let reparam = ArcLengthReparam::new(&seg, 128, 1024);
        assert_eq!(reparam.parameter_value(-3.0), 0.0);
        assert_eq!(reparam.parameter_value(0.0), 0.0);
        assert_abs_diff_eq!(
            reparam.parameter_value(reparam.max_arclen()),
            1.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(reparam.parameter_value(1e9), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn max_arclen_matches_sampling() {
        for seg in curves() {
            let reparam = ArcLengthReparam::with_config(&seg, ReparamConfig::default());
            assert_abs_diff_eq!(
                reparam.max_arclen(),
                arc_length(&seg, 0.0, 1.0, 1024),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn line_is_exact() {
        let line = Line::new((1.0, 1.0), (4.0, 5.0));
        let reparam = ArcLengthReparam::new(&line.into(), 2, 1);
        assert!(matches!(reparam, ArcLengthReparam::Line(_)));
        assert_eq!(reparam.max_arclen(), 5.0);
        assert_eq!(reparam.parameter_value(2.5), 0.5);
        assert_eq!(reparam.parameter_value(-1.0), 0.0);
        assert_eq!(reparam.parameter_value(6.0), 1.0);
        let p = line.eval(reparam.parameter_value(1.0));
        assert!((p - Point::new(1.6, 1.8)).hypot() < 1e-12);

        let direct = LineReparam::new(2.0);
        assert_eq!(direct.parameter_value(0.5), 0.25);
    }

    #[test]
    fn constant_speed_points() {
        // Equal arc length steps give equally spaced points on a curve.
        let cubic = CubicBez::new((0.0, 0.0), (1.0, 2.0), (3.0, 2.0), (4.0, 0.0));
        let reparam = LutReparam::new(&cubic, ReparamConfig::default());
        let n = 16;
        let step = reparam.max_arclen() / n as f64;
        for i in 0..n {
            let t0 = reparam.parameter_value(step * i as f64);
            let t1 = reparam.parameter_value(step * (i + 1) as f64);
            let len = arc_length(&cubic, t0, t1, 256);
            assert_abs_diff_eq!(len, step, epsilon = step * 1e-3);
        }
    }

    #[test]
    fn single_precision() {
        let quad: QuadBez<f32> = QuadBez::new((0.0, 0.0), (0.0, 0.5), (1.0, 1.0));
        let reparam = LutReparam::new(&quad, ReparamConfig::default());
        let s = arc_length(&quad, 0.0, 0.5, 1024);
        assert!((reparam.parameter_value(s) - 0.5).abs() < 1e-3);
    }
}
