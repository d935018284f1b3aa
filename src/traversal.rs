// Copyright 2024 the Pathwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Moving a fixed-length window along a path.
//!
//! A [`PathTraversal`] models a particle of constant length travelling
//! along a [`Path`] at constant speed. Each call to
//! [`update`](PathTraversal::update) advances it by a time step and
//! reports the visible part of the path as one [`ParamSpan`] per touched
//! segment.
//!
//! The particle starts entirely before the path, enters it, slides along
//! it, and leaves it past the end. Once its leading edge would start past
//! the end the traversal restarts, including the initial delay.
//!
//! ```
//! use pathwalk::{Line, Path, PathTraversal};
//!
//! let path: Path = [
//!     Line::new((0.0, 0.0), (1.0, 0.0)),
//!     Line::new((1.0, 0.0), (1.0, 1.0)),
//! ]
//! .into_iter()
//! .collect();
//! let mut traversal = PathTraversal::new(&path, 0.5, 1.0, 0.0);
//! let spans = traversal.update(1.3);
//! assert_eq!(spans.len(), 2);
//! assert_eq!(spans[0].seg_index, 0);
//! assert_eq!(spans[1].seg_index, 1);
//! ```

use alloc::vec::Vec;

use crate::{ArcLengthReparam, Path, PathError, PathSeg, ReparamConfig, Scalar};

/// How distance along a segment maps to its curve parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TraversalStrategy {
    /// Positions are arc lengths, so the particle moves at constant
    /// geometric speed and keeps its geometric length.
    #[default]
    ArcLength,
    /// Every segment counts as one unit of progress and the parameter is the
    /// progress inside it.
    ///
    /// The particle's geometric speed and length vary with segment size and
    /// parametrization. No lookup tables are built.
    Uniform,
}

/// Settings for a [`PathTraversal`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraversalConfig<S = f64> {
    /// Length of the visible window, in units of the path's length.
    pub particle_length: S,
    /// Distance travelled per unit of time.
    pub speed: S,
    /// Time that passes before the particle starts moving, repeated on every
    /// cycle.
    pub initial_delay: S,
    /// The position to parameter mapping.
    pub strategy: TraversalStrategy,
    /// Lookup table resolution for curved segments.
    pub reparam: ReparamConfig,
}

impl<S: Scalar> TraversalConfig<S> {
    /// Settings with arc length strategy and default table resolution.
    #[inline]
    pub fn new(particle_length: S, speed: S, initial_delay: S) -> Self {
        TraversalConfig {
            particle_length,
            speed,
            initial_delay,
            strategy: TraversalStrategy::default(),
            reparam: ReparamConfig::default(),
        }
    }

    /// Use the given strategy.
    #[inline]
    #[must_use]
    pub fn with_strategy(mut self, strategy: TraversalStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Use the given lookup table resolution.
    #[inline]
    #[must_use]
    pub fn with_reparam(mut self, reparam: ReparamConfig) -> Self {
        self.reparam = reparam;
        self
    }

    /// Check that every setting is usable.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidParameter`] for a negative or non-finite
    /// value, and [`PathError::InvalidResolution`] for a table resolution
    /// that is too small.
    pub fn validate(&self) -> Result<(), PathError> {
        for (name, value) in [
            ("particle_length", self.particle_length),
            ("speed", self.speed),
            ("initial_delay", self.initial_delay),
        ] {
            if !value.is_finite() || value < S::zero() {
                return Err(PathError::InvalidParameter {
                    name,
                    value: value.to_f64().unwrap_or(f64::NAN),
                });
            }
        }
        self.reparam.validate()
    }
}

/// The visible part of one path segment.
///
/// `t0 <= t1`, both in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamSpan<S = f64> {
    /// Index of the segment in the path.
    pub seg_index: usize,
    /// Parameter where the visible part starts.
    pub t0: S,
    /// Parameter where the visible part ends.
    pub t1: S,
}

/// A window of fixed length moving along a path.
#[derive(Clone, Debug)]
pub struct PathTraversal<S = f64> {
    segments: Vec<PathSeg<S>>,
    /// One entry per segment, empty for the uniform strategy.
    reparams: Vec<ArcLengthReparam<S>>,
    /// Position at the end of each segment.
    cumulative_length: Vec<S>,
    config: TraversalConfig<S>,
    current_time: S,
    current_start: S,
    /// Segment holding the window's trailing edge on the previous update.
    start_hint: usize,
    spans: Vec<ParamSpan<S>>,
}

impl<S: Scalar> PathTraversal<S> {
    /// Start a traversal of `path` with arc length strategy.
    ///
    /// The path and parameters must pass [`PathTraversal::try_new`]'s
    /// checks; this is debug-asserted.
    pub fn new(path: &Path<S>, particle_length: S, speed: S, initial_delay: S) -> Self {
        Self::with_config(
            path,
            TraversalConfig::new(particle_length, speed, initial_delay),
        )
    }

    /// Start a traversal of `path` with the given settings.
    ///
    /// Builds every reparametrization up front.
    pub fn with_config(path: &Path<S>, config: TraversalConfig<S>) -> Self {
        debug_assert!(path.validate().is_ok(), "untraversable path");
        debug_assert!(config.validate().is_ok(), "invalid {config:?}");
        let segments = path.segments().to_vec();
        let (reparams, cumulative_length) = match config.strategy {
            TraversalStrategy::ArcLength => {
                let reparams: Vec<_> = segments
                    .iter()
                    .map(|seg| ArcLengthReparam::with_config(seg, config.reparam))
                    .collect();
                let cumulative = reparams
                    .iter()
                    .scan(S::zero(), |sum, reparam| {
                        *sum = *sum + reparam.max_arclen();
                        Some(*sum)
                    })
                    .collect();
                (reparams, cumulative)
            }
            TraversalStrategy::Uniform => (
                Vec::new(),
                (1..=segments.len()).map(S::from_usize).collect(),
            ),
        };
        PathTraversal {
            segments,
            reparams,
            cumulative_length,
            config,
            current_time: S::zero(),
            current_start: -config.particle_length,
            start_hint: 0,
            spans: Vec::new(),
        }
    }

    /// Start a traversal of `path`, checking the input.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty or has a degenerate or
    /// non-finite segment, or if a parameter is negative or non-finite.
    pub fn try_new(
        path: &Path<S>,
        particle_length: S,
        speed: S,
        initial_delay: S,
    ) -> Result<Self, PathError> {
        Self::try_with_config(
            path,
            TraversalConfig::new(particle_length, speed, initial_delay),
        )
    }

    /// Start a traversal of `path` with the given settings, checking the
    /// input.
    ///
    /// # Errors
    ///
    /// See [`PathTraversal::try_new`] and [`TraversalConfig::validate`].
    pub fn try_with_config(path: &Path<S>, config: TraversalConfig<S>) -> Result<Self, PathError> {
        path.validate()?;
        config.validate()?;
        Ok(Self::with_config(path, config))
    }

    /// Advance by `dt` and return the visible spans, in path order.
    ///
    /// The result is empty while the initial delay runs, while the window
    /// is still entirely before the path, and on the update where it runs
    /// off the end and the traversal restarts. The slice is reused by the
    /// next call.
    pub fn update(&mut self, dt: S) -> &[ParamSpan<S>] {
        self.spans.clear();
        self.current_time = self.current_time + dt;
        if self.current_time < self.config.initial_delay {
            return &self.spans;
        }
        self.current_start = self.current_start + dt * self.config.speed;
        if self.current_start >= self.total_length() {
            log::trace!(
                "particle left the path after {} time units, restarting",
                self.current_time
            );
            self.reset();
            return &self.spans;
        }

        let current_end = self.current_start + self.config.particle_length;
        if current_end < S::zero() {
            return &self.spans;
        }
        let Some(start_idx) = find_segment(
            &self.cumulative_length,
            self.current_start.max(S::zero()),
            self.start_hint,
        ) else {
            return &self.spans;
        };
        self.start_hint = start_idx;
        let last = self.cumulative_length.len() - 1;
        let end_idx = find_segment(&self.cumulative_length, current_end, start_idx).unwrap_or(last);

        let local_start = self.current_start - self.segment_offset(start_idx);
        let t1 = if end_idx > start_idx {
            S::one()
        } else {
            self.parameter_value(start_idx, current_end - self.segment_offset(start_idx))
        };
        self.spans.push(ParamSpan {
            seg_index: start_idx,
            t0: self.parameter_value(start_idx, local_start),
            t1,
        });
        for seg_index in start_idx + 1..end_idx {
            self.spans.push(ParamSpan {
                seg_index,
                t0: S::zero(),
                t1: S::one(),
            });
        }
        if end_idx > start_idx {
            let local_end = current_end - self.segment_offset(end_idx);
            self.spans.push(ParamSpan {
                seg_index: end_idx,
                t0: S::zero(),
                t1: self.parameter_value(end_idx, local_end),
            });
        }

        #[cfg(debug_assertions)]
        self.check_visible_length(current_end);
        &self.spans
    }

    /// Return to the state right after construction.
    pub fn reset(&mut self) {
        self.current_time = S::zero();
        self.current_start = -self.config.particle_length;
        self.start_hint = 0;
    }

    /// Position of the window's end at the end of the path.
    ///
    /// The sum of segment lengths for the arc length strategy, the number of
    /// segments for the uniform one.
    #[inline]
    pub fn total_length(&self) -> S {
        self.cumulative_length.last().copied().unwrap_or(S::zero())
    }

    /// Position of the window's trailing edge; negative before it enters.
    #[inline]
    pub fn current_start(&self) -> S {
        self.current_start
    }

    /// Time since construction or the last restart.
    #[inline]
    pub fn current_time(&self) -> S {
        self.current_time
    }

    /// Position at the end of each segment.
    #[inline]
    pub fn cumulative_length(&self) -> &[S] {
        &self.cumulative_length
    }

    /// The reparametrization of each segment; empty for the uniform
    /// strategy.
    #[inline]
    pub fn reparams(&self) -> &[ArcLengthReparam<S>] {
        &self.reparams
    }

    /// The settings this traversal runs with.
    #[inline]
    pub fn config(&self) -> &TraversalConfig<S> {
        &self.config
    }

    /// Position at the start of segment `index`.
    fn segment_offset(&self, index: usize) -> S {
        index
            .checked_sub(1)
            .and_then(|i| self.cumulative_length.get(i))
            .copied()
            .unwrap_or(S::zero())
    }

    /// Curve parameter at position `local` inside segment `index`.
    fn parameter_value(&self, index: usize, local: S) -> S {
        match self.config.strategy {
            TraversalStrategy::ArcLength => self
                .reparams
                .get(index)
                .map_or(S::one(), |reparam| reparam.parameter_value(local)),
            TraversalStrategy::Uniform => local.max(S::zero()).min(S::one()),
        }
    }

    /// Log when the spans of a window fully inside the path don't add up to
    /// the particle length.
    #[cfg(debug_assertions)]
    fn check_visible_length(&self, current_end: S) {
        if self.config.strategy != TraversalStrategy::ArcLength
            || self.current_start < S::zero()
            || current_end > self.total_length()
        {
            return;
        }
        let visible = self
            .spans
            .iter()
            .filter_map(|span| {
                let seg = self.segments.get(span.seg_index)?;
                Some(crate::arc_length(seg, span.t0, span.t1, 256))
            })
            .fold(S::zero(), |sum, len| sum + len);
        let expected = self.config.particle_length;
        let tolerance = expected * S::from_f64(0.01) + S::epsilon().sqrt();
        if (visible - expected).abs() > tolerance {
            log::warn!("visible length {visible} differs from particle length {expected}");
        }
    }
}

/// First index whose cumulative length exceeds `x`, scanning forward from
/// `hint`.
///
/// The scan restarts from the beginning when `hint` is already past `x`.
/// Positions only grow between restarts, so the scan is usually short.
fn find_segment<S: Scalar>(cumulative: &[S], x: S, hint: usize) -> Option<usize> {
    let behind = hint
        .checked_sub(1)
        .and_then(|i| cumulative.get(i))
        .map_or(hint > 0, |&c| c > x);
    let from = if behind { 0 } else { hint };
    cumulative
        .get(from..)?
        .iter()
        .position(|&c| c > x)
        .map(|i| i + from)
}
