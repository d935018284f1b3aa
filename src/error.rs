// Copyright 2024 the Pathwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validation errors.

use thiserror::Error;

/// A reason a path or traversal configuration can't be used.
///
/// Construction through the infallible constructors skips these checks and
/// relies on debug assertions instead; degenerate input then yields `NaN`
/// or clamped parameters in release builds.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum PathError {
    /// The path has no segments.
    #[error("path has no segments")]
    Empty,

    /// A segment has zero length, so arc length can't be inverted on it.
    #[error("segment {index} has zero length")]
    DegenerateSegment {
        /// Index of the segment in the path.
        index: usize,
    },

    /// A segment has a control point that is infinite or `NaN`.
    #[error("segment {index} has a non-finite control point")]
    NonFiniteSegment {
        /// Index of the segment in the path.
        index: usize,
    },

    /// A traversal parameter is negative, infinite or `NaN`.
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidParameter {
        /// The parameter's name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A lookup table or sampling resolution is too small.
    #[error("{name} must be at least {min}, got {value}")]
    InvalidResolution {
        /// The setting's name.
        name: &'static str,
        /// The rejected value.
        value: usize,
        /// The smallest accepted value.
        min: usize,
    },
}
