// Copyright 2024 the Pathwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constant-speed traversal of 2D curve paths.
//!
//! The pathwalk library moves a window of fixed length along a path made of
//! lines and quadratic and cubic Bézier segments, and reports which piece
//! of each segment is visible at any moment. It's meant for animating
//! "particles" or dashes running along vector paths.
//!
//! Along the way it provides the curve vocabulary such a traversal needs:
//! points and vectors, segments with evaluation and splitting, arc length
//! measurement and its inverse, approximation of cubics by quadratics, and
//! nearest-point queries on lines and quadratics. Everything is generic
//! over [`Scalar`], so it works with `f32` as well as the default `f64`.
//!
//! # Examples
//!
//! Walking a particle along a curved path:
//! ```
//! use pathwalk::{CubicBez, Line, Path, PathTraversal};
//!
//! let mut path: Path = Path::new();
//! path.push(Line::new((0.0, 0.0), (10.0, 0.0)));
//! path.push(CubicBez::new((10.0, 0.0), (15.0, 0.0), (15.0, 10.0), (20.0, 10.0)));
//!
//! let mut traversal = PathTraversal::new(&path, 2.0, 5.0, 0.0);
//! let spans = traversal.update(1.0).to_vec();
//! // After one time unit the particle sits between 3 and 5 on the line.
//! assert_eq!(spans.len(), 1);
//! assert!((spans[0].t0 - 0.3).abs() < 1e-9);
//! assert!((spans[0].t1 - 0.5).abs() < 1e-9);
//!
//! for piece in path.spans_to_segments(&spans) {
//!     // Draw `piece`.
//!     let _ = piece;
//! }
//! ```
//!
//! Approximating a cubic by quadratics:
//! ```
//! use pathwalk::{approximate_by_quadratics, CubicBez, ParamCurveDistance, Point};
//!
//! let cubic = CubicBez::new((0.0, 0.0), (1.0, 2.0), (3.0, 2.0), (4.0, 0.0));
//! let quads = approximate_by_quadratics(&cubic, 0.01);
//! assert!(quads.len() > 1);
//! let d = quads
//!     .iter()
//!     .map(|q| q.distance_from(Point::new(2.0, 1.5)))
//!     .fold(f64::INFINITY, f64::min);
//! assert!(d < 0.1);
//! ```
//!
//! # Features
//!
//! This crate either uses the standard library or the [`libm`] crate,
//! through `num-traits`, for math functionality. The `std` feature is
//! enabled by default, but can be disabled, as long as the `libm` feature is
//! enabled. This is useful for `no_std` environments. The crate uses the
//! `alloc` crate regardless.
//!
//! [`libm`]: https://docs.rs/libm

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(clippy::many_single_char_names, clippy::excessive_precision)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
// The following lints are part of the Linebender standard set,
// but resolving them has been deferred for now.
#![allow(
    clippy::use_self,
    clippy::wildcard_imports,
    clippy::shadow_unrelated,
    clippy::missing_assert_message,
    clippy::exhaustive_enums,
    clippy::match_same_arms,
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason
)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("pathwalk requires either the `std` or `libm` feature");

extern crate alloc;

mod arclen;
pub mod common;
mod cubicbez;
mod error;
mod line;
mod param_curve;
mod path;
mod point;
mod quadbez;
mod scalar;
mod traversal;
mod vec2;

pub use crate::arclen::*;
pub use crate::cubicbez::*;
pub use crate::error::*;
pub use crate::line::*;
pub use crate::param_curve::*;
pub use crate::path::*;
pub use crate::point::*;
pub use crate::quadbez::*;
pub use crate::scalar::*;
pub use crate::traversal::*;
pub use crate::vec2::*;
