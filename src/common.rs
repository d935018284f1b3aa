// Copyright 2024 the Pathwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations

use arrayvec::ArrayVec;

use crate::Scalar;

/// Find the real roots of the cubic equation `a t³ + b t² + c t + d = 0`.
///
/// Exactly three slots are returned. Each slot holds either a real root or
/// `NaN`, meaning "no further real root". Repeated roots occupy as many
/// slots as their multiplicity. The slots are not sorted.
///
/// The equation is normalized to a monic cubic and then depressed with the
/// substitution `t = x - b/3`, giving `x³ + p x + q = 0`. The sign of the
/// discriminant `Δ = p³/27 + q²/4` then selects the method:
///
/// * `Δ > ε`: a single real root from Cardano's formula; the complex pair
///   is not reported.
/// * `|Δ| ≤ ε`: a triple root if `p ≈ 0`, otherwise a simple root and a
///   double root.
/// * `Δ < -ε`: three distinct real roots from Viète's trigonometric formula.
///
/// The leading coefficient `a` must be greater than epsilon. This is
/// checked with a debug assertion; in release builds a degenerate `a`
/// produces non-finite roots. Use [`real_roots`] to drop the empty slots.
pub fn solve_cubic<S: Scalar>(a: S, b: S, c: S, d: S) -> [S; 3] {
    let eps = S::epsilon();
    debug_assert!(
        a > eps,
        "leading coefficient of a cubic must be positive and non-negligible, got {a}"
    );
    let three = S::three();
    let mut roots = [S::nan(); 3];

    let b = b / a;
    let c = c / a;
    let d = d / a;

    // Depressed cubic x³ + px + q.
    let b_sq = b * b;
    let p = c - b_sq / three;
    let q = (S::two() * b * b_sq - S::from_f64(9.0) * b * c) / S::from_f64(27.0) + d;

    let delta = p * p * p / S::from_f64(27.0) + q * q / S::from_f64(4.0);

    if delta > eps {
        let minus_half_q = -q * S::half();
        let sqrt_delta = delta.sqrt();
        roots[0] = (minus_half_q + sqrt_delta).cbrt() + (minus_half_q - sqrt_delta).cbrt();
    } else if delta > -eps {
        if p.abs() <= eps {
            roots = [S::zero(); 3];
        } else {
            let simple = three * q / p;
            let double = -S::half() * simple;
            roots = [simple, double, double];
        }
    } else {
        // Viète. Here p < 0, so both square roots are real.
        let scale = S::two() * (-p / three).sqrt();
        let arg = three * q / (S::two() * p) * (-three / p).sqrt();
        let theta = arg.max(-S::one()).min(S::one()).acos() / three;
        let step = S::TAU() / three;
        for (k, root) in roots.iter_mut().enumerate() {
            *root = scale * (theta - step * S::from_usize(k)).cos();
        }
    }

    let shift = b / three;
    for root in &mut roots {
        *root = *root - shift;
    }
    roots
}

/// Collect the finite slots returned by [`solve_cubic`].
pub fn real_roots<S: Scalar>(roots: [S; 3]) -> ArrayVec<S, 3> {
    roots.into_iter().filter(|r| r.is_finite()).collect()
}
