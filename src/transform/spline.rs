//! Catmull-Rom style interpolating spline keyed by progress.

use crate::foundation::core::Vec3;
use crate::foundation::error::{CineError, CineResult};
use crate::transform::non_linear::clamp01;

/// C¹ cubic Hermite spline through `points` at progress `knots`.
///
/// Tangents are finite differences scaled by `2 * tension`; `0.5` gives the classic
/// Catmull-Rom curve and `0.0` degenerates to flat tangents at every key.
#[derive(Clone, Debug, PartialEq)]
pub struct CatmullRom {
    knots: Vec<f64>,
    points: Vec<Vec3>,
    tangents: Vec<Vec3>,
}

impl CatmullRom {
    /// Build a spline. Without explicit `knots` the points are spread uniformly over `[0, 1]`.
    pub fn new(points: Vec<Vec3>, knots: Option<Vec<f64>>, tension: f64) -> CineResult<Self> {
        if points.is_empty() {
            return Err(CineError::validation("spline needs at least one point"));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(CineError::validation("spline points must be finite"));
        }
        if !tension.is_finite() || tension < 0.0 {
            return Err(CineError::validation(format!(
                "spline tension must be finite and >= 0, got {tension}"
            )));
        }

        let knots = match knots {
            Some(k) => {
                if k.len() != points.len() {
                    return Err(CineError::validation(format!(
                        "spline has {} points but {} knots",
                        points.len(),
                        k.len()
                    )));
                }
                if k.iter().any(|v| !v.is_finite() || !(0.0..=1.0).contains(v)) {
                    return Err(CineError::validation("spline knots must lie in [0, 1]"));
                }
                if !k.windows(2).all(|w| w[0] < w[1]) {
                    return Err(CineError::validation(
                        "spline knots must be strictly increasing",
                    ));
                }
                k
            }
            None => uniform_knots(points.len()),
        };

        let tangents = tangents(&points, &knots, tension);
        Ok(Self {
            knots,
            points,
            tangents,
        })
    }

    /// Uniform Catmull-Rom spline with the classic tension.
    pub fn uniform(points: Vec<Vec3>) -> CineResult<Self> {
        Self::new(points, None, 0.5)
    }

    /// Number of control points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the spline has no control points (never the case for a built spline).
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Evaluate at progress `t` (clamped to `[0, 1]`). Outside the knot range the end points hold.
    pub fn sample(&self, t: f64) -> Vec3 {
        let n = self.points.len();
        if n == 1 {
            return self.points[0];
        }
        let t = clamp01(t);
        if t <= self.knots[0] {
            return self.points[0];
        }
        if t >= self.knots[n - 1] {
            return self.points[n - 1];
        }

        let i = self.knots.partition_point(|k| *k <= t).clamp(1, n - 1) - 1;
        let h = self.knots[i + 1] - self.knots[i];
        let s = (t - self.knots[i]) / h;

        let s2 = s * s;
        let s3 = s2 * s;
        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        self.points[i] * h00
            + self.tangents[i] * (h10 * h)
            + self.points[i + 1] * h01
            + self.tangents[i + 1] * (h11 * h)
    }
}

fn uniform_knots(n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![0.0];
    }
    let last = (n - 1) as f64;
    (0..n).map(|i| i as f64 / last).collect()
}

fn tangents(points: &[Vec3], knots: &[f64], tension: f64) -> Vec<Vec3> {
    let n = points.len();
    if n == 1 {
        return vec![Vec3::ZERO];
    }
    let k = 2.0 * tension;
    (0..n)
        .map(|i| {
            let (a, b) = match i {
                0 => (0, 1),
                _ if i == n - 1 => (n - 2, n - 1),
                _ => (i - 1, i + 1),
            };
            (points[b] - points[a]) / (knots[b] - knots[a]) * k
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/transform/spline.rs"]
mod tests;
