//! Non-linear transform utilities: the easing kernel shared by every component.

use crate::animation::anim::Lerp;

/// Hard ceiling for a single frame step, in seconds.
///
/// Configuration may pick a smaller clamp; nothing ever integrates more than this in one tick.
pub const MAX_FRAME_DT: f64 = 0.25;

#[inline]
/// Clamp scalar value to normalized range `[0, 1]`. NaN maps to `0`.
pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

#[inline]
fn unit(edge0: f64, edge1: f64, x: f64) -> f64 {
    // Degenerate edges act as a step so callers never divide by zero.
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    clamp01((x - edge0) / (edge1 - edge0))
}

/// Cubic Hermite ramp `3t² - 2t³` of `x` normalized into `[edge0, edge1]`.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = unit(edge0, edge1, x);
    t * t * (3.0 - 2.0 * t)
}

/// Quintic ramp `6t⁵ - 15t⁴ + 10t³`; C²-continuous at both edges.
pub fn smootherstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = unit(edge0, edge1, x);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Linear ramp of `x` across `[edge0, edge1]`, clamped to `[0, 1]`.
pub fn linearstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    unit(edge0, edge1, x)
}

/// Sanitize a frame delta: non-finite or non-positive values become `0`, large values clamp to
/// `max` (itself capped at [`MAX_FRAME_DT`]).
pub fn sanitize_dt(dt: f64, max: f64) -> f64 {
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    let max = if max.is_finite() && max > 0.0 {
        max.min(MAX_FRAME_DT)
    } else {
        MAX_FRAME_DT
    };
    dt.min(max)
}

/// Frame-rate independent exponential smoothing coefficient `1 - exp(-rate * dt)`.
///
/// The result is always in `[0, 1)`: `dt` goes through [`sanitize_dt`] first and the value is kept
/// strictly below one, so a live value can never overshoot its target.
pub fn damping_factor(rate: f64, dt: f64) -> f64 {
    let rate = if rate.is_finite() { rate.max(0.0) } else { 0.0 };
    let dt = sanitize_dt(dt, MAX_FRAME_DT);
    (1.0 - (-rate * dt).exp()).clamp(0.0, 1.0 - f64::EPSILON)
}

/// Move `current` toward `target` by one damped step.
pub fn damp<T: Lerp>(current: &T, target: &T, rate: f64, dt: f64) -> T {
    T::lerp(current, target, damping_factor(rate, dt))
}

#[cfg(test)]
#[path = "../../tests/unit/transform/non_linear.rs"]
mod tests;
