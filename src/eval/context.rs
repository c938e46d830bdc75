use crate::transform::non_linear::{clamp01, sanitize_dt};

/// Everything a component may read about the current frame.
///
/// Components never consult a clock of their own; the sequencer builds one of these per tick.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FrameCtx {
    /// Scroll progress, clamped to `[0, 1]`.
    pub progress: f64,
    /// Sanitized frame delta in seconds, safe for damping.
    pub dt: f64,
    /// Wall-clock seconds since the sequence started.
    pub elapsed: f64,
}

impl FrameCtx {
    /// Build a sanitized context. NaN progress becomes `0`, `dt` is clamped to `max_dt`, and a
    /// non-finite or negative `elapsed` becomes `0`.
    pub fn new(progress: f64, dt: f64, elapsed: f64, max_dt: f64) -> Self {
        Self {
            progress: clamp01(progress),
            dt: sanitize_dt(dt, max_dt),
            elapsed: if elapsed.is_finite() {
                elapsed.max(0.0)
            } else {
                0.0
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/context.rs"]
mod tests;
