//! Phase window table: per-phase fade windows and sub-shot timelines.

use std::collections::BTreeMap;

use crate::{
    animation::anim::Lerp,
    animation::ease::Ease,
    composition::model::PhaseDef,
    foundation::core::Pose,
    foundation::error::{CineError, CineResult},
    transform::non_linear::{clamp01, linearstep, smootherstep},
};

/// Where fade windows sit relative to a phase's `[start, end]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FadeAnchor {
    /// Fade in over `[start, start + fade_in]`, out over `[end - fade_out, end]`.
    #[default]
    Inside,
    /// Fade windows are centered on the boundaries, so neighbours crossfade at the seam.
    Straddle,
}

/// Phase-local camera tour split into equal eased segments.
#[derive(Clone, Debug, PartialEq)]
pub struct SubShotTimeline {
    shots: Vec<Pose>,
    ease: Ease,
}

impl SubShotTimeline {
    pub fn new(shots: Vec<Pose>, ease: Ease) -> CineResult<Self> {
        if shots.is_empty() {
            return Err(CineError::validation("sub-shot timeline needs at least one shot"));
        }
        if shots.iter().any(|s| !s.is_finite()) {
            return Err(CineError::validation("sub-shot poses must be finite"));
        }
        Ok(Self { shots, ease })
    }

    pub fn shots(&self) -> &[Pose] {
        &self.shots
    }

    /// Pose at phase-local progress `local`.
    pub fn sample(&self, local: f64) -> Pose {
        let n = self.shots.len();
        if n == 1 {
            return self.shots[0];
        }
        let segments = (n - 1) as f64;
        let x = clamp01(local) * segments;
        let i = (x.floor() as usize).min(n - 2);
        let t = self.ease.apply(x - i as f64);
        <Pose as Lerp>::lerp(&self.shots[i], &self.shots[i + 1], t)
    }
}

/// Immutable runtime form of a [`PhaseDef`].
#[derive(Clone, Debug, PartialEq)]
pub struct Phase {
    name: String,
    start: f64,
    end: f64,
    fade_in: f64,
    fade_out: f64,
    anchor: FadeAnchor,
    sub_shots: Option<SubShotTimeline>,
}

impl Phase {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn sub_shots(&self) -> Option<&SubShotTimeline> {
        self.sub_shots.as_ref()
    }

    // A phase touching the timeline edge never fades there.
    fn fade_in_window(&self) -> Option<(f64, f64)> {
        if self.start <= 0.0 {
            return None;
        }
        Some(match self.anchor {
            FadeAnchor::Inside => (self.start, self.start + self.fade_in),
            FadeAnchor::Straddle => (self.start - self.fade_in, self.start + self.fade_in),
        })
    }

    fn fade_out_window(&self) -> Option<(f64, f64)> {
        if self.end >= 1.0 {
            return None;
        }
        Some(match self.anchor {
            FadeAnchor::Inside => (self.end - self.fade_out, self.end),
            FadeAnchor::Straddle => (self.end - self.fade_out, self.end + self.fade_out),
        })
    }

    /// Visibility in `[0, 1]` at `progress`; C² across every window edge.
    pub fn weight_at(&self, progress: f64) -> f64 {
        let p = clamp01(progress);
        let fade_in = self
            .fade_in_window()
            .map_or(1.0, |(a, b)| smootherstep(a, b, p));
        let fade_out = self
            .fade_out_window()
            .map_or(1.0, |(a, b)| 1.0 - smootherstep(a, b, p));
        clamp01(fade_in * fade_out)
    }

    /// `clamp01((progress - start) / (end - start))`.
    pub fn local_progress(&self, progress: f64) -> f64 {
        clamp01((clamp01(progress) - self.start) / (self.end - self.start))
    }

    /// Linear ramp over the fade windows used to hand the camera over to the sub-shot tour.
    pub fn override_blend(&self, progress: f64) -> f64 {
        let p = clamp01(progress);
        let up = self
            .fade_in_window()
            .map_or(1.0, |(a, b)| linearstep(a, b, p));
        let down = self
            .fade_out_window()
            .map_or(1.0, |(a, b)| 1.0 - linearstep(a, b, p));
        clamp01(up * down)
    }
}

/// Validated, ordered set of phases.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseTable {
    phases: Vec<Phase>,
    by_name: BTreeMap<String, usize>,
}

impl PhaseTable {
    /// Build the table, rejecting anything that could produce NaN at runtime.
    pub fn from_defs(defs: &[PhaseDef]) -> CineResult<Self> {
        if defs.is_empty() {
            return Err(CineError::validation("at least one phase is required"));
        }

        let mut phases = Vec::with_capacity(defs.len());
        let mut by_name = BTreeMap::new();
        for (idx, d) in defs.iter().enumerate() {
            if d.name.is_empty() {
                return Err(CineError::config(format!("phase {idx} has an empty name")));
            }
            if by_name.insert(d.name.clone(), idx).is_some() {
                return Err(CineError::config(format!("duplicate phase name '{}'", d.name)));
            }
            let nums = [d.start, d.end, d.fade_in, d.fade_out];
            if nums.iter().any(|v| !v.is_finite()) {
                return Err(CineError::validation(format!(
                    "phase '{}' has non-finite bounds",
                    d.name
                )));
            }
            if !(0.0 <= d.start && d.start < d.end && d.end <= 1.0) {
                return Err(CineError::validation(format!(
                    "phase '{}' must satisfy 0 <= start < end <= 1, got [{}, {}]",
                    d.name, d.start, d.end
                )));
            }
            if d.fade_in <= 0.0 || d.fade_out <= 0.0 {
                return Err(CineError::validation(format!(
                    "phase '{}' fade widths must be > 0, got in={} out={}",
                    d.name, d.fade_in, d.fade_out
                )));
            }
            if d.fade_in + d.fade_out > d.end - d.start {
                return Err(CineError::validation(format!(
                    "phase '{}' fades ({} + {}) exceed its span {}",
                    d.name,
                    d.fade_in,
                    d.fade_out,
                    d.end - d.start
                )));
            }
            // Progress never leaves [0, 1], so a straddled fade past either end never completes.
            if d.anchor == FadeAnchor::Straddle
                && ((d.start > 0.0 && d.start - d.fade_in < 0.0)
                    || (d.end < 1.0 && d.end + d.fade_out > 1.0))
            {
                return Err(CineError::validation(format!(
                    "phase '{}' straddled fades must stay within [0, 1]",
                    d.name
                )));
            }
            if phases.last().is_some_and(|p: &Phase| d.start < p.start) {
                return Err(CineError::validation(format!(
                    "phase '{}' starts before the previous phase",
                    d.name
                )));
            }
            let sub_shots = d
                .sub_shots
                .as_ref()
                .map(|s| SubShotTimeline::new(s.shots.clone(), s.ease))
                .transpose()?;

            phases.push(Phase {
                name: d.name.clone(),
                start: d.start,
                end: d.end,
                fade_in: d.fade_in,
                fade_out: d.fade_out,
                anchor: d.anchor,
                sub_shots,
            });
        }
        Ok(Self { phases, by_name })
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn get(&self, idx: usize) -> Option<&Phase> {
        self.phases.get(idx)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// `weightOf(phase, progress)` by name; unknown phases weigh nothing.
    pub fn weight_of(&self, name: &str, progress: f64) -> f64 {
        self.index_of(name)
            .map_or(0.0, |i| self.phases[i].weight_at(progress))
    }

    /// Write every phase weight into `out` (matched by index).
    pub fn weights_into(&self, progress: f64, out: &mut [f64]) {
        for (w, phase) in out.iter_mut().zip(&self.phases) {
            *w = phase.weight_at(progress);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/phase.rs"]
mod tests;
