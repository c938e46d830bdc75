use crate::{
    animation::anim::Lerp,
    animation::proc::{Wave, sum_waves},
    composition::model::{LightDef, LightKind},
    composition::phase::PhaseTable,
    eval::context::FrameCtx,
    eval::weights::PhaseWeights,
    foundation::core::{Rgb, Vec3, rgb_linear},
    foundation::error::{CineError, CineResult},
    foundation::math::stable_hash64,
    transform::non_linear::{clamp01, damp, smoothstep},
};

/// Live output of one light.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LightState {
    pub name: String,
    pub kind: LightKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec3>,
    pub intensity: f64,
    #[serde(serialize_with = "rgb_linear::serialize")]
    pub color: Rgb,
}

#[derive(Clone, Debug)]
struct Term {
    phase: usize,
    gain: f64,
    color: Option<Rgb>,
}

#[derive(Clone, Debug)]
struct Light {
    color: Rgb,
    base: f64,
    terms: Vec<Term>,
    rate: f64,
    flicker: Option<(Vec<Wave>, f64)>,
    seed: u64,
}

impl Light {
    fn target(&self, weights: &PhaseWeights, elapsed: f64) -> (f64, Rgb) {
        let mut intensity = self.base;
        let mut peak = 0.0_f64;
        let mut colored = 0.0;
        let mut mix = Rgb::BLACK;
        for term in &self.terms {
            let w = weights.get(term.phase);
            intensity += term.gain * w;
            peak = peak.max(w);
            if let Some(c) = term.color {
                let act = (term.gain * w).max(0.0);
                colored += act;
                mix = Rgb::new(mix.r + c.r * act, mix.g + c.g * act, mix.b + c.b * act);
            }
        }

        if let Some((waves, threshold)) = &self.flicker {
            let gate = smoothstep(*threshold, 1.0, peak);
            if gate > 0.0 {
                intensity *= 1.0 + gate * sum_waves(waves, elapsed, self.seed);
            }
        }

        let color = if colored > 0.0 {
            let mean = mix.scale(1.0 / colored);
            <Rgb as Lerp>::lerp(&self.color, &mean, clamp01(colored))
        } else {
            self.color
        };
        (intensity.max(0.0), color)
    }
}

/// Adaptive lighting controller.
#[derive(Clone, Debug)]
pub struct LightRig {
    lights: Vec<Light>,
    states: Vec<LightState>,
    primed: bool,
}

impl LightRig {
    pub fn new(defs: &[LightDef], table: &PhaseTable, seed: u64) -> CineResult<Self> {
        let mut lights = Vec::with_capacity(defs.len());
        let mut states = Vec::with_capacity(defs.len());
        for def in defs {
            let terms = def
                .contributions
                .iter()
                .map(|c| {
                    let phase = table.index_of(&c.phase).ok_or_else(|| {
                        CineError::config(format!(
                            "light '{}' references unknown phase '{}'",
                            def.name, c.phase
                        ))
                    })?;
                    Ok(Term {
                        phase,
                        gain: c.gain,
                        color: c.color,
                    })
                })
                .collect::<CineResult<Vec<_>>>()?;

            lights.push(Light {
                color: def.color,
                base: def.base,
                terms,
                rate: def.rate,
                flicker: def.flicker.as_ref().map(|f| (f.waves.clone(), f.threshold)),
                seed: stable_hash64(seed, &def.name),
            });
            states.push(LightState {
                name: def.name.clone(),
                kind: def.kind,
                position: def.position,
                intensity: def.base,
                color: def.color,
            });
        }
        Ok(Self {
            lights,
            states,
            primed: false,
        })
    }

    pub fn states(&self) -> &[LightState] {
        &self.states
    }

    pub fn get(&self, name: &str) -> Option<&LightState> {
        self.states.iter().find(|s| s.name == name)
    }

    /// Damp every light toward its weight-driven target. The first call snaps.
    pub fn update(&mut self, ctx: &FrameCtx, weights: &PhaseWeights) {
        for (light, state) in self.lights.iter().zip(&mut self.states) {
            let (intensity, color) = light.target(weights, ctx.elapsed);
            if self.primed {
                state.intensity = damp(&state.intensity, &intensity, light.rate, ctx.dt).max(0.0);
                state.color = damp(&state.color, &color, light.rate, ctx.dt);
            } else {
                state.intensity = intensity;
                state.color = color;
            }
        }
        self.primed = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lighting/rig.rs"]
mod tests;
