use crate::{
    composition::model::AtmosphereDef,
    eval::context::FrameCtx,
    foundation::core::{Rgb, rgb_linear},
    transform::non_linear::damp,
};

/// Fog output for one frame. `far >= near` always holds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FogState {
    #[serde(serialize_with = "rgb_linear::serialize")]
    pub color: Rgb,
    pub near: f64,
    pub far: f64,
}

/// Fog ramps sampled from progress and damped like the lights.
#[derive(Clone, Debug)]
pub struct Atmosphere {
    def: AtmosphereDef,
    live: FogState,
    primed: bool,
}

impl Atmosphere {
    pub fn new(def: &AtmosphereDef) -> Self {
        let mut atmosphere = Self {
            def: def.clone(),
            live: FogState {
                color: Rgb::BLACK,
                near: 0.0,
                far: 0.0,
            },
            primed: false,
        };
        atmosphere.live = atmosphere.target(0.0);
        atmosphere
    }

    fn target(&self, progress: f64) -> FogState {
        let color = self.def.fog_color.sample(progress).unwrap_or(self.live.color);
        let near = self.def.fog_near.sample(progress).unwrap_or(self.live.near);
        let far = self.def.fog_far.sample(progress).unwrap_or(self.live.far);
        FogState { color, near, far }
    }

    pub fn state(&self) -> FogState {
        FogState {
            far: self.live.far.max(self.live.near),
            ..self.live
        }
    }

    pub fn update(&mut self, ctx: &FrameCtx) -> FogState {
        let target = self.target(ctx.progress);
        if self.primed {
            let rate = self.def.rate;
            self.live = FogState {
                color: damp(&self.live.color, &target.color, rate, ctx.dt),
                near: damp(&self.live.near, &target.near, rate, ctx.dt),
                far: damp(&self.live.far, &target.far, rate, ctx.dt),
            };
        } else {
            self.live = target;
            self.primed = true;
        }
        self.state()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lighting/atmosphere.rs"]
mod tests;
