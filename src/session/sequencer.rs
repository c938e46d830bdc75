use crate::{
    camera::rig::{CameraRig, CameraState},
    composition::model::SequenceConfig,
    composition::phase::PhaseTable,
    eval::context::FrameCtx,
    eval::weights::PhaseWeights,
    fields::field::{FieldInput, InstanceField, UpdateStyle},
    foundation::core::{InstanceTransform, Rgb, rgb_linear},
    foundation::error::CineResult,
    lighting::atmosphere::{Atmosphere, FogState},
    lighting::rig::{LightRig, LightState},
};

/// Frame counters, including how often inputs needed correcting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SequencerStats {
    /// Frames ticked.
    pub frames: u64,
    /// Frames whose `dt` was non-finite, non-positive, or above `max_frame_dt`.
    pub dt_clamped: u64,
    /// Frames whose progress was NaN or outside `[0, 1]`.
    pub progress_clamped: u64,
}

/// One phase weight in a [`FrameSnapshot`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct WeightSnapshot {
    pub phase: String,
    pub weight: f64,
}

/// One instance field in a [`FrameSnapshot`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FieldSnapshot {
    pub name: String,
    pub phase: String,
    pub style: UpdateStyle,
    pub opacity: f64,
    #[serde(serialize_with = "rgb_linear::serialize")]
    pub tint: Rgb,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instances: Option<Vec<InstanceTransform>>,
}

/// Serializable copy of everything the renderer consumes for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub progress: f64,
    pub elapsed: f64,
    pub weights: Vec<WeightSnapshot>,
    /// Most visible phase; the earlier one wins a tie.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant: Option<String>,
    pub camera: CameraState,
    pub lights: Vec<LightState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fog: Option<FogState>,
    pub fields: Vec<FieldSnapshot>,
}

/// Per-frame driver: owns every component and ticks them in a fixed order.
///
/// Build once from a [`SequenceConfig`], then call [`Sequencer::tick`] from the render loop. The
/// tick is total: any `progress`/`dt` pair, however malformed, yields finite state.
#[derive(Clone, Debug)]
pub struct Sequencer {
    table: PhaseTable,
    max_frame_dt: f64,
    weights: PhaseWeights,
    camera: CameraRig,
    lights: LightRig,
    atmosphere: Option<Atmosphere>,
    fields: Vec<InstanceField>,

    progress: f64,
    elapsed: f64,
    stats: SequencerStats,
}

impl Sequencer {
    /// Validate `config` and build every component.
    #[tracing::instrument(skip(config))]
    pub fn new(config: &SequenceConfig) -> CineResult<Self> {
        config.validate()?;
        let table = PhaseTable::from_defs(&config.phases)?;
        let camera = CameraRig::new(&config.camera, &table, config.seed)?;
        let lights = LightRig::new(&config.lights, &table, config.seed)?;
        let atmosphere = config.atmosphere.as_ref().map(Atmosphere::new);
        let fields = config
            .fields
            .iter()
            .map(|def| InstanceField::new(def, &table, config.seed))
            .collect::<CineResult<Vec<_>>>()?;

        let instances: usize = fields.iter().map(InstanceField::len).sum();
        tracing::info!(
            phases = table.len(),
            lights = lights.states().len(),
            fields = fields.len(),
            instances,
            "sequencer ready"
        );

        let mut weights = PhaseWeights::new(&table);
        weights.update(&table, 0.0);
        Ok(Self {
            table,
            max_frame_dt: config.max_frame_dt,
            weights,
            camera,
            lights,
            atmosphere,
            fields,
            progress: 0.0,
            elapsed: 0.0,
            stats: SequencerStats::default(),
        })
    }

    /// Advance one frame with a raw scroll `progress` and the raw time since the last frame.
    pub fn tick(&mut self, progress: f64, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        let ctx = FrameCtx::new(progress, dt, self.elapsed, self.max_frame_dt);
        if ctx.dt != dt {
            self.stats.dt_clamped += 1;
            tracing::debug!(raw = dt, used = ctx.dt, "frame dt clamped");
        }
        if ctx.progress != progress {
            self.stats.progress_clamped += 1;
            tracing::debug!(raw = progress, used = ctx.progress, "progress clamped");
        }
        self.tick_ctx(ctx);
    }

    /// Advance one frame with a caller-built context.
    pub fn tick_ctx(&mut self, ctx: FrameCtx) {
        let _span = tracing::trace_span!("tick", frame = self.stats.frames).entered();
        let ctx = FrameCtx::new(ctx.progress, ctx.dt, ctx.elapsed, self.max_frame_dt);
        self.progress = ctx.progress;
        self.elapsed = ctx.elapsed;

        self.weights.update(&self.table, ctx.progress);
        let camera = self.camera.update(&ctx, &self.table).pose;
        self.lights.update(&ctx, &self.weights);
        if let Some(atmosphere) = self.atmosphere.as_mut() {
            atmosphere.update(&ctx);
        }
        for field in &mut self.fields {
            let phase = field.phase_index();
            let local_progress = self
                .table
                .get(phase)
                .map_or(0.0, |p| p.local_progress(ctx.progress));
            field.update(&FieldInput {
                ctx: &ctx,
                weight: self.weights.get(phase),
                local_progress,
                camera: &camera,
            });
        }
        self.stats.frames += 1;
    }

    pub fn table(&self) -> &PhaseTable {
        &self.table
    }

    pub fn weights(&self) -> &PhaseWeights {
        &self.weights
    }

    /// Current weight of the named phase; unknown names weigh nothing.
    pub fn weight_of(&self, phase: &str) -> f64 {
        self.table
            .index_of(phase)
            .map_or(0.0, |i| self.weights.get(i))
    }

    pub fn camera(&self) -> &CameraState {
        self.camera.state()
    }

    pub fn lights(&self) -> &[LightState] {
        self.lights.states()
    }

    pub fn fog(&self) -> Option<FogState> {
        self.atmosphere.as_ref().map(Atmosphere::state)
    }

    pub fn fields(&self) -> &[InstanceField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&InstanceField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn stats(&self) -> SequencerStats {
        self.stats
    }

    /// Accumulated wall-clock seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Clamped progress of the last tick.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Copy out the current frame. Instance transforms are included only when asked for.
    pub fn snapshot(&self, include_instances: bool) -> FrameSnapshot {
        FrameSnapshot {
            frame: self.stats.frames,
            progress: self.progress,
            elapsed: self.elapsed,
            weights: self
                .weights
                .named(&self.table)
                .map(|(phase, weight)| WeightSnapshot {
                    phase: phase.to_string(),
                    weight,
                })
                .collect(),
            dominant: self
                .weights
                .dominant()
                .and_then(|(i, _)| self.table.get(i))
                .map(|p| p.name().to_string()),
            camera: *self.camera(),
            lights: self.lights().to_vec(),
            fog: self.fog(),
            fields: self
                .fields
                .iter()
                .map(|f| FieldSnapshot {
                    name: f.name().to_string(),
                    phase: self
                        .table
                        .get(f.phase_index())
                        .map(|p| p.name().to_string())
                        .unwrap_or_default(),
                    style: f.style(),
                    opacity: f.opacity(),
                    tint: f.tint(),
                    count: f.len(),
                    instances: include_instances.then(|| f.transforms().to_vec()),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/sequencer.rs"]
mod tests;
