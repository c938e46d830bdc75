use crate::{
    animation::anim::Lerp,
    composition::model::{CameraDef, EntryDef, IdleDriftDef, RollDef},
    composition::phase::PhaseTable,
    eval::context::FrameCtx,
    foundation::core::{Pose, Vec3},
    foundation::error::CineResult,
    transform::non_linear::{damp, smootherstep, smoothstep},
    transform::spline::CatmullRom,
};

/// Camera state machine mode. `Entry` is left once and never re-entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum CameraMode {
    Entry,
    ScrollDriven,
}

/// Camera output for one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CameraState {
    /// Live, damped pose handed to the renderer.
    pub pose: Pose,
    /// Pure target this frame, before damping.
    pub target: Pose,
    /// Roll around the view axis, radians.
    pub roll: f64,
    pub mode: CameraMode,
}

/// Camera trajectory evaluator.
#[derive(Clone, Debug)]
pub struct CameraRig {
    position_path: CatmullRom,
    look_path: CatmullRom,
    position_rate: f64,
    look_rate: f64,
    entry: Option<EntryDef>,
    drift: Option<IdleDriftDef>,
    roll: Option<RollDef>,
    tours: Vec<usize>,
    seed: u64,

    state: CameraState,
    velocity: f64,
    prev_progress: Option<f64>,
}

impl CameraRig {
    /// Build from a validated camera definition.
    pub fn new(def: &CameraDef, table: &PhaseTable, seed: u64) -> CineResult<Self> {
        let knots = def.knots();
        let position_path = CatmullRom::new(
            def.keys.iter().map(|k| k.position).collect(),
            knots.clone(),
            def.tension,
        )?;
        let look_path =
            CatmullRom::new(def.keys.iter().map(|k| k.look_at).collect(), knots, def.tension)?;

        let tours = table
            .phases()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.sub_shots().is_some())
            .map(|(i, _)| i)
            .collect();

        let (pose, mode) = match &def.entry {
            Some(entry) => (entry.from, CameraMode::Entry),
            None => (
                Pose::new(position_path.sample(0.0), look_path.sample(0.0)),
                CameraMode::ScrollDriven,
            ),
        };

        Ok(Self {
            position_path,
            look_path,
            position_rate: def.position_rate,
            look_rate: def.look_rate,
            entry: def.entry.clone(),
            drift: def.drift.clone(),
            roll: def.roll.clone(),
            tours,
            seed,
            state: CameraState {
                pose,
                target: pose,
                roll: 0.0,
                mode,
            },
            velocity: 0.0,
            prev_progress: None,
        })
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn mode(&self) -> CameraMode {
        self.state.mode
    }

    /// Damped scroll velocity estimate, progress per second.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Target pose from progress alone: the global spline blended into any sub-shot tour.
    pub fn scroll_target(&self, table: &PhaseTable, progress: f64) -> Pose {
        let mut target = Pose::new(
            self.position_path.sample(progress),
            self.look_path.sample(progress),
        );
        for &idx in &self.tours {
            let Some(phase) = table.get(idx) else {
                continue;
            };
            let Some(tour) = phase.sub_shots() else {
                continue;
            };
            let blend = phase.override_blend(progress);
            if blend > 0.0 {
                let shot = tour.sample(phase.local_progress(progress));
                target = <Pose as Lerp>::lerp(&target, &shot, blend);
            }
        }
        target
    }

    fn drift_offset(&self, ctx: &FrameCtx, entry_t: Option<f64>) -> (Vec3, Vec3) {
        let Some(drift) = &self.drift else {
            return (Vec3::ZERO, Vec3::ZERO);
        };
        let gain = match entry_t {
            Some(t) => smoothstep(drift.entry_fade_in, 1.0, t),
            None => {
                1.0 - smootherstep(drift.decay[0], drift.decay[1], ctx.progress)
                    * (1.0 - drift.residual)
            }
        };
        if gain <= 0.0 {
            return (Vec3::ZERO, Vec3::ZERO);
        }
        (
            drift.position.sample(ctx.elapsed, self.seed) * gain,
            drift.look.sample(ctx.elapsed, self.seed.rotate_left(17)) * gain,
        )
    }

    fn latch(&mut self, ctx: &FrameCtx) {
        let Some(entry) = &self.entry else {
            return;
        };
        if self.state.mode != CameraMode::Entry {
            return;
        }
        let reason = if ctx.elapsed >= entry.duration_secs {
            "elapsed"
        } else if ctx.progress > entry.scroll_threshold {
            "scrolled"
        } else {
            return;
        };
        tracing::debug!(
            reason,
            elapsed = ctx.elapsed,
            progress = ctx.progress,
            "camera entry finished"
        );
        self.state.mode = CameraMode::ScrollDriven;
    }

    /// Advance one frame.
    pub fn update(&mut self, ctx: &FrameCtx, table: &PhaseTable) -> &CameraState {
        self.latch(ctx);

        let (mut target, entry_t) = match (&self.entry, self.state.mode) {
            (Some(entry), CameraMode::Entry) => {
                let t = (ctx.elapsed / entry.duration_secs).clamp(0.0, 1.0);
                let eased = entry.ease.apply(t);
                (<Pose as Lerp>::lerp(&entry.from, &entry.to, eased), Some(t))
            }
            _ => (self.scroll_target(table, ctx.progress), None),
        };

        let (pos_offset, look_offset) = self.drift_offset(ctx, entry_t);
        target.position += pos_offset;
        target.look_at += look_offset;

        let pose = &mut self.state.pose;
        pose.position = damp(&pose.position, &target.position, self.position_rate, ctx.dt);
        pose.look_at = damp(&pose.look_at, &target.look_at, self.look_rate, ctx.dt);
        self.state.target = target;

        self.update_roll(ctx);
        &self.state
    }

    fn update_roll(&mut self, ctx: &FrameCtx) {
        let prev = self.prev_progress.replace(ctx.progress);
        let Some(roll) = &self.roll else {
            return;
        };
        if let Some(prev) = prev.filter(|_| ctx.dt > 0.0) {
            let raw = (ctx.progress - prev) / ctx.dt;
            self.velocity = damp(&self.velocity, &raw, roll.velocity_rate, ctx.dt);
        }
        let target = match self.state.mode {
            CameraMode::Entry => 0.0,
            CameraMode::ScrollDriven => {
                (self.velocity * roll.gain).clamp(-roll.max_rad, roll.max_rad)
            }
        };
        self.state.roll = damp(&self.state.roll, &target, roll.roll_rate, ctx.dt);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/rig.rs"]
mod tests;
