use crate::{
    animation::anim::Keyframes,
    animation::proc::Rng64,
    composition::model::{Behavior, FieldDef},
    composition::phase::PhaseTable,
    eval::context::FrameCtx,
    fields::integrate::DriftField,
    fields::recompute::{AssembleField, FloatField, OrbsField, SwayField, TracerField},
    foundation::core::{InstanceTransform, Pose, Rgb},
    foundation::error::{CineError, CineResult},
    foundation::math::stable_hash64,
    transform::non_linear::damp,
};

/// Everything a field may read for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FieldInput<'a> {
    pub ctx: &'a FrameCtx,
    /// Weight of the field's own phase.
    pub weight: f64,
    /// Local progress inside the field's own phase.
    pub local_progress: f64,
    /// Live camera pose, already updated this frame.
    pub camera: &'a Pose,
}

/// How a field advances its instances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum UpdateStyle {
    /// Pure function of time, progress and weight.
    Recomputed,
    /// Carries velocity state between frames.
    Integrated,
}

/// Stateless per-frame rewrite of every transform.
pub trait Recompute {
    fn recompute(&self, input: &FieldInput<'_>, out: &mut [InstanceTransform]);
}

/// Stateful step of every instance.
pub trait Integrate {
    fn integrate(&mut self, input: &FieldInput<'_>, out: &mut [InstanceTransform]);
}

#[derive(Clone, Debug)]
enum Kernel {
    Float(FloatField),
    Assemble(AssembleField),
    Orbs(OrbsField),
    Sway(SwayField),
    Tracer(TracerField),
    Drift(DriftField),
}

impl Kernel {
    fn style(&self) -> UpdateStyle {
        match self {
            Self::Drift(_) => UpdateStyle::Integrated,
            _ => UpdateStyle::Recomputed,
        }
    }

    fn run(&mut self, input: &FieldInput<'_>, out: &mut [InstanceTransform]) {
        match self {
            Self::Float(k) => k.recompute(input, out),
            Self::Assemble(k) => k.recompute(input, out),
            Self::Orbs(k) => k.recompute(input, out),
            Self::Sway(k) => k.recompute(input, out),
            Self::Tracer(k) => k.recompute(input, out),
            Self::Drift(k) => k.integrate(input, out),
        }
    }
}

/// Fixed-capacity batch of instances bound to one phase.
#[derive(Clone, Debug)]
pub struct InstanceField {
    name: String,
    phase: usize,
    max_opacity: f64,
    opacity_rate: Option<f64>,
    tint_ramp: Option<Keyframes<Rgb>>,
    kernel: Kernel,

    transforms: Vec<InstanceTransform>,
    opacity: f64,
    tint: Rgb,
    primed: bool,
}

impl InstanceField {
    /// Allocate the instance buffer and seed every instance.
    pub fn new(def: &FieldDef, table: &PhaseTable, seed: u64) -> CineResult<Self> {
        let phase = table.index_of(&def.phase).ok_or_else(|| {
            CineError::config(format!(
                "field '{}' references unknown phase '{}'",
                def.name, def.phase
            ))
        })?;
        let count = def.resolved_count();
        let mut rng = Rng64::new(def.seed.unwrap_or_else(|| stable_hash64(seed, &def.name)));

        let kernel = match &def.behavior {
            Behavior::Float(d) => Kernel::Float(FloatField::new(d, count, &mut rng)),
            Behavior::Assemble(d) => Kernel::Assemble(AssembleField::new(d, count, &mut rng)),
            Behavior::Orbs(d) => Kernel::Orbs(OrbsField::new(d, count, &mut rng)),
            Behavior::Sway(d) => Kernel::Sway(SwayField::new(d, count, &mut rng)),
            Behavior::Tracer(d) => Kernel::Tracer(TracerField::new(d, count)?),
            Behavior::Drift(d) => Kernel::Drift(DriftField::new(d, count, &mut rng)),
        };

        Ok(Self {
            name: def.name.clone(),
            phase,
            max_opacity: def.opacity,
            opacity_rate: def.opacity_rate,
            tint_ramp: def.tint.clone(),
            kernel,
            transforms: vec![InstanceTransform::default(); count],
            opacity: 0.0,
            tint: Rgb::WHITE,
            primed: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index of the owning phase in the [`PhaseTable`].
    pub fn phase_index(&self) -> usize {
        self.phase
    }

    pub fn style(&self) -> UpdateStyle {
        self.kernel.style()
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn tint(&self) -> Rgb {
        self.tint
    }

    pub fn transforms(&self) -> &[InstanceTransform] {
        &self.transforms
    }

    /// Rewrite opacity, tint and every instance transform in place.
    pub fn update(&mut self, input: &FieldInput<'_>) {
        let target = input.weight * self.max_opacity;
        self.opacity = match self.opacity_rate {
            Some(rate) if self.primed => damp(&self.opacity, &target, rate, input.ctx.dt),
            _ => target,
        };
        if let Some(tint) = self
            .tint_ramp
            .as_ref()
            .and_then(|k| k.sample(input.ctx.progress))
        {
            self.tint = tint;
        }
        self.kernel.run(input, &mut self.transforms);
        self.primed = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fields/field.rs"]
mod tests;
