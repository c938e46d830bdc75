//! cinescroll is a scroll-driven cinematic sequencer.
//!
//! A single normalized scroll `progress` in `[0, 1]` plus the wall-clock frame delta drive a
//! camera rig, adaptive lights, fog and procedural instance fields. Each frame:
//!
//! - Load a [`SequenceConfig`] (JSON or [`SequenceConfig::cinematic`])
//! - Build a [`Sequencer`] once; configuration errors surface here and nowhere else
//! - Call [`Sequencer::tick`] per frame and read camera, light and instance state back out
#![forbid(unsafe_code)]

mod animation;
mod camera;
mod composition;
mod eval;
mod fields;
mod foundation;
mod lighting;
mod session;

/// Easing kernel, damping and spline primitives.
pub mod transform;

pub use crate::animation::anim::{Keyframe, Keyframes, Lerp};
pub use crate::animation::ease::Ease;
pub use crate::animation::proc::{Rng64, Wave, Wave3};
pub use crate::camera::rig::{CameraMode, CameraRig, CameraState};
pub use crate::composition::model::{
    AnchorDef, AssembleDef, AtmosphereDef, BandDef, Behavior, CameraDef, CameraKey, Contribution,
    DriftDef, EntryDef, FieldDef, FlickerDef, FloatDef, GlitchDef, IdleDriftDef, Layout,
    LightDef, LightKind, MAX_FIELD_INSTANCES, OrbsDef, PhaseDef, RollDef, SequenceConfig,
    SubShotDef, SwayDef, TracerDef,
};
pub use crate::composition::phase::{FadeAnchor, Phase, PhaseTable, SubShotTimeline};
pub use crate::eval::context::FrameCtx;
pub use crate::eval::weights::PhaseWeights;
pub use crate::fields::field::{FieldInput, InstanceField, UpdateStyle};
pub use crate::foundation::core::{Aabb, InstanceTransform, Pose, Rgb, Vec3};
pub use crate::foundation::error::{CineError, CineResult};
pub use crate::lighting::atmosphere::{Atmosphere, FogState};
pub use crate::lighting::rig::{LightRig, LightState};
pub use crate::session::sequencer::{
    FieldSnapshot, FrameSnapshot, Sequencer, SequencerStats, WeightSnapshot,
};
