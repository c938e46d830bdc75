use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use crate::{
    animation::anim::Keyframes,
    animation::ease::Ease,
    animation::proc::{Wave, Wave3},
    composition::phase::{FadeAnchor, PhaseTable},
    foundation::core::{Aabb, Pose, Rgb, Vec3},
    foundation::error::{CineError, CineResult},
    transform::non_linear::MAX_FRAME_DT,
};

/// Upper bound on instances in one field.
pub const MAX_FIELD_INSTANCES: usize = 65_536;

/// Complete static description of a scroll-driven sequence.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SequenceConfig {
    /// Root seed for every seeded layout.
    #[serde(default)]
    pub seed: u64,
    /// Largest frame delta fed to damping, in seconds.
    #[serde(default = "default_max_frame_dt")]
    pub max_frame_dt: f64,
    pub phases: Vec<PhaseDef>,
    pub camera: CameraDef,
    #[serde(default)]
    pub lights: Vec<LightDef>,
    #[serde(default)]
    pub atmosphere: Option<AtmosphereDef>,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

fn default_max_frame_dt() -> f64 {
    0.1
}

fn default_tension() -> f64 {
    0.5
}

fn default_position_rate() -> f64 {
    2.5
}

fn default_look_rate() -> f64 {
    3.0
}

fn default_light_rate() -> f64 {
    4.0
}

fn default_one() -> f64 {
    1.0
}

fn default_vec3_one() -> Vec3 {
    Vec3::ONE
}

fn default_sub_shot_ease() -> Ease {
    Ease::Smoothstep
}

fn default_entry_ease() -> Ease {
    Ease::OutQuint
}

fn default_entry_threshold() -> f64 {
    0.02
}

fn default_drift_fade_in() -> f64 {
    0.8
}

fn default_window() -> [f64; 2] {
    [0.0, 1.0]
}

fn default_levels() -> usize {
    1
}

fn default_glitch_threshold() -> f64 {
    0.92
}

fn default_seam() -> f64 {
    0.1
}

/// One named world on the scroll timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhaseDef {
    pub name: String,
    pub start: f64,
    pub end: f64,
    pub fade_in: f64,
    pub fade_out: f64,
    #[serde(default)]
    pub anchor: FadeAnchor,
    #[serde(default)]
    pub sub_shots: Option<SubShotDef>,
}

/// Phase-local camera tour.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SubShotDef {
    pub shots: Vec<Pose>,
    #[serde(default = "default_sub_shot_ease")]
    pub ease: Ease,
}

/// Global camera path and its damping.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraDef {
    pub keys: Vec<CameraKey>,
    #[serde(default = "default_tension")]
    pub tension: f64,
    #[serde(default = "default_position_rate")]
    pub position_rate: f64,
    #[serde(default = "default_look_rate")]
    pub look_rate: f64,
    #[serde(default)]
    pub entry: Option<EntryDef>,
    #[serde(default)]
    pub drift: Option<IdleDriftDef>,
    #[serde(default)]
    pub roll: Option<RollDef>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraKey {
    pub position: Vec3,
    pub look_at: Vec3,
    /// Explicit progress knot; all keys or none must carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<f64>,
}

/// Wall-clock push-in played once on load.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EntryDef {
    pub from: Pose,
    pub to: Pose,
    pub duration_secs: f64,
    #[serde(default = "default_entry_threshold")]
    pub scroll_threshold: f64,
    #[serde(default = "default_entry_ease")]
    pub ease: Ease,
}

/// Idle breathing added to the camera target.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IdleDriftDef {
    #[serde(default)]
    pub position: Wave3,
    #[serde(default)]
    pub look: Wave3,
    /// Progress window over which the drift decays.
    pub decay: [f64; 2],
    /// Share of the drift left after `decay` ends.
    #[serde(default)]
    pub residual: f64,
    /// Fraction of the entry push-in after which drift fades in.
    #[serde(default = "default_drift_fade_in")]
    pub entry_fade_in: f64,
}

/// Roll driven by the damped scroll velocity.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RollDef {
    /// Radians of roll per unit of progress per second.
    pub gain: f64,
    pub max_rad: f64,
    pub velocity_rate: f64,
    pub roll_rate: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LightKind {
    Ambient,
    Point,
    Directional,
    Spot,
}

/// Light whose intensity and color follow phase weights.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LightDef {
    pub name: String,
    pub kind: LightKind,
    #[serde(default)]
    pub position: Option<Vec3>,
    pub color: Rgb,
    #[serde(default)]
    pub base: f64,
    #[serde(default)]
    pub contributions: Vec<Contribution>,
    #[serde(default = "default_light_rate")]
    pub rate: f64,
    #[serde(default)]
    pub flicker: Option<FlickerDef>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Contribution {
    pub phase: String,
    pub gain: f64,
    #[serde(default)]
    pub color: Option<Rgb>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlickerDef {
    pub waves: Vec<Wave>,
    /// Contributing weight below which the flicker is gated off.
    pub threshold: f64,
}

/// Fog ramps keyed by progress.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AtmosphereDef {
    pub fog_color: Keyframes<Rgb>,
    pub fog_near: Keyframes<f64>,
    pub fog_far: Keyframes<f64>,
    #[serde(default = "default_light_rate")]
    pub rate: f64,
}

/// A batch of instances owned by one phase.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub phase: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default = "default_one")]
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tint: Option<Keyframes<Rgb>>,
    pub behavior: Behavior,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum Behavior {
    Float(FloatDef),
    Assemble(AssembleDef),
    Orbs(OrbsDef),
    Sway(SwayDef),
    Tracer(TracerDef),
    Drift(DriftDef),
}

/// Dust hovering around seeded homes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FloatDef {
    pub bounds: Aabb,
    /// Sway amplitude per axis.
    pub amplitude: Vec3,
    /// Sway angular speed range, rad/s.
    pub speed: [f64; 2],
    pub size: [f64; 2],
    /// Upward speed; risen instances wrap inside `bounds`.
    #[serde(default)]
    pub rise: f64,
    /// Progress window over which the sway calms down.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calm: Option<[f64; 2]>,
}

/// Scattered pieces that lock into a layout.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AssembleDef {
    pub scatter: Aabb,
    pub layout: Layout,
    /// Phase-local progress window of the assembly.
    #[serde(default = "default_window")]
    pub window: [f64; 2],
    pub scatter_scale: [f64; 2],
    pub layout_scale: [f64; 2],
    #[serde(default = "default_vec3_one")]
    pub scatter_aspect: Vec3,
    #[serde(default = "default_vec3_one")]
    pub layout_aspect: Vec3,
    /// Tumble speed limit per axis, rad/s.
    #[serde(default)]
    pub tumble: Vec3,
    /// Wobble amplitude range.
    #[serde(default)]
    pub wobble: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glitch: Option<GlitchDef>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind")]
pub enum Layout {
    Grid {
        columns: usize,
        spacing: Vec3,
        origin: Vec3,
        #[serde(default)]
        jitter: f64,
    },
    Ring {
        per_ring: usize,
        radius: f64,
        #[serde(default)]
        ring_step: f64,
        center: Vec3,
        #[serde(default)]
        height_step: f64,
        #[serde(default = "default_levels")]
        levels: usize,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlitchDef {
    /// Peak displacement per axis.
    pub amount: Vec3,
    pub rate_hz: f64,
    #[serde(default = "default_glitch_threshold")]
    pub threshold: f64,
}

/// Bokeh orbs in parallax depth bands.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrbsDef {
    pub bands: Vec<BandDef>,
    /// Half extents of the orb spread on x and y.
    pub spread: [f64; 2],
    #[serde(default)]
    pub drift: f64,
    #[serde(default)]
    pub drift_hz: f64,
    /// Relative size pulse.
    #[serde(default)]
    pub pulse: f64,
    #[serde(default)]
    pub parallax_strength: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BandDef {
    pub z: [f64; 2],
    pub size: [f64; 2],
    pub parallax: f64,
}

/// Fixed silhouettes with a slight sway.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SwayDef {
    pub anchors: Vec<AnchorDef>,
    pub sway_rad: f64,
    pub freq_hz: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnchorDef {
    pub position: Vec3,
    #[serde(default = "default_vec3_one")]
    pub scale: Vec3,
    #[serde(default)]
    pub yaw: f64,
}

/// Dots looping along a path.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TracerDef {
    pub path: Vec<Vec3>,
    /// Loops per second.
    pub speed: f64,
    pub size: f64,
    /// Loop fraction over which dots fade at the seam.
    #[serde(default = "default_seam")]
    pub seam: f64,
}

/// Debris with integrated velocity.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DriftDef {
    pub bounds: Aabb,
    pub speed: [f64; 2],
    pub size: [f64; 2],
    /// Spin speed limit, rad/s.
    #[serde(default)]
    pub spin: f64,
}

impl SequenceConfig {
    /// Parse JSON from a reader.
    #[tracing::instrument(skip(reader))]
    pub fn from_reader(reader: impl Read) -> CineResult<Self> {
        serde_json::from_reader(reader).map_err(|e| CineError::serde(e.to_string()))
    }

    /// Parse JSON from a string.
    pub fn from_json_str(s: &str) -> CineResult<Self> {
        serde_json::from_str(s).map_err(|e| CineError::serde(e.to_string()))
    }

    /// Read and parse a JSON file.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> CineResult<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            CineError::Other(anyhow::Error::new(e).context(format!("open {}", path.display())))
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn to_json_pretty(&self) -> CineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CineError::serde(e.to_string()))
    }

    /// Run every fail-fast check without building runtime state.
    pub fn validate(&self) -> CineResult<()> {
        if !self.max_frame_dt.is_finite()
            || self.max_frame_dt <= 0.0
            || self.max_frame_dt > MAX_FRAME_DT
        {
            return Err(CineError::validation(format!(
                "max_frame_dt must be in (0, {MAX_FRAME_DT}], got {}",
                self.max_frame_dt
            )));
        }
        let table = PhaseTable::from_defs(&self.phases)?;
        self.camera.validate()?;

        unique_names("light", self.lights.iter().map(|l| l.name.as_str()))?;
        for light in &self.lights {
            light.validate(&table)?;
        }
        if let Some(atmosphere) = &self.atmosphere {
            atmosphere.validate()?;
        }
        unique_names("field", self.fields.iter().map(|f| f.name.as_str()))?;
        for field in &self.fields {
            field.validate(&table)?;
        }
        Ok(())
    }
}

fn unique_names<'a>(what: &str, names: impl Iterator<Item = &'a str>) -> CineResult<()> {
    let mut seen = BTreeSet::new();
    for name in names {
        if name.is_empty() {
            return Err(CineError::config(format!("{what} name must be non-empty")));
        }
        if !seen.insert(name) {
            return Err(CineError::config(format!("duplicate {what} name '{name}'")));
        }
    }
    Ok(())
}

pub(crate) fn check_rate(what: &str, rate: f64) -> CineResult<()> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(CineError::validation(format!(
            "{what} must be finite and > 0, got {rate}"
        )));
    }
    Ok(())
}

fn check_non_negative(what: &str, v: f64) -> CineResult<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(CineError::validation(format!(
            "{what} must be finite and >= 0, got {v}"
        )));
    }
    Ok(())
}

fn check_range(what: &str, r: [f64; 2]) -> CineResult<()> {
    if !r[0].is_finite() || !r[1].is_finite() || r[0] > r[1] {
        return Err(CineError::validation(format!(
            "{what} range [{}, {}] must be finite and ordered",
            r[0], r[1]
        )));
    }
    Ok(())
}

// Progress windows feed smooth ramps; a zero-width one would be a hard step.
fn check_unit_window(what: &str, r: [f64; 2]) -> CineResult<()> {
    check_range(what, r)?;
    if r[0] >= r[1] {
        return Err(CineError::validation(format!(
            "{what} window [{}, {}] must have start < end",
            r[0], r[1]
        )));
    }
    if r[0] < 0.0 || r[1] > 1.0 {
        return Err(CineError::validation(format!(
            "{what} window [{}, {}] must lie in [0, 1]",
            r[0], r[1]
        )));
    }
    Ok(())
}

fn check_vec3(what: &str, v: Vec3) -> CineResult<()> {
    if !v.is_finite() {
        return Err(CineError::validation(format!("{what} must be finite")));
    }
    Ok(())
}

fn resolve_phase(table: &PhaseTable, owner: &str, phase: &str) -> CineResult<()> {
    if table.index_of(phase).is_none() {
        return Err(CineError::config(format!(
            "{owner} references unknown phase '{phase}'"
        )));
    }
    Ok(())
}

impl CameraDef {
    pub fn validate(&self) -> CineResult<()> {
        if self.keys.is_empty() {
            return Err(CineError::validation("camera needs at least one key"));
        }
        for (i, k) in self.keys.iter().enumerate() {
            if !Pose::new(k.position, k.look_at).is_finite() {
                return Err(CineError::validation(format!("camera key {i} must be finite")));
            }
        }
        let with_knots = self.keys.iter().filter(|k| k.at.is_some()).count();
        if with_knots != 0 && with_knots != self.keys.len() {
            return Err(CineError::validation(
                "camera keys must all carry `at` or none of them",
            ));
        }
        // Spline construction checks knot ordering and tension.
        crate::transform::spline::CatmullRom::new(
            self.keys.iter().map(|k| k.position).collect(),
            self.knots(),
            self.tension,
        )?;
        check_rate("camera position_rate", self.position_rate)?;
        check_rate("camera look_rate", self.look_rate)?;

        if let Some(entry) = &self.entry {
            if !entry.from.is_finite() || !entry.to.is_finite() {
                return Err(CineError::validation("camera entry poses must be finite"));
            }
            check_rate("camera entry duration_secs", entry.duration_secs)?;
            if !entry.scroll_threshold.is_finite()
                || !(0.0..1.0).contains(&entry.scroll_threshold)
            {
                return Err(CineError::validation(
                    "camera entry scroll_threshold must lie in [0, 1)",
                ));
            }
        }
        if let Some(drift) = &self.drift {
            drift.position.validate("camera drift")?;
            drift.look.validate("camera drift")?;
            check_unit_window("camera drift decay", drift.decay)?;
            if !(0.0..=1.0).contains(&drift.residual) {
                return Err(CineError::validation(
                    "camera drift residual must lie in [0, 1]",
                ));
            }
            if !(0.0..1.0).contains(&drift.entry_fade_in) {
                return Err(CineError::validation(
                    "camera drift entry_fade_in must lie in [0, 1)",
                ));
            }
        }
        if let Some(roll) = &self.roll {
            check_non_negative("camera roll gain", roll.gain)?;
            check_non_negative("camera roll max_rad", roll.max_rad)?;
            check_rate("camera roll velocity_rate", roll.velocity_rate)?;
            check_rate("camera roll roll_rate", roll.roll_rate)?;
        }
        Ok(())
    }

    pub(crate) fn knots(&self) -> Option<Vec<f64>> {
        self.keys.iter().map(|k| k.at).collect()
    }
}

impl LightDef {
    pub fn validate(&self, table: &PhaseTable) -> CineResult<()> {
        let owner = format!("light '{}'", self.name);
        if let Some(p) = self.position {
            check_vec3(&format!("{owner} position"), p)?;
        }
        if !self.color.is_finite() {
            return Err(CineError::validation(format!("{owner} color must be finite")));
        }
        check_non_negative(&format!("{owner} base"), self.base)?;
        check_rate(&format!("{owner} rate"), self.rate)?;
        for c in &self.contributions {
            resolve_phase(table, &owner, &c.phase)?;
            if !c.gain.is_finite() {
                return Err(CineError::validation(format!(
                    "{owner} gain for '{}' must be finite",
                    c.phase
                )));
            }
        }
        if let Some(flicker) = &self.flicker {
            for w in &flicker.waves {
                w.validate(&owner)?;
            }
            if !(0.0..1.0).contains(&flicker.threshold) {
                return Err(CineError::validation(format!(
                    "{owner} flicker threshold must lie in [0, 1)"
                )));
            }
        }
        Ok(())
    }
}

impl AtmosphereDef {
    pub fn validate(&self) -> CineResult<()> {
        self.fog_color.validate("fog_color", |c| c.is_finite())?;
        self.fog_near
            .validate("fog_near", |v| v.is_finite() && *v >= 0.0)?;
        self.fog_far.validate("fog_far", |v| v.is_finite() && *v >= 0.0)?;
        check_rate("atmosphere rate", self.rate)
    }
}

impl FieldDef {
    /// Instance count after applying behavior defaults.
    pub fn resolved_count(&self) -> usize {
        match (&self.count, &self.behavior) {
            (Some(n), _) => *n,
            (None, Behavior::Sway(s)) => s.anchors.len(),
            (None, Behavior::Tracer(_)) => 1,
            (None, _) => 0,
        }
    }

    pub fn validate(&self, table: &PhaseTable) -> CineResult<()> {
        let owner = format!("field '{}'", self.name);
        resolve_phase(table, &owner, &self.phase)?;

        let count = self.resolved_count();
        if count == 0 {
            return Err(CineError::validation(format!("{owner} count must be >= 1")));
        }
        if count > MAX_FIELD_INSTANCES {
            return Err(CineError::validation(format!(
                "{owner} count {count} exceeds {MAX_FIELD_INSTANCES}"
            )));
        }
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(CineError::validation(format!(
                "{owner} opacity must lie in [0, 1]"
            )));
        }
        if let Some(rate) = self.opacity_rate {
            check_rate(&format!("{owner} opacity_rate"), rate)?;
        }
        if let Some(tint) = &self.tint {
            tint.validate(&format!("{owner} tint"), |c| c.is_finite())?;
        }
        self.behavior.validate(&owner, count)
    }
}

impl Behavior {
    fn validate(&self, owner: &str, count: usize) -> CineResult<()> {
        match self {
            Self::Float(f) => {
                f.bounds.validate(owner)?;
                check_vec3(&format!("{owner} amplitude"), f.amplitude)?;
                check_range(&format!("{owner} speed"), f.speed)?;
                check_range(&format!("{owner} size"), f.size)?;
                if !f.rise.is_finite() {
                    return Err(CineError::validation(format!("{owner} rise must be finite")));
                }
                if let Some(calm) = f.calm {
                    check_unit_window(&format!("{owner} calm"), calm)?;
                }
                Ok(())
            }
            Self::Assemble(a) => {
                a.scatter.validate(owner)?;
                check_unit_window(&format!("{owner} window"), a.window)?;
                check_range(&format!("{owner} scatter_scale"), a.scatter_scale)?;
                check_range(&format!("{owner} layout_scale"), a.layout_scale)?;
                check_vec3(&format!("{owner} scatter_aspect"), a.scatter_aspect)?;
                check_vec3(&format!("{owner} layout_aspect"), a.layout_aspect)?;
                check_vec3(&format!("{owner} tumble"), a.tumble)?;
                check_range(&format!("{owner} wobble"), a.wobble)?;
                match &a.layout {
                    Layout::Grid {
                        columns,
                        spacing,
                        origin,
                        jitter,
                    } => {
                        if *columns == 0 {
                            return Err(CineError::validation(format!(
                                "{owner} grid columns must be >= 1"
                            )));
                        }
                        check_vec3(&format!("{owner} grid spacing"), *spacing)?;
                        check_vec3(&format!("{owner} grid origin"), *origin)?;
                        check_non_negative(&format!("{owner} grid jitter"), *jitter)?;
                    }
                    Layout::Ring {
                        per_ring,
                        radius,
                        ring_step,
                        center,
                        height_step,
                        levels,
                    } => {
                        if *per_ring == 0 || *levels == 0 {
                            return Err(CineError::validation(format!(
                                "{owner} ring per_ring and levels must be >= 1"
                            )));
                        }
                        check_non_negative(&format!("{owner} ring radius"), *radius)?;
                        check_non_negative(&format!("{owner} ring ring_step"), *ring_step)?;
                        check_vec3(&format!("{owner} ring center"), *center)?;
                        if !height_step.is_finite() {
                            return Err(CineError::validation(format!(
                                "{owner} ring height_step must be finite"
                            )));
                        }
                    }
                }
                if let Some(g) = &a.glitch {
                    check_vec3(&format!("{owner} glitch amount"), g.amount)?;
                    check_non_negative(&format!("{owner} glitch rate_hz"), g.rate_hz)?;
                    if !(0.0..1.0).contains(&g.threshold) {
                        return Err(CineError::validation(format!(
                            "{owner} glitch threshold must lie in [0, 1)"
                        )));
                    }
                }
                Ok(())
            }
            Self::Orbs(o) => {
                if o.bands.is_empty() {
                    return Err(CineError::validation(format!(
                        "{owner} needs at least one band"
                    )));
                }
                for b in &o.bands {
                    check_range(&format!("{owner} band z"), b.z)?;
                    check_range(&format!("{owner} band size"), b.size)?;
                    check_non_negative(&format!("{owner} band parallax"), b.parallax)?;
                }
                check_non_negative(&format!("{owner} spread x"), o.spread[0])?;
                check_non_negative(&format!("{owner} spread y"), o.spread[1])?;
                check_non_negative(&format!("{owner} drift"), o.drift)?;
                check_non_negative(&format!("{owner} drift_hz"), o.drift_hz)?;
                check_non_negative(&format!("{owner} pulse"), o.pulse)?;
                check_non_negative(&format!("{owner} parallax_strength"), o.parallax_strength)
            }
            Self::Sway(s) => {
                if s.anchors.is_empty() {
                    return Err(CineError::validation(format!(
                        "{owner} needs at least one anchor"
                    )));
                }
                if count > s.anchors.len() {
                    return Err(CineError::validation(format!(
                        "{owner} count {count} exceeds its {} anchors",
                        s.anchors.len()
                    )));
                }
                for a in &s.anchors {
                    check_vec3(&format!("{owner} anchor position"), a.position)?;
                    check_vec3(&format!("{owner} anchor scale"), a.scale)?;
                    if !a.yaw.is_finite() {
                        return Err(CineError::validation(format!(
                            "{owner} anchor yaw must be finite"
                        )));
                    }
                }
                check_non_negative(&format!("{owner} sway_rad"), s.sway_rad)?;
                check_non_negative(&format!("{owner} freq_hz"), s.freq_hz)
            }
            Self::Tracer(t) => {
                if t.path.len() < 2 {
                    return Err(CineError::validation(format!(
                        "{owner} path needs at least two points"
                    )));
                }
                for p in &t.path {
                    check_vec3(&format!("{owner} path point"), *p)?;
                }
                if !t.speed.is_finite() {
                    return Err(CineError::validation(format!("{owner} speed must be finite")));
                }
                check_non_negative(&format!("{owner} size"), t.size)?;
                if !t.seam.is_finite() || !(0.0..=0.5).contains(&t.seam) {
                    return Err(CineError::validation(format!(
                        "{owner} seam must lie in [0, 0.5]"
                    )));
                }
                Ok(())
            }
            Self::Drift(d) => {
                d.bounds.validate(owner)?;
                check_range(&format!("{owner} speed"), d.speed)?;
                check_range(&format!("{owner} size"), d.size)?;
                check_non_negative(&format!("{owner} spin"), d.spin)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
