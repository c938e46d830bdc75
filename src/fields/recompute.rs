//! Fields whose transforms are a pure function of time, progress and weight.

use std::f64::consts::TAU;

use crate::{
    animation::anim::Lerp,
    animation::proc::Rng64,
    composition::model::{
        AnchorDef, AssembleDef, FloatDef, GlitchDef, OrbsDef, SwayDef, TracerDef,
    },
    fields::field::{FieldInput, Recompute},
    fields::layout::place,
    foundation::core::{Aabb, InstanceTransform, Vec3},
    foundation::error::CineResult,
    transform::non_linear::{smootherstep, smoothstep},
    transform::spline::CatmullRom,
};

fn signed_speed(rng: &mut Rng64, range: [f64; 2]) -> f64 {
    let s = rng.range(range[0], range[1]);
    if rng.next_u64() & 1 == 0 { s } else { -s }
}

#[derive(Clone, Debug)]
struct Mote {
    home: Vec3,
    speed: Vec3,
    phase: f64,
    size: f64,
}

/// Dust: seeded homes with per-axis sway and an optional rise.
#[derive(Clone, Debug)]
pub struct FloatField {
    motes: Vec<Mote>,
    bounds: Aabb,
    amplitude: Vec3,
    rise: f64,
    calm: Option<[f64; 2]>,
}

impl FloatField {
    pub fn new(def: &FloatDef, count: usize, rng: &mut Rng64) -> Self {
        let motes = (0..count)
            .map(|_| Mote {
                home: rng.in_box(&def.bounds),
                speed: Vec3::new(
                    signed_speed(rng, def.speed),
                    signed_speed(rng, def.speed),
                    signed_speed(rng, def.speed),
                ),
                phase: rng.range(0.0, TAU),
                size: rng.range(def.size[0], def.size[1]),
            })
            .collect();
        Self {
            motes,
            bounds: def.bounds,
            amplitude: def.amplitude,
            rise: def.rise,
            calm: def.calm,
        }
    }
}

impl Recompute for FloatField {
    fn recompute(&self, input: &FieldInput<'_>, out: &mut [InstanceTransform]) {
        let t = input.ctx.elapsed;
        let calm = self
            .calm
            .map_or(1.0, |[a, b]| 1.0 - smootherstep(a, b, input.ctx.progress));
        let amp = self.amplitude * calm;
        let lo = self.bounds.min.y;
        let height = self.bounds.size().y;

        for (m, o) in self.motes.iter().zip(out.iter_mut()) {
            let mut base = m.home;
            if self.rise != 0.0 && height > 0.0 {
                base.y = lo + (m.home.y - lo + self.rise * t).rem_euclid(height);
            }
            let sway = Vec3::new(
                (t * m.speed.x + m.phase).sin(),
                (t * m.speed.y + m.phase).cos(),
                (t * m.speed.z + m.phase * 1.3).sin(),
            );
            o.position = base + sway * amp;
            o.rotation = Vec3::ZERO;
            o.scale = Vec3::splat(m.size);
        }
    }
}

#[derive(Clone, Debug)]
struct Piece {
    scatter: Vec3,
    home: Vec3,
    home_rotation: Vec3,
    scatter_scale: f64,
    layout_scale: f64,
    tumble: Vec3,
    wobble_phase: f64,
    wobble_amp: f64,
    glitch_dir: Vec3,
    glitch_phase: f64,
}

/// Shards and converging particles: scattered layout locking into an ordered one.
#[derive(Clone, Debug)]
pub struct AssembleField {
    pieces: Vec<Piece>,
    window: [f64; 2],
    scatter_aspect: Vec3,
    layout_aspect: Vec3,
    glitch: Option<GlitchDef>,
}

impl AssembleField {
    pub fn new(def: &AssembleDef, count: usize, rng: &mut Rng64) -> Self {
        let pieces = (0..count)
            .map(|i| {
                let (home, home_rotation) = place(&def.layout, i, count, rng);
                Piece {
                    scatter: rng.in_box(&def.scatter),
                    home,
                    home_rotation,
                    scatter_scale: rng.range(def.scatter_scale[0], def.scatter_scale[1]),
                    layout_scale: rng.range(def.layout_scale[0], def.layout_scale[1]),
                    tumble: Vec3::new(rng.signed(), rng.signed(), rng.signed()) * def.tumble,
                    wobble_phase: rng.range(0.0, TAU),
                    wobble_amp: rng.range(def.wobble[0], def.wobble[1]),
                    glitch_dir: Vec3::new(rng.signed(), rng.signed(), rng.signed()),
                    glitch_phase: i as f64 * 3.7,
                }
            })
            .collect();
        Self {
            pieces,
            window: def.window,
            scatter_aspect: def.scatter_aspect,
            layout_aspect: def.layout_aspect,
            glitch: def.glitch.clone(),
        }
    }

    /// Assembly amount for phase-local progress `local`.
    pub fn assembly(&self, local: f64) -> f64 {
        smootherstep(self.window[0], self.window[1], local)
    }
}

impl Recompute for AssembleField {
    fn recompute(&self, input: &FieldInput<'_>, out: &mut [InstanceTransform]) {
        let t = input.ctx.elapsed;
        let a = self.assembly(input.local_progress);
        let loose = 1.0 - a;
        let aspect = <Vec3 as Lerp>::lerp(&self.scatter_aspect, &self.layout_aspect, a);
        let glitch_gain = input.weight * loose;

        for (p, o) in self.pieces.iter().zip(out.iter_mut()) {
            let mut position = <Vec3 as Lerp>::lerp(&p.scatter, &p.home, a);
            position += Vec3::new(
                (t * 0.5 + p.wobble_phase).sin() * p.wobble_amp,
                (t * 0.4 + p.wobble_phase * 1.3).cos() * p.wobble_amp * 0.6,
                0.0,
            ) * loose;

            if let Some(g) = self.glitch.as_ref().filter(|_| glitch_gain > 0.0) {
                let wave = (TAU * g.rate_hz * t + p.glitch_phase).sin();
                let pulse = smoothstep(g.threshold, 1.0, wave);
                position += g.amount * p.glitch_dir * (pulse * glitch_gain);
            }

            o.position = position;
            o.rotation = <Vec3 as Lerp>::lerp(&(p.tumble * t), &p.home_rotation, a);
            let s = (p.scatter_scale + (p.layout_scale - p.scatter_scale) * a) * input.weight;
            o.scale = aspect * s;
        }
    }
}

#[derive(Clone, Debug)]
struct Orb {
    base: Vec3,
    size: f64,
    parallax: f64,
    phase: f64,
    pulse_phase: f64,
}

/// Bokeh orbs in depth bands; nearer bands drift and parallax more.
#[derive(Clone, Debug)]
pub struct OrbsField {
    orbs: Vec<Orb>,
    drift: f64,
    drift_hz: f64,
    pulse: f64,
    parallax_strength: f64,
}

impl OrbsField {
    pub fn new(def: &OrbsDef, count: usize, rng: &mut Rng64) -> Self {
        let orbs = (0..count)
            .map(|i| {
                let band = &def.bands[i % def.bands.len()];
                Orb {
                    base: Vec3::new(
                        rng.signed() * def.spread[0],
                        rng.signed() * def.spread[1],
                        rng.range(band.z[0], band.z[1]),
                    ),
                    size: rng.range(band.size[0], band.size[1]),
                    parallax: band.parallax,
                    phase: rng.range(0.0, TAU),
                    pulse_phase: rng.range(0.0, TAU),
                }
            })
            .collect();
        Self {
            orbs,
            drift: def.drift,
            drift_hz: def.drift_hz,
            pulse: def.pulse,
            parallax_strength: def.parallax_strength,
        }
    }
}

impl Recompute for OrbsField {
    fn recompute(&self, input: &FieldInput<'_>, out: &mut [InstanceTransform]) {
        let t = input.ctx.elapsed;
        let w = TAU * self.drift_hz;
        let eye = input.camera.position;
        let eye_xy = Vec3::new(eye.x, eye.y, 0.0);

        for (orb, o) in self.orbs.iter().zip(out.iter_mut()) {
            let drift = Vec3::new(
                (t * w + orb.phase).sin(),
                (t * w * 0.8 + orb.phase * 1.7).cos(),
                0.0,
            ) * (self.drift * orb.parallax);
            let parallax = -eye_xy * (orb.parallax * self.parallax_strength);
            o.position = orb.base + drift + parallax;
            o.rotation = Vec3::ZERO;
            let pulse = 1.0 + self.pulse * (t * w * 2.0 + orb.pulse_phase).sin();
            o.scale = Vec3::splat(orb.size * pulse.max(0.0));
        }
    }
}

/// Silhouettes standing at fixed anchors.
#[derive(Clone, Debug)]
pub struct SwayField {
    anchors: Vec<(AnchorDef, f64)>,
    sway_rad: f64,
    freq_hz: f64,
}

impl SwayField {
    pub fn new(def: &SwayDef, count: usize, rng: &mut Rng64) -> Self {
        let anchors = def
            .anchors
            .iter()
            .take(count)
            .map(|a| (a.clone(), rng.range(0.0, TAU)))
            .collect();
        Self {
            anchors,
            sway_rad: def.sway_rad,
            freq_hz: def.freq_hz,
        }
    }
}

impl Recompute for SwayField {
    fn recompute(&self, input: &FieldInput<'_>, out: &mut [InstanceTransform]) {
        let t = input.ctx.elapsed;
        for ((anchor, phase), o) in self.anchors.iter().zip(out.iter_mut()) {
            let s = (TAU * self.freq_hz * t + phase).sin() * self.sway_rad * input.weight;
            o.position = anchor.position;
            o.rotation = Vec3::new(s * 0.3, anchor.yaw, s);
            o.scale = anchor.scale;
        }
    }
}

/// Dots looping along a path; the loop seam is hidden by a scale fade.
#[derive(Clone, Debug)]
pub struct TracerField {
    path: CatmullRom,
    speed: f64,
    size: f64,
    seam: f64,
    count: usize,
}

impl TracerField {
    pub fn new(def: &TracerDef, count: usize) -> CineResult<Self> {
        Ok(Self {
            path: CatmullRom::uniform(def.path.clone())?,
            speed: def.speed,
            size: def.size,
            seam: def.seam,
            count,
        })
    }

    /// Loop position of dot `i` at `secs`, in `[0, 1)`.
    pub fn loop_position(&self, i: usize, secs: f64) -> f64 {
        (secs * self.speed + i as f64 / self.count.max(1) as f64).rem_euclid(1.0)
    }

    fn seam_fade(&self, u: f64) -> f64 {
        if self.seam <= 0.0 {
            return 1.0;
        }
        smoothstep(0.0, self.seam, u) * (1.0 - smoothstep(1.0 - self.seam, 1.0, u))
    }
}

impl Recompute for TracerField {
    fn recompute(&self, input: &FieldInput<'_>, out: &mut [InstanceTransform]) {
        let t = input.ctx.elapsed;
        for (i, o) in out.iter_mut().enumerate().take(self.count) {
            let u = self.loop_position(i, t);
            o.position = self.path.sample(u);
            o.rotation = Vec3::ZERO;
            o.scale = Vec3::splat(self.size * self.seam_fade(u));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fields/recompute.rs"]
mod tests;
