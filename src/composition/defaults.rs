//! Built-in six-phase sequence: hook, problem, insight, solution, proof, cta.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::{
    animation::anim::{Keyframe, Keyframes},
    animation::ease::Ease,
    animation::proc::{Wave, Wave3},
    composition::model::*,
    composition::phase::FadeAnchor,
    foundation::core::{Aabb, Pose, Rgb, Vec3},
};

const AMBER: u32 = 0xD4A04A;
const COLD_BLUE: u32 = 0x4A6FA5;
const VIOLET: u32 = 0x6B4C9A;
const WARM_WHITE: u32 = 0xE8DDD0;

fn srgb(hex: u32) -> Rgb {
    Rgb::from_srgb8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

fn v(x: f64, y: f64, z: f64) -> Vec3 {
    Vec3::new(x, y, z)
}

fn phase(name: &str, start: f64, end: f64, sub_shots: Option<SubShotDef>) -> PhaseDef {
    PhaseDef {
        name: name.to_string(),
        start,
        end,
        fade_in: 0.04,
        fade_out: 0.04,
        anchor: FadeAnchor::Straddle,
        sub_shots,
    }
}

fn key<T>(at: f64, value: T) -> Keyframe<T> {
    Keyframe {
        at,
        value,
        ease: Ease::Smootherstep,
    }
}

fn sine(amp: f64, rad_per_sec: f64, phase: f64) -> Wave {
    Wave::Sine {
        amp,
        freq_hz: rad_per_sec / TAU,
        phase,
    }
}

fn light(name: &str, kind: LightKind, position: Option<Vec3>, color: u32) -> LightDef {
    LightDef {
        name: name.to_string(),
        kind,
        position,
        color: srgb(color),
        base: 0.0,
        contributions: Vec::new(),
        rate: 4.0,
        flicker: None,
    }
}

fn gain(phase: &str, gain: f64) -> Contribution {
    Contribution {
        phase: phase.to_string(),
        gain,
        color: None,
    }
}

fn field(name: &str, phase: &str, count: Option<usize>, opacity: f64, behavior: Behavior) -> FieldDef {
    FieldDef {
        name: name.to_string(),
        phase: phase.to_string(),
        count,
        seed: None,
        opacity,
        opacity_rate: None,
        tint: None,
        behavior,
    }
}

impl SequenceConfig {
    /// The built-in cinematic sequence.
    pub fn cinematic() -> Self {
        Self {
            seed: 0x00C1_4E5C,
            max_frame_dt: 0.1,
            phases: cinematic_phases(),
            camera: cinematic_camera(),
            lights: cinematic_lights(),
            atmosphere: Some(cinematic_atmosphere()),
            fields: cinematic_fields(),
        }
    }
}

fn cinematic_phases() -> Vec<PhaseDef> {
    let tour = SubShotDef {
        shots: vec![
            Pose::new(v(0.0, 10.0, -30.0), v(0.0, -3.0, -42.0)),
            Pose::new(v(-8.0, 6.0, -34.0), v(0.0, -3.0, -44.0)),
            Pose::new(v(8.0, 5.0, -38.0), v(0.0, -2.0, -46.0)),
            Pose::new(v(0.0, 3.0, -38.0), v(0.0, 0.0, -50.0)),
        ],
        ease: Ease::Smoothstep,
    };
    vec![
        phase("hook", 0.0, 0.15, None),
        phase("problem", 0.15, 0.30, None),
        phase("insight", 0.30, 0.45, None),
        phase("solution", 0.45, 0.65, None),
        phase("proof", 0.65, 0.85, Some(tour)),
        phase("cta", 0.85, 1.0, None),
    ]
}

fn cinematic_camera() -> CameraDef {
    let keys = [
        (v(0.0, 0.0, 20.0), v(0.0, 0.0, 0.0)),
        (v(4.0, -1.0, 6.0), v(-2.0, -2.0, -15.0)),
        (v(1.0, 2.0, -4.0), v(0.0, 0.0, -20.0)),
        (v(2.0, 4.0, -12.0), v(0.0, -2.0, -25.0)),
        (v(0.0, 10.0, -30.0), v(0.0, -3.0, -42.0)),
        (v(0.0, 1.0, -40.0), v(0.0, 0.0, -50.0)),
    ];
    CameraDef {
        keys: keys
            .into_iter()
            .map(|(position, look_at)| CameraKey {
                position,
                look_at,
                at: None,
            })
            .collect(),
        tension: 0.3,
        position_rate: 2.5,
        look_rate: 3.0,
        entry: Some(EntryDef {
            from: Pose::new(v(0.0, 0.5, 26.0), Vec3::ZERO),
            to: Pose::new(v(0.0, 0.0, 20.0), Vec3::ZERO),
            duration_secs: 5.0,
            scroll_threshold: 0.02,
            ease: Ease::OutQuint,
        }),
        drift: Some(IdleDriftDef {
            position: Wave3 {
                x: vec![sine(0.08, 0.06, 0.0)],
                y: vec![sine(0.05, 0.05, FRAC_PI_2)],
                z: Vec::new(),
            },
            look: Wave3::default(),
            decay: [0.5, 0.95],
            residual: 0.05,
            entry_fade_in: 0.8,
        }),
        roll: Some(RollDef {
            gain: 0.015,
            max_rad: 0.02,
            velocity_rate: 6.0,
            roll_rate: 2.0,
        }),
    }
}

fn cinematic_lights() -> Vec<LightDef> {
    let cold_flicker = FlickerDef {
        waves: vec![sine(0.05, 12.0, 0.0), sine(0.03, 23.0, 0.0)],
        threshold: 0.5,
    };

    let mut key = light("key", LightKind::Directional, Some(v(18.0, 12.0, 8.0)), AMBER);
    key.contributions = vec![gain("hook", 0.45)];

    let mut ambient = light("ambient", LightKind::Ambient, None, 0x08080F);
    ambient.base = 0.006;

    let mut cold_1 = light("cold_1", LightKind::Point, Some(v(-12.0, 6.0, -15.0)), 0xB8C4E0);
    cold_1.contributions = vec![gain("problem", 0.6)];
    cold_1.flicker = Some(cold_flicker.clone());

    let mut cold_2 = light("cold_2", LightKind::Point, Some(v(8.0, -5.0, -25.0)), VIOLET);
    cold_2.contributions = vec![gain("problem", 0.42)];
    cold_2.flicker = Some(cold_flicker);

    let mut warm_1 = light("insight_warm_1", LightKind::Point, Some(v(20.0, 3.0, -18.0)), 0xE8B84A);
    warm_1.contributions = vec![gain("insight", 0.7)];

    let mut warm_2 = light("insight_warm_2", LightKind::Point, Some(v(-15.0, 1.0, -25.0)), AMBER);
    warm_2.contributions = vec![gain("insight", 0.4)];

    let mut studio_key = light("studio_key", LightKind::Spot, Some(v(0.0, 15.0, -20.0)), WARM_WHITE);
    studio_key.contributions = vec![gain("solution", 1.2), gain("proof", 1.2)];

    let mut studio_fill = light("studio_fill", LightKind::Point, Some(v(-10.0, 3.0, -18.0)), 0xC4B5A0);
    studio_fill.contributions = vec![
        gain("solution", 0.35),
        Contribution {
            phase: "proof".to_string(),
            gain: 0.35,
            color: Some(srgb(WARM_WHITE)),
        },
    ];

    let mut studio_rim = light("studio_rim", LightKind::Point, Some(v(12.0, 6.0, -30.0)), AMBER);
    studio_rim.contributions = vec![gain("solution", 0.25), gain("proof", 0.25)];

    let mut closing = light("closing", LightKind::Point, Some(v(0.0, 2.0, -40.0)), AMBER);
    closing.contributions = vec![gain("cta", 0.4)];
    closing.flicker = Some(FlickerDef {
        waves: vec![sine(0.1, 0.3, 0.0)],
        threshold: 0.0,
    });

    vec![
        key,
        ambient,
        cold_1,
        cold_2,
        warm_1,
        warm_2,
        studio_key,
        studio_fill,
        studio_rim,
        closing,
    ]
}

fn cinematic_atmosphere() -> AtmosphereDef {
    AtmosphereDef {
        fog_color: Keyframes {
            keys: vec![
                key(0.0, srgb(0x0A0806)),
                key(0.25, srgb(0x060810)),
                key(0.38, srgb(0x080708)),
                key(0.55, srgb(0x08080A)),
            ],
        },
        fog_near: Keyframes {
            keys: vec![key(0.0, 15.0), key(0.3, 8.0), key(0.4, 10.0), key(0.55, 5.0)],
        },
        fog_far: Keyframes {
            keys: vec![key(0.0, 55.0), key(0.3, 35.0), key(0.55, 50.0), key(0.85, 70.0)],
        },
        rate: 4.0,
    }
}

fn cinematic_fields() -> Vec<FieldDef> {
    let mut dust = field(
        "dust",
        "hook",
        Some(2000),
        0.55,
        Behavior::Float(FloatDef {
            bounds: Aabb::new(v(-25.0, -15.0, -48.0), v(25.0, 15.0, -8.0)),
            amplitude: v(1.5, 0.8, 0.0),
            speed: [0.01, 0.04],
            size: [0.015, 0.055],
            rise: 0.015,
            calm: Some([0.0, 0.5]),
        }),
    );
    dust.tint = Some(Keyframes {
        keys: vec![key(0.0, srgb(AMBER)), key(0.4, srgb(COLD_BLUE))],
    });

    let mut haze = field(
        "haze",
        "problem",
        Some(600),
        0.35,
        Behavior::Drift(DriftDef {
            bounds: Aabb::new(v(-30.0, -15.0, -50.0), v(30.0, 15.0, -5.0)),
            speed: [0.05, 0.3],
            size: [0.02, 0.06],
            spin: 0.5,
        }),
    );
    haze.tint = Some(Keyframes::constant(srgb(VIOLET)));

    let mut converging = field(
        "converging",
        "insight",
        Some(600),
        0.8,
        Behavior::Assemble(AssembleDef {
            scatter: Aabb::new(v(-20.0, -12.0, -45.0), v(20.0, 12.0, -10.0)),
            layout: Layout::Grid {
                columns: 30,
                spacing: v(0.6, 0.6, 0.0),
                origin: v(0.0, 0.0, -20.0),
                jitter: 0.05,
            },
            window: [0.1, 0.9],
            scatter_scale: [0.03, 0.08],
            layout_scale: [0.05, 0.05],
            scatter_aspect: Vec3::ONE,
            layout_aspect: Vec3::ONE,
            tumble: Vec3::ZERO,
            wobble: [0.0, 0.2],
            glitch: None,
        }),
    );
    converging.tint = Some(Keyframes::constant(srgb(0xE8B84A)));

    let mut shards = field(
        "shards",
        "solution",
        Some(35),
        0.75,
        Behavior::Assemble(AssembleDef {
            scatter: Aabb::new(v(-17.5, -10.0, -40.0), v(17.5, 10.0, -15.0)),
            layout: Layout::Ring {
                per_ring: 12,
                radius: 12.0,
                ring_step: 0.0,
                center: v(0.0, -2.0, -28.0),
                height_step: 4.0,
                levels: 3,
            },
            window: [0.0, 0.75],
            scatter_scale: [0.4, 2.2],
            layout_scale: [1.2, 3.7],
            scatter_aspect: v(1.0, 1.6, 0.06),
            layout_aspect: v(1.0, 1.2, 0.03),
            tumble: v(0.2, 0.15, 0.1),
            wobble: [0.3, 0.8],
            glitch: Some(GlitchDef {
                amount: v(0.75, 0.4, 0.0),
                rate_hz: 8.0 / TAU,
                threshold: 0.92,
            }),
        }),
    );
    shards.tint = Some(Keyframes {
        keys: vec![key(0.45, srgb(0x1A1A2E)), key(0.6, srgb(0x1A1A1A))],
    });

    let tracers = field(
        "tracers",
        "solution",
        Some(2),
        0.9,
        Behavior::Tracer(TracerDef {
            path: vec![
                v(-8.0, -1.0, -22.0),
                v(0.0, -1.0, -18.0),
                v(8.0, -1.0, -22.0),
                v(0.0, -1.0, -30.0),
            ],
            speed: 0.1,
            size: 0.08,
            seam: 0.1,
        }),
    );

    let mut bokeh = field(
        "bokeh",
        "hook",
        Some(18),
        0.12,
        Behavior::Orbs(OrbsDef {
            bands: vec![
                BandDef {
                    z: [-10.0, -6.0],
                    size: [0.8, 1.4],
                    parallax: 1.0,
                },
                BandDef {
                    z: [-25.0, -15.0],
                    size: [1.5, 2.5],
                    parallax: 0.5,
                },
                BandDef {
                    z: [-50.0, -35.0],
                    size: [3.0, 5.0],
                    parallax: 0.2,
                },
            ],
            spread: [20.0, 12.0],
            drift: 0.6,
            drift_hz: 0.05,
            pulse: 0.15,
            parallax_strength: 0.3,
        }),
    );
    bokeh.opacity_rate = Some(3.0);
    bokeh.tint = Some(Keyframes {
        keys: vec![
            key(0.0, srgb(AMBER)),
            key(0.3, srgb(COLD_BLUE)),
            key(0.6, srgb(WARM_WHITE)),
        ],
    });

    let figures = field(
        "figures",
        "cta",
        None,
        0.9,
        Behavior::Sway(SwayDef {
            anchors: [-6.0, -3.0, 0.0, 3.0, 6.0]
                .into_iter()
                .map(|x: f64| AnchorDef {
                    position: v(x, 0.0, -50.0),
                    scale: v(1.0, 1.8, 1.0),
                    yaw: -x * 0.03,
                })
                .collect(),
            sway_rad: 0.02,
            freq_hz: 0.1,
        }),
    );

    vec![dust, haze, converging, shards, tracers, bokeh, figures]
}

#[cfg(test)]
#[path = "../../tests/unit/composition/defaults.rs"]
mod tests;
