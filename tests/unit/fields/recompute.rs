use super::*;
use crate::composition::model::{BandDef, Layout};
use crate::eval::context::FrameCtx;
use crate::foundation::core::Pose;

fn v(x: f64, y: f64, z: f64) -> Vec3 {
    Vec3::new(x, y, z)
}

fn input<'a>(ctx: &'a FrameCtx, camera: &'a Pose, weight: f64, local: f64) -> FieldInput<'a> {
    FieldInput {
        ctx,
        weight,
        local_progress: local,
        camera,
    }
}

fn run(kernel: &impl Recompute, input: &FieldInput<'_>, n: usize) -> Vec<InstanceTransform> {
    let mut out = vec![InstanceTransform::default(); n];
    kernel.recompute(input, &mut out);
    out
}

fn dust(rise: f64) -> FloatDef {
    FloatDef {
        bounds: Aabb::new(v(-10.0, -5.0, -10.0), v(10.0, 5.0, 10.0)),
        amplitude: v(0.2, 0.2, 0.2),
        speed: [0.1, 0.4],
        size: [0.02, 0.05],
        rise,
        calm: Some([0.3, 0.6]),
    }
}

#[test]
fn float_field_is_seeded() {
    let def = dust(0.0);
    let a = FloatField::new(&def, 64, &mut Rng64::new(9));
    let b = FloatField::new(&def, 64, &mut Rng64::new(9));
    let c = FloatField::new(&def, 64, &mut Rng64::new(10));
    let ctx = FrameCtx::new(0.1, 1.0 / 60.0, 3.5, 0.1);
    let cam = Pose::default();
    let i = input(&ctx, &cam, 1.0, 0.1);
    assert_eq!(run(&a, &i, 64), run(&b, &i, 64));
    assert_ne!(run(&a, &i, 64), run(&c, &i, 64));
}

#[test]
fn float_rise_wraps_inside_the_box() {
    let def = dust(0.7);
    let field = FloatField::new(&def, 128, &mut Rng64::new(3));
    let cam = Pose::default();
    for secs in [0.0, 1.0, 7.3, 120.0] {
        let ctx = FrameCtx::new(0.0, 0.0, secs, 0.1);
        for o in run(&field, &input(&ctx, &cam, 1.0, 0.0), 128) {
            assert!(o.position.y >= -5.0 - 0.2 - 1e-9 && o.position.y <= 5.0 + 0.2 + 1e-9);
            assert!(o.position.is_finite());
        }
    }
}

#[test]
fn float_calm_stills_the_sway() {
    let def = FloatDef {
        rise: 0.0,
        ..dust(0.0)
    };
    let field = FloatField::new(&def, 16, &mut Rng64::new(1));
    let cam = Pose::default();
    let still_a = FrameCtx::new(0.9, 0.0, 1.0, 0.1);
    let still_b = FrameCtx::new(0.9, 0.0, 2.0, 0.1);
    assert_eq!(
        run(&field, &input(&still_a, &cam, 1.0, 0.0), 16),
        run(&field, &input(&still_b, &cam, 1.0, 0.0), 16)
    );
}

fn converging(glitch: Option<GlitchDef>) -> AssembleDef {
    AssembleDef {
        scatter: Aabb::new(v(-30.0, -30.0, -30.0), v(30.0, 30.0, 30.0)),
        layout: Layout::Grid {
            columns: 2,
            spacing: v(2.0, 2.0, 0.0),
            origin: v(0.0, 0.0, -10.0),
            jitter: 0.0,
        },
        window: [0.2, 0.8],
        scatter_scale: [0.5, 1.5],
        layout_scale: [2.0, 2.0],
        scatter_aspect: Vec3::ONE,
        layout_aspect: Vec3::ONE,
        tumble: v(1.0, 1.0, 1.0),
        wobble: [0.5, 1.0],
        glitch,
    }
}

#[test]
fn assemble_lands_on_the_layout_at_window_end() {
    let field = AssembleField::new(&converging(None), 4, &mut Rng64::new(2));
    let ctx = FrameCtx::new(0.5, 1.0 / 60.0, 11.0, 0.1);
    let cam = Pose::default();
    let out = run(&field, &input(&ctx, &cam, 0.5, 0.8), 4);
    let expected = [
        v(-1.0, 1.0, -10.0),
        v(1.0, 1.0, -10.0),
        v(-1.0, -1.0, -10.0),
        v(1.0, -1.0, -10.0),
    ];
    for (o, e) in out.iter().zip(expected) {
        assert!((o.position - e).length() < 1e-9, "{:?} vs {e:?}", o.position);
        assert!(o.rotation.length() < 1e-9);
        // Layout scale times phase weight.
        assert!((o.scale - Vec3::ONE).length() < 1e-12);
    }
}

#[test]
fn assemble_is_scattered_before_the_window() {
    let def = converging(None);
    let field = AssembleField::new(&def, 4, &mut Rng64::new(2));
    assert_eq!(field.assembly(0.0), 0.0);
    assert_eq!(field.assembly(0.2), 0.0);
    assert_eq!(field.assembly(1.0), 1.0);
    let ctx = FrameCtx::new(0.5, 0.0, 0.0, 0.1);
    let cam = Pose::default();
    for o in run(&field, &input(&ctx, &cam, 1.0, 0.0), 4) {
        // Wobble at t = 0 stays within its amplitude of the scatter box.
        assert!(o.position.abs().max_element() <= 31.0);
    }
}

#[test]
fn assemble_zero_weight_collapses_scale() {
    let field = AssembleField::new(&converging(None), 4, &mut Rng64::new(2));
    let ctx = FrameCtx::new(0.0, 0.0, 0.0, 0.1);
    let cam = Pose::default();
    for o in run(&field, &input(&ctx, &cam, 0.0, 0.5), 4) {
        assert_eq!(o.scale, Vec3::ZERO);
    }
}

#[test]
fn glitch_is_silent_once_assembled() {
    let glitch = GlitchDef {
        amount: v(3.0, 3.0, 3.0),
        rate_hz: 2.0,
        threshold: 0.0,
    };
    let calm = AssembleField::new(&converging(None), 4, &mut Rng64::new(4));
    let noisy = AssembleField::new(&converging(Some(glitch)), 4, &mut Rng64::new(4));
    let cam = Pose::default();
    let ctx = FrameCtx::new(0.5, 0.0, 1.3, 0.1);
    let assembled = input(&ctx, &cam, 1.0, 1.0);
    assert_eq!(run(&calm, &assembled, 4), run(&noisy, &assembled, 4));

    let loose = input(&ctx, &cam, 1.0, 0.0);
    let moved = run(&calm, &loose, 4)
        .iter()
        .zip(run(&noisy, &loose, 4))
        .any(|(a, b)| (a.position - b.position).length() > 1e-6);
    assert!(moved);
}

fn bokeh() -> OrbsDef {
    OrbsDef {
        bands: vec![
            BandDef {
                z: [-30.0, -20.0],
                size: [1.0, 2.0],
                parallax: 0.2,
            },
            BandDef {
                z: [-10.0, -5.0],
                size: [2.0, 3.0],
                parallax: 1.0,
            },
        ],
        spread: [10.0, 6.0],
        drift: 0.5,
        drift_hz: 0.1,
        pulse: 0.1,
        parallax_strength: 0.5,
    }
}

#[test]
fn orbs_parallax_follows_the_camera() {
    let field = OrbsField::new(&bokeh(), 6, &mut Rng64::new(8));
    let ctx = FrameCtx::new(0.9, 0.0, 2.0, 0.1);
    let still = Pose::new(v(0.0, 0.0, 10.0), Vec3::ZERO);
    let moved = Pose::new(v(2.0, 0.0, -4.0), Vec3::ZERO);
    let a = run(&field, &input(&ctx, &still, 1.0, 0.5), 6);
    let b = run(&field, &input(&ctx, &moved, 1.0, 0.5), 6);
    for (i, (a, b)) in a.iter().zip(&b).enumerate() {
        let parallax = if i % 2 == 0 { 0.2 } else { 1.0 };
        let shift = b.position - a.position;
        assert!((shift.x + 2.0 * parallax * 0.5).abs() < 1e-9);
        // Depth never follows the eye.
        assert!(shift.z.abs() < 1e-12);
        assert_eq!(a.scale, b.scale);
    }
}

#[test]
fn sway_rests_on_anchors_without_weight() {
    let def = SwayDef {
        anchors: vec![
            AnchorDef {
                position: v(-3.0, 0.0, -8.0),
                scale: v(1.0, 2.0, 1.0),
                yaw: 0.4,
            },
            AnchorDef {
                position: v(3.0, 0.0, -8.0),
                scale: Vec3::ONE,
                yaw: -0.4,
            },
        ],
        sway_rad: 0.05,
        freq_hz: 0.3,
    };
    let field = SwayField::new(&def, 2, &mut Rng64::new(0));
    let ctx = FrameCtx::new(0.5, 0.0, 4.2, 0.1);
    let cam = Pose::default();
    let out = run(&field, &input(&ctx, &cam, 0.0, 0.5), 2);
    assert_eq!(out[0].position, v(-3.0, 0.0, -8.0));
    assert_eq!(out[0].rotation, v(0.0, 0.4, 0.0));
    assert_eq!(out[0].scale, v(1.0, 2.0, 1.0));

    let live = run(&field, &input(&ctx, &cam, 1.0, 0.5), 2);
    for o in &live {
        assert!(o.rotation.z.abs() <= 0.05 + 1e-12);
    }
}

fn tracer(count: usize) -> TracerField {
    let def = TracerDef {
        path: vec![v(0.0, 0.0, 0.0), v(5.0, 1.0, 0.0), v(10.0, 0.0, 0.0)],
        speed: 0.25,
        size: 0.3,
        seam: 0.1,
    };
    TracerField::new(&def, count).unwrap()
}

#[test]
fn tracer_dots_are_evenly_staggered() {
    let field = tracer(2);
    assert_eq!(field.loop_position(0, 0.0), 0.0);
    assert_eq!(field.loop_position(1, 0.0), 0.5);
    assert!((field.loop_position(0, 2.0) - 0.5).abs() < 1e-12);
    assert!(field.loop_position(1, 2.0) < 1e-9);
}

#[test]
fn tracer_hides_the_loop_seam() {
    let field = tracer(2);
    let cam = Pose::default();
    let ctx = FrameCtx::new(0.5, 0.0, 0.0, 0.1);
    let out = run(&field, &input(&ctx, &cam, 1.0, 0.5), 2);
    // Dot 0 sits on the seam, dot 1 mid-loop at full size.
    assert_eq!(out[0].scale, Vec3::ZERO);
    assert!((out[1].scale - Vec3::splat(0.3)).length() < 1e-12);
    assert!((out[1].position.x - 5.0).abs() < 1e-9);
}

#[test]
fn tracer_rejects_an_empty_path() {
    let def = TracerDef {
        path: Vec::new(),
        speed: 1.0,
        size: 1.0,
        seam: 0.1,
    };
    assert!(TracerField::new(&def, 1).is_err());
}
