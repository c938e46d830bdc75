use super::*;
use crate::composition::model::{Contribution, FlickerDef, PhaseDef};
use crate::composition::phase::FadeAnchor;

const DT: f64 = 1.0 / 60.0;

fn table() -> PhaseTable {
    let def = |name: &str, start: f64, end: f64| PhaseDef {
        name: name.to_string(),
        start,
        end,
        fade_in: 0.05,
        fade_out: 0.05,
        anchor: FadeAnchor::Straddle,
        sub_shots: None,
    };
    PhaseTable::from_defs(&[def("warm", 0.0, 0.5), def("cold", 0.5, 1.0)]).unwrap()
}

fn light(contributions: Vec<Contribution>, flicker: Option<FlickerDef>) -> LightDef {
    LightDef {
        name: "key".to_string(),
        kind: LightKind::Point,
        position: Some(Vec3::new(1.0, 2.0, 3.0)),
        color: Rgb::new(1.0, 0.5, 0.0),
        base: 0.1,
        contributions,
        rate: 4.0,
        flicker,
    }
}

fn c(phase: &str, gain: f64, color: Option<Rgb>) -> Contribution {
    Contribution {
        phase: phase.to_string(),
        gain,
        color,
    }
}

fn weights_at(t: &PhaseTable, p: f64) -> PhaseWeights {
    let mut w = PhaseWeights::new(t);
    w.update(t, p);
    w
}

#[test]
fn first_update_snaps_then_damps() {
    let t = table();
    let mut rig = LightRig::new(&[light(vec![c("warm", 0.6, None), c("cold", 0.3, None)], None)], &t, 0)
        .unwrap();
    rig.update(&FrameCtx::new(0.2, DT, 0.0, 0.1), &weights_at(&t, 0.2));
    assert!((rig.states()[0].intensity - 0.7).abs() < 1e-12);

    // Jump to the cold phase: the live value chases the new target.
    let target = 0.1 + 0.3;
    let k = crate::transform::non_linear::damping_factor(4.0, DT);
    rig.update(&FrameCtx::new(0.9, DT, DT, 0.1), &weights_at(&t, 0.9));
    let expected = 0.7 + (target - 0.7) * k;
    assert!((rig.states()[0].intensity - expected).abs() < 1e-12);

    for i in 0..600 {
        rig.update(&FrameCtx::new(0.9, DT, i as f64 * DT, 0.1), &weights_at(&t, 0.9));
    }
    assert!((rig.get("key").unwrap().intensity - target).abs() < 1e-6);
}

#[test]
fn intensity_is_floor_clamped() {
    let t = table();
    let mut def = light(vec![c("warm", -5.0, None)], None);
    def.base = 0.0;
    let mut rig = LightRig::new(&[def], &t, 0).unwrap();
    rig.update(&FrameCtx::new(0.1, DT, 0.0, 0.1), &weights_at(&t, 0.1));
    assert_eq!(rig.states()[0].intensity, 0.0);
}

#[test]
fn color_blends_toward_contribution_colors() {
    let t = table();
    let blue = Rgb::new(0.0, 0.0, 1.0);
    let mut rig = LightRig::new(&[light(vec![c("cold", 0.5, Some(blue))], None)], &t, 0).unwrap();

    rig.update(&FrameCtx::new(0.1, DT, 0.0, 0.1), &weights_at(&t, 0.1));
    assert_eq!(rig.states()[0].color, Rgb::new(1.0, 0.5, 0.0));

    let mut rig = LightRig::new(&[light(vec![c("cold", 0.5, Some(blue))], None)], &t, 0).unwrap();
    rig.update(&FrameCtx::new(0.9, DT, 0.0, 0.1), &weights_at(&t, 0.9));
    let col = rig.states()[0].color;
    assert!((col.r - 0.5).abs() < 1e-12);
    assert!((col.g - 0.25).abs() < 1e-12);
    assert!((col.b - 0.5).abs() < 1e-12);
}

#[test]
fn flicker_only_when_the_phase_is_strong() {
    let t = table();
    let flicker = FlickerDef {
        waves: vec![crate::animation::proc::Wave::Sine {
            amp: 0.5,
            freq_hz: 1.0,
            phase: 0.0,
        }],
        threshold: 0.5,
    };
    let def = light(vec![c("cold", 1.0, None)], Some(flicker));
    let mut rig = LightRig::new(&[def], &t, 0).unwrap();

    // Phase off: no flicker, only the base.
    for i in 0..10 {
        let mut fresh = rig.clone();
        fresh.primed = false;
        fresh.update(&FrameCtx::new(0.1, DT, 0.1 * i as f64, 0.1), &weights_at(&t, 0.1));
        assert!((fresh.states()[0].intensity - 0.1).abs() < 1e-12);
    }

    // Phase fully on: intensity oscillates around 1.1.
    let mut seen_high = false;
    let mut seen_low = false;
    for i in 0..20 {
        let mut fresh = rig.clone();
        fresh.primed = false;
        fresh.update(&FrameCtx::new(0.9, DT, 0.05 * i as f64, 0.1), &weights_at(&t, 0.9));
        let v = fresh.states()[0].intensity;
        assert!(v >= 0.0 && v <= 1.1 * 1.5 + 1e-9);
        seen_high |= v > 1.3;
        seen_low |= v < 0.9;
    }
    assert!(seen_high && seen_low);
    rig.update(&FrameCtx::new(0.9, DT, 0.0, 0.1), &weights_at(&t, 0.9));
}

#[test]
fn unknown_phase_is_rejected() {
    let t = table();
    let err = LightRig::new(&[light(vec![c("nope", 1.0, None)], None)], &t, 0).unwrap_err();
    assert!(err.to_string().contains("unknown phase 'nope'"));
}

#[test]
fn state_keeps_renderer_metadata() {
    let t = table();
    let rig = LightRig::new(&[light(vec![], None)], &t, 0).unwrap();
    let s = &rig.states()[0];
    assert_eq!(s.kind, LightKind::Point);
    assert_eq!(s.position, Some(Vec3::new(1.0, 2.0, 3.0)));
    let json = serde_json::to_value(s).unwrap();
    assert_eq!(json["kind"], "Point");
    assert!(rig.get("missing").is_none());
}
