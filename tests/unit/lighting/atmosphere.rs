use super::*;
use crate::animation::anim::{Keyframe, Keyframes};
use crate::animation::ease::Ease;

const DT: f64 = 1.0 / 60.0;

fn track<T>(keys: Vec<(f64, T)>) -> Keyframes<T> {
    Keyframes {
        keys: keys
            .into_iter()
            .map(|(at, value)| Keyframe {
                at,
                value,
                ease: Ease::Smootherstep,
            })
            .collect(),
    }
}

fn def() -> AtmosphereDef {
    AtmosphereDef {
        fog_color: track(vec![(0.0, Rgb::BLACK), (1.0, Rgb::WHITE)]),
        fog_near: track(vec![(0.0, 15.0), (1.0, 5.0)]),
        fog_far: track(vec![(0.0, 55.0), (0.5, 4.0), (1.0, 70.0)]),
        rate: 4.0,
    }
}

#[test]
fn first_update_snaps_to_the_ramp() {
    let mut a = Atmosphere::new(&def());
    let s = a.update(&FrameCtx::new(1.0, DT, 0.0, 0.1));
    assert_eq!(s.color, Rgb::WHITE);
    assert_eq!(s.near, 5.0);
    assert_eq!(s.far, 70.0);
}

#[test]
fn damps_after_the_first_frame() {
    let mut a = Atmosphere::new(&def());
    a.update(&FrameCtx::new(0.0, DT, 0.0, 0.1));
    let s = a.update(&FrameCtx::new(1.0, DT, DT, 0.1));
    assert!(s.near < 15.0 && s.near > 5.0);
    for _ in 0..600 {
        a.update(&FrameCtx::new(1.0, DT, 0.0, 0.1));
    }
    assert!((a.state().near - 5.0).abs() < 1e-6);
}

#[test]
fn far_never_drops_below_near() {
    let mut a = Atmosphere::new(&def());
    let s = a.update(&FrameCtx::new(0.5, DT, 0.0, 0.1));
    assert_eq!(s.near, 10.0);
    assert_eq!(s.far, 10.0);
}
