use super::*;

const ALL: [Ease; 10] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::OutQuint,
    Ease::Smoothstep,
    Ease::Smootherstep,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn input_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(-2.0), 0.0);
        assert_eq!(ease.apply(3.0), 1.0);
        assert_eq!(ease.apply(f64::NAN), 0.0);
    }
}

#[test]
fn out_quint_front_loads_motion() {
    assert!(Ease::OutQuint.apply(0.2) > 0.6);
    assert!((Ease::Smoothstep.apply(0.5) - 0.5).abs() < 1e-12);
    assert!((Ease::Smootherstep.apply(0.5) - 0.5).abs() < 1e-12);
}

#[test]
fn serde_uses_variant_names() {
    let s = serde_json::to_string(&Ease::OutQuint).unwrap();
    assert_eq!(s, "\"OutQuint\"");
    let e: Ease = serde_json::from_str("\"Smootherstep\"").unwrap();
    assert_eq!(e, Ease::Smootherstep);
    assert_eq!(Ease::default(), Ease::Linear);
}
