use super::*;

fn zig() -> Vec<Vec3> {
    vec![
        Vec3::new(0.0, 0.0, 20.0),
        Vec3::new(4.0, -1.0, 6.0),
        Vec3::new(1.0, 2.0, -4.0),
        Vec3::new(2.0, 4.0, -12.0),
    ]
}

#[test]
fn passes_through_every_key() {
    let s = CatmullRom::uniform(zig()).unwrap();
    for (i, p) in zig().iter().enumerate() {
        let t = i as f64 / 3.0;
        assert!((s.sample(t) - *p).length() < 1e-9, "key {i}");
    }
}

#[test]
fn clamps_outside_unit_range() {
    let s = CatmullRom::uniform(zig()).unwrap();
    assert_eq!(s.sample(-3.0), zig()[0]);
    assert_eq!(s.sample(7.0), zig()[3]);
    assert_eq!(s.sample(f64::NAN), zig()[0]);
}

#[test]
fn is_continuous_across_knots() {
    let s = CatmullRom::new(zig(), Some(vec![0.0, 0.2, 0.7, 1.0]), 0.3).unwrap();
    for knot in [0.2, 0.7] {
        let eps = 1e-7;
        let a = s.sample(knot - eps);
        let b = s.sample(knot + eps);
        assert!((a - b).length() < 1e-4);

        // First derivative matches on both sides of the knot.
        let h = 1e-5;
        let d_left = (s.sample(knot) - s.sample(knot - h)) / h;
        let d_right = (s.sample(knot + h) - s.sample(knot)) / h;
        assert!((d_left - d_right).length() < 1e-2 * (1.0 + d_left.length()));
    }
}

#[test]
fn two_points_at_classic_tension_is_a_line() {
    let a = Vec3::new(0.0, 0.0, 0.0);
    let b = Vec3::new(2.0, 4.0, -6.0);
    let s = CatmullRom::uniform(vec![a, b]).unwrap();
    let mid = s.sample(0.25);
    assert!((mid - (a + (b - a) * 0.25)).length() < 1e-12);
}

#[test]
fn single_point_is_constant() {
    let p = Vec3::new(1.0, 2.0, 3.0);
    let s = CatmullRom::uniform(vec![p]).unwrap();
    assert_eq!(s.sample(0.0), p);
    assert_eq!(s.sample(0.6), p);
}

#[test]
fn rejects_bad_input() {
    assert!(CatmullRom::uniform(vec![]).is_err());
    assert!(CatmullRom::uniform(vec![Vec3::new(f64::NAN, 0.0, 0.0)]).is_err());
    assert!(CatmullRom::new(zig(), Some(vec![0.0, 0.5, 0.5, 1.0]), 0.5).is_err());
    assert!(CatmullRom::new(zig(), Some(vec![0.0, 1.0]), 0.5).is_err());
    assert!(CatmullRom::new(zig(), Some(vec![0.0, 0.2, 0.7, 1.5]), 0.5).is_err());
    assert!(CatmullRom::new(zig(), None, -1.0).is_err());
    let err = CatmullRom::uniform(vec![]).unwrap_err().to_string();
    assert!(err.starts_with("validation error:"));
}
