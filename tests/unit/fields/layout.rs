use super::*;

#[test]
fn grid_is_centered_on_origin() {
    let layout = Layout::Grid {
        columns: 3,
        spacing: Vec3::new(1.0, 2.0, 0.0),
        origin: Vec3::new(0.0, 0.0, -5.0),
        jitter: 0.0,
    };
    let mut rng = Rng64::new(1);
    let slots: Vec<Vec3> = (0..6).map(|i| place(&layout, i, 6, &mut rng).0).collect();
    assert_eq!(slots[0], Vec3::new(-1.0, 1.0, -5.0));
    assert_eq!(slots[1], Vec3::new(0.0, 1.0, -5.0));
    assert_eq!(slots[5], Vec3::new(1.0, -1.0, -5.0));
    let mean = slots.iter().copied().sum::<Vec3>() / 6.0;
    assert!((mean - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-12);
}

#[test]
fn grid_jitter_is_bounded_and_seeded() {
    let layout = Layout::Grid {
        columns: 4,
        spacing: Vec3::ONE,
        origin: Vec3::ZERO,
        jitter: 0.1,
    };
    let mut a = Rng64::new(5);
    let mut b = Rng64::new(5);
    for i in 0..8 {
        let pa = place(&layout, i, 8, &mut a).0;
        let pb = place(&layout, i, 8, &mut b).0;
        assert_eq!(pa, pb);
    }
    let mut rng = Rng64::new(6);
    let jittered = place(&layout, 0, 8, &mut rng).0;
    assert!((jittered - Vec3::new(-1.5, 0.5, 0.0)).abs().max_element() <= 0.1);
}

#[test]
fn ring_slots_sit_on_the_radius_and_face_inward() {
    let layout = Layout::Ring {
        per_ring: 4,
        radius: 10.0,
        ring_step: 2.0,
        center: Vec3::new(0.0, 1.0, -20.0),
        height_step: 3.0,
        levels: 2,
    };
    let mut rng = Rng64::new(0);
    let (p0, r0) = place(&layout, 0, 12, &mut rng);
    assert!((p0 - Vec3::new(10.0, 1.0, -20.0)).length() < 1e-12);
    // +z rotated by the yaw points back at the center.
    let facing = Vec3::new(r0.y.sin(), 0.0, r0.y.cos());
    let inward = (Vec3::new(0.0, 1.0, -20.0) - p0).normalize();
    assert!((facing - inward).length() < 1e-12);

    let (p4, _) = place(&layout, 4, 12, &mut rng);
    assert!((p4.y - 4.0).abs() < 1e-12);
    let (p8, _) = place(&layout, 8, 12, &mut rng);
    assert!((p8 - Vec3::new(12.0, 1.0, -20.0)).length() < 1e-12);
}
