use super::*;
use crate::eval::context::FrameCtx;
use crate::foundation::core::Pose;

fn debris() -> DriftDef {
    DriftDef {
        bounds: Aabb::new(Vec3::new(-4.0, -2.0, -6.0), Vec3::new(4.0, 2.0, 0.0)),
        speed: [0.5, 3.0],
        size: [0.05, 0.1],
        spin: 1.5,
    }
}

fn step(field: &mut DriftField, out: &mut [InstanceTransform], dt: f64, elapsed: f64) {
    let ctx = FrameCtx::new(0.5, dt, elapsed, 0.1);
    let cam = Pose::default();
    let input = FieldInput {
        ctx: &ctx,
        weight: 1.0,
        local_progress: 0.5,
        camera: &cam,
    };
    field.integrate(&input, out);
}

#[test]
fn drift_stays_inside_its_bounds() {
    let def = debris();
    let mut field = DriftField::new(&def, 200, &mut Rng64::new(12));
    let mut out = vec![InstanceTransform::default(); 200];
    let mut elapsed = 0.0;
    for _ in 0..600 {
        elapsed += 0.05;
        step(&mut field, &mut out, 0.05, elapsed);
        for o in &out {
            assert!(o.position.cmpge(def.bounds.min).all());
            assert!(o.position.cmple(def.bounds.max).all(), "{:?}", o.position);
        }
    }
}

#[test]
fn drift_holds_still_on_a_zero_step() {
    let mut field = DriftField::new(&debris(), 16, &mut Rng64::new(1));
    let mut a = vec![InstanceTransform::default(); 16];
    step(&mut field, &mut a, 1.0 / 60.0, 1.0);
    let mut b = a.clone();
    step(&mut field, &mut b, 0.0, 1.0);
    for (a, b) in a.iter().zip(&b) {
        assert!((a.position - b.position).length() < 1e-12);
        assert_eq!(a.rotation, b.rotation);
    }
}

#[test]
fn drift_moves_at_its_speed() {
    let def = DriftDef {
        bounds: Aabb::new(Vec3::splat(-1000.0), Vec3::splat(1000.0)),
        ..debris()
    };
    let mut field = DriftField::new(&def, 32, &mut Rng64::new(5));
    let mut before = vec![InstanceTransform::default(); 32];
    step(&mut field, &mut before, 0.0, 0.0);
    let mut after = before.clone();
    step(&mut field, &mut after, 0.1, 0.1);
    for (a, b) in before.iter().zip(&after) {
        let v = (b.position - a.position).length() / 0.1;
        assert!((0.5 - 1e-9..=3.0 + 1e-9).contains(&v), "speed {v}");
    }
}

#[test]
fn drift_is_seeded() {
    let mut a = DriftField::new(&debris(), 8, &mut Rng64::new(77));
    let mut b = DriftField::new(&debris(), 8, &mut Rng64::new(77));
    let mut oa = vec![InstanceTransform::default(); 8];
    let mut ob = vec![InstanceTransform::default(); 8];
    for k in 1..=10 {
        step(&mut a, &mut oa, 0.02, k as f64 * 0.02);
        step(&mut b, &mut ob, 0.02, k as f64 * 0.02);
    }
    assert_eq!(oa, ob);
}
