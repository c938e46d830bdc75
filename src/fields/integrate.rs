//! Fields with explicit velocity integration.

use crate::{
    animation::proc::Rng64,
    composition::model::DriftDef,
    fields::field::{FieldInput, Integrate},
    foundation::core::{Aabb, InstanceTransform, Vec3},
};

#[derive(Clone, Debug)]
struct Particle {
    position: Vec3,
    velocity: Vec3,
    spin: Vec3,
    size: f64,
}

/// Drifting debris: `position += velocity * dt`, wrapped inside the bounds.
#[derive(Clone, Debug)]
pub struct DriftField {
    bounds: Aabb,
    particles: Vec<Particle>,
}

impl DriftField {
    pub fn new(def: &DriftDef, count: usize, rng: &mut Rng64) -> Self {
        let particles = (0..count)
            .map(|_| {
                let dir = Vec3::new(rng.signed(), rng.signed(), rng.signed());
                let dir = dir.try_normalize().unwrap_or(Vec3::X);
                Particle {
                    position: rng.in_box(&def.bounds),
                    velocity: dir * rng.range(def.speed[0], def.speed[1]),
                    spin: Vec3::new(rng.signed(), rng.signed(), rng.signed()) * def.spin,
                    size: rng.range(def.size[0], def.size[1]),
                }
            })
            .collect();
        Self {
            bounds: def.bounds,
            particles,
        }
    }
}

impl Integrate for DriftField {
    fn integrate(&mut self, input: &FieldInput<'_>, out: &mut [InstanceTransform]) {
        let dt = input.ctx.dt;
        let t = input.ctx.elapsed;
        for (p, o) in self.particles.iter_mut().zip(out.iter_mut()) {
            p.position = self.bounds.wrap(p.position + p.velocity * dt);
            o.position = p.position;
            o.rotation = p.spin * t;
            o.scale = Vec3::splat(p.size);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fields/integrate.rs"]
mod tests;
