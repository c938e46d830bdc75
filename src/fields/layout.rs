//! Ordered target layouts for assembling fields.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::{
    animation::proc::Rng64,
    composition::model::Layout,
    foundation::core::Vec3,
};

/// Slot `i` of `count` in `layout`: position and XYZ Euler rotation.
///
/// Grid jitter draws from `rng`, so slots must be placed in index order for stable output.
pub fn place(layout: &Layout, i: usize, count: usize, rng: &mut Rng64) -> (Vec3, Vec3) {
    match *layout {
        Layout::Grid {
            columns,
            spacing,
            origin,
            jitter,
        } => {
            let columns = columns.max(1);
            let rows = count.div_ceil(columns).max(1);
            let col = (i % columns) as f64;
            let row = (i / columns) as f64;
            let cx = (columns as f64 - 1.0) * 0.5;
            let cy = (rows as f64 - 1.0) * 0.5;
            let jitter = Vec3::new(rng.signed(), rng.signed(), rng.signed()) * jitter;
            let position = origin
                + Vec3::new(
                    (col - cx) * spacing.x,
                    (cy - row) * spacing.y,
                    -row * spacing.z,
                )
                + jitter;
            (position, Vec3::ZERO)
        }
        Layout::Ring {
            per_ring,
            radius,
            ring_step,
            center,
            height_step,
            levels,
        } => {
            let per_ring = per_ring.max(1);
            let levels = levels.max(1);
            let ring = i / per_ring;
            let slot = i % per_ring;
            let level = ring % levels;
            let shell = ring / levels;
            let angle = TAU * slot as f64 / per_ring as f64;
            let r = radius + shell as f64 * ring_step;
            let position = center
                + Vec3::new(angle.cos() * r, level as f64 * height_step, angle.sin() * r);
            // Panels face the ring center.
            (position, Vec3::new(0.0, -(angle + FRAC_PI_2), 0.0))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fields/layout.rs"]
mod tests;
