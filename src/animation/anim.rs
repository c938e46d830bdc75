use crate::{
    animation::ease::Ease,
    foundation::core::{Pose, Rgb, Vec3},
    foundation::error::{CineError, CineResult},
    transform::non_linear::clamp01,
};

/// Values that can be blended linearly.
pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec3 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        *a + (*b - *a) * t
    }
}

impl Lerp for Rgb {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Rgb::new(
            a.r + (b.r - a.r) * t,
            a.g + (b.g - a.g) * t,
            a.b + (b.b - a.b) * t,
        )
    }
}

impl Lerp for Pose {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            position: <Vec3 as Lerp>::lerp(&a.position, &b.position, t),
            look_at: <Vec3 as Lerp>::lerp(&a.look_at, &b.look_at, t),
        }
    }
}

/// A value track keyed by scroll progress.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Keyframes<T> {
    pub keys: Vec<Keyframe<T>>, // sorted by `at`
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    pub at: f64,
    pub value: T,
    #[serde(default)]
    pub ease: Ease, // ease applied toward next key
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    /// Track holding one value everywhere.
    pub fn constant(value: T) -> Self {
        Self {
            keys: vec![Keyframe {
                at: 0.0,
                value,
                ease: Ease::Linear,
            }],
        }
    }

    /// Check ordering and key positions. `finite` decides whether a key value is usable.
    pub fn validate(&self, what: &str, finite: impl Fn(&T) -> bool) -> CineResult<()> {
        if self.keys.is_empty() {
            return Err(CineError::validation(format!(
                "{what} keyframes must have at least one key"
            )));
        }
        for k in &self.keys {
            if !k.at.is_finite() || !(0.0..=1.0).contains(&k.at) {
                return Err(CineError::validation(format!(
                    "{what} keyframe at={} must lie in [0, 1]",
                    k.at
                )));
            }
            if !finite(&k.value) {
                return Err(CineError::validation(format!(
                    "{what} keyframe at={} has a non-finite value",
                    k.at
                )));
            }
        }
        // Equal positions would make the track jump.
        if !self.keys.windows(2).all(|w| w[0].at < w[1].at) {
            return Err(CineError::validation(format!(
                "{what} keyframes must be strictly increasing in `at`"
            )));
        }
        Ok(())
    }

    /// Sample at `progress`. Before the first key the first value holds, after the last the last.
    ///
    /// Returns `None` only for an empty track, which [`Keyframes::validate`] rejects.
    pub fn sample(&self, progress: f64) -> Option<T> {
        let first = self.keys.first()?;
        let p = clamp01(progress);
        let idx = self.keys.partition_point(|k| k.at <= p);

        if idx == 0 {
            return Some(first.value.clone());
        }
        if idx >= self.keys.len() {
            return self.keys.last().map(|k| k.value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.at - a.at;
        if denom <= 0.0 {
            return Some(a.value.clone());
        }
        let te = a.ease.apply((p - a.at) / denom);
        Some(T::lerp(&a.value, &b.value, te))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
