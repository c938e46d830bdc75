use crate::foundation::error::{CineError, CineResult};

pub use glam::DVec3 as Vec3;

/// Linear-light RGB color.
///
/// Configuration spells colors as sRGB hex strings (`"#D4A04A"`); they are decoded to linear light
/// so that blending happens in a perceptually reasonable space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red, linear light.
    pub r: f64,
    /// Green, linear light.
    pub g: f64,
    /// Blue, linear light.
    pub b: f64,
}

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// White.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Build a color from linear-light components.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Decode sRGB-encoded 8-bit channels into linear light.
    pub fn from_srgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
    }

    /// Parse `#RRGGBB` (leading `#` optional).
    pub fn from_hex(s: &str) -> CineResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CineError::validation(format!(
                "color '{s}' must be of the form #RRGGBB"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| CineError::validation(format!("color '{s}': {e}")))
        };
        Ok(Self::from_srgb8(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Encode back to sRGB 8-bit channels.
    pub fn to_srgb8(self) -> [u8; 3] {
        [
            linear_to_srgb(self.r),
            linear_to_srgb(self.g),
            linear_to_srgb(self.b),
        ]
    }

    /// Format as `#RRGGBB`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_srgb8();
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    /// Multiply every channel by `k`.
    pub fn scale(self, k: f64) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }

    pub(crate) fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }
}

impl TryFrom<String> for Rgb {
    type Error = CineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

/// Serialize an [`Rgb`] as its raw linear `[r, g, b]` channels.
///
/// Runtime output uses this instead of hex, which is 8-bit and clamps to `[0, 1]`.
/// Use with `#[serde(serialize_with = "rgb_linear::serialize")]`.
pub mod rgb_linear {
    use serde::Serialize;

    use super::Rgb;

    pub fn serialize<S: serde::Serializer>(c: &Rgb, s: S) -> Result<S::Ok, S::Error> {
        [c.r, c.g, c.b].serialize(s)
    }
}

fn srgb_to_linear(c: u8) -> f64 {
    let c = f64::from(c) / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f64) -> u8 {
    let c = c.clamp(0.0, 1.0);
    let s = if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    };
    (s * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Camera placement: where the eye is and what it looks at.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pose {
    /// Eye position in world space.
    pub position: Vec3,
    /// Look-target in world space.
    pub look_at: Vec3,
}

impl Pose {
    /// Build a pose from its two points.
    pub const fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    pub(crate) fn is_finite(self) -> bool {
        self.position.is_finite() && self.look_at.is_finite()
    }
}

/// Axis-aligned box used for seeded layouts and wrap-around bounds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Build a box from two corners.
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Validate that the box is finite and not inverted.
    pub fn validate(&self, what: &str) -> CineResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(CineError::validation(format!("{what} bounds must be finite")));
        }
        if self.max.cmplt(self.min).any() {
            return Err(CineError::validation(format!(
                "{what} bounds max must be >= min on every axis"
            )));
        }
        Ok(())
    }

    /// Box extent per axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Map a point with components in `[0, 1]` into the box.
    pub fn at(&self, unit: Vec3) -> Vec3 {
        self.min + self.size() * unit
    }

    /// Wrap `p` back into the box on every axis with a non-zero extent.
    pub fn wrap(&self, p: Vec3) -> Vec3 {
        let size = self.size();
        let wrap_axis = |v: f64, lo: f64, len: f64| {
            if len > 0.0 {
                lo + (v - lo).rem_euclid(len)
            } else {
                lo
            }
        };
        Vec3::new(
            wrap_axis(p.x, self.min.x, size.x),
            wrap_axis(p.y, self.min.y, size.y),
            wrap_axis(p.z, self.min.z, size.z),
        )
    }
}

/// Per-instance transform written by instance fields every frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct InstanceTransform {
    /// World-space position.
    pub position: Vec3,
    /// XYZ Euler rotation in radians.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
