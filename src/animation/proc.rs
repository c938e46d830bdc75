use crate::{
    foundation::core::{Aabb, Vec3},
    foundation::error::{CineError, CineResult},
};

/// Seeded SplitMix64 generator for stable instance layouts.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform value in `[lo, hi)`.
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64_01()
    }

    /// Uniform value in `[-1, 1)`.
    pub fn signed(&mut self) -> f64 {
        self.next_f64_01() * 2.0 - 1.0
    }

    /// Uniform point inside `bounds`.
    pub fn in_box(&mut self, bounds: &Aabb) -> Vec3 {
        let u = Vec3::new(self.next_f64_01(), self.next_f64_01(), self.next_f64_01());
        bounds.at(u)
    }
}

fn noise01(seed: u64, x: i64) -> f64 {
    let mut rng = Rng64::new(seed ^ (x as u64).wrapping_mul(0xD6E8_FEB8_6659_FD93));
    rng.next_f64_01()
}

/// Low-frequency oscillator sampled by wall-clock seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Wave {
    Sine {
        amp: f64,
        freq_hz: f64,
        #[serde(default)]
        phase: f64,
    },
    /// Value noise; lattice values are blended with a smoothstep so the signal stays continuous.
    Noise { amp: f64, freq_hz: f64 },
}

impl Wave {
    pub fn validate(&self, what: &str) -> CineResult<()> {
        let (amp, freq_hz, phase) = match *self {
            Self::Sine {
                amp,
                freq_hz,
                phase,
            } => (amp, freq_hz, phase),
            Self::Noise { amp, freq_hz } => (amp, freq_hz, 0.0),
        };
        if !amp.is_finite() || !phase.is_finite() {
            return Err(CineError::validation(format!(
                "{what} wave amplitude and phase must be finite"
            )));
        }
        if !freq_hz.is_finite() || freq_hz < 0.0 {
            return Err(CineError::validation(format!(
                "{what} wave freq_hz must be finite and >= 0"
            )));
        }
        Ok(())
    }

    pub fn sample(&self, secs: f64, seed: u64) -> f64 {
        match *self {
            Self::Sine {
                amp,
                freq_hz,
                phase,
            } => amp * (std::f64::consts::TAU * freq_hz * secs + phase).sin(),
            Self::Noise { amp, freq_hz } => {
                let x = secs * freq_hz;
                let i0 = x.floor();
                let t = x - i0;
                let i0 = i0 as i64;

                let a = noise01(seed, i0) * 2.0 - 1.0;
                let b = noise01(seed, i0.wrapping_add(1)) * 2.0 - 1.0;
                let s = t * t * (3.0 - 2.0 * t);
                amp * (a + (b - a) * s)
            }
        }
    }
}

/// Sum of every wave at `secs`.
pub fn sum_waves(waves: &[Wave], secs: f64, seed: u64) -> f64 {
    waves
        .iter()
        .enumerate()
        .map(|(i, w)| w.sample(secs, seed.wrapping_add(i as u64)))
        .sum()
}

/// Independent wave sums per axis.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Wave3 {
    #[serde(default)]
    pub x: Vec<Wave>,
    #[serde(default)]
    pub y: Vec<Wave>,
    #[serde(default)]
    pub z: Vec<Wave>,
}

impl Wave3 {
    pub fn validate(&self, what: &str) -> CineResult<()> {
        self.x
            .iter()
            .chain(&self.y)
            .chain(&self.z)
            .try_for_each(|w| w.validate(what))
    }

    pub fn sample(&self, secs: f64, seed: u64) -> Vec3 {
        Vec3::new(
            sum_waves(&self.x, secs, seed),
            sum_waves(&self.y, secs, seed ^ 0x5555_5555_5555_5555),
            sum_waves(&self.z, secs, seed ^ 0xAAAA_AAAA_AAAA_AAAA),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/proc.rs"]
mod tests;
