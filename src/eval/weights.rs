use crate::composition::phase::PhaseTable;

/// Per-frame phase weight vector, indexed like the [`PhaseTable`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhaseWeights {
    values: Vec<f64>,
}

impl PhaseWeights {
    pub fn new(table: &PhaseTable) -> Self {
        Self {
            values: vec![0.0; table.len()],
        }
    }

    /// Recompute every weight for `progress`. No allocation after construction.
    pub fn update(&mut self, table: &PhaseTable, progress: f64) {
        if self.values.len() != table.len() {
            self.values.resize(table.len(), 0.0);
        }
        table.weights_into(progress, &mut self.values);
    }

    pub fn get(&self, idx: usize) -> f64 {
        self.values.get(idx).copied().unwrap_or(0.0)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Pairs of phase name and weight.
    pub fn named<'a>(&'a self, table: &'a PhaseTable) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        table
            .phases()
            .iter()
            .zip(&self.values)
            .map(|(p, w)| (p.name(), *w))
    }

    /// Index and weight of the most visible phase (first one on ties).
    pub fn dominant(&self) -> Option<(usize, f64)> {
        self.values
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (i, w)| match best {
                Some((_, bw)) if bw >= w => best,
                _ => Some((i, w)),
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/weights.rs"]
mod tests;
