use serde::{Deserialize, Serialize};

/// Strategy combining per-modality scores into one acceptance score.
///
/// `Sum` lets the modalities share one joint budget; `Max` rejects a pixel
/// pair as soon as any single modality alone is outside its own budget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accumulator {
    #[default]
    Sum,
    Max,
}

impl Accumulator {
    /// Fold the scores into a single scalar. Empty input combines to zero.
    #[inline]
    pub fn combine(&self, scores: &[f32]) -> f32 {
        match self {
            Accumulator::Sum => scores.iter().sum(),
            Accumulator::Max => scores.iter().fold(0.0f32, |acc, &s| acc.max(s)),
        }
    }
}
