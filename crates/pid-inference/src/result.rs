//! Classification Result

use serde::{Deserialize, Serialize};

/// Class scores for one track, in network output order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PidResult {
    scores: Vec<f32>,
}

impl PidResult {
    /// Wrap network output scores
    pub fn new(scores: Vec<f32>) -> Self {
        Self { scores }
    }

    /// Result for a particle that could not be classified
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Whether the result carries any scores
    pub fn is_valid(&self) -> bool {
        !self.scores.is_empty()
    }

    /// Number of classes
    pub fn num_classes(&self) -> usize {
        self.scores.len()
    }

    /// Score for a class index
    pub fn score(&self, class: usize) -> Option<f32> {
        self.scores.get(class).copied()
    }

    /// All scores
    pub fn scores(&self) -> &[f32] {
        &self.scores
    }

    /// Index of the highest-scoring class. Ties go to the lower index.
    pub fn best_class(&self) -> Option<usize> {
        self.scores
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f32)>, (i, &s)| match best {
                Some((_, top)) if top >= s || s.is_nan() => best,
                _ => Some((i, s)),
            })
            .map(|(i, _)| i)
    }

    /// Highest score
    pub fn best_score(&self) -> Option<f32> {
        self.best_class().and_then(|class| self.score(class))
    }
}
