//! Labelled Event Access

use crate::error::DataAccessError;
use crate::types::{ParticleId, Track};
use serde::{Deserialize, Serialize};

/// Labels selecting which product collections to read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLabels {
    /// Particle collection label
    pub particle: String,
    /// Track collection label
    pub track: String,
    /// Calorimetry collection label
    pub calorimetry: String,
}

impl Default for DataLabels {
    fn default() -> Self {
        Self {
            particle: "pandora".to_string(),
            track: "pandoraTrack".to_string(),
            calorimetry: "pandoracalo".to_string(),
        }
    }
}

/// Read-only access to the reconstructed objects of one event
pub trait EventSource {
    /// Whether the particle carries the track hypothesis
    fn is_track_like(&self, particle: ParticleId, labels: &DataLabels) -> Result<bool, DataAccessError>;

    /// Whether the particle carries the shower hypothesis
    fn is_shower_like(&self, particle: ParticleId, labels: &DataLabels) -> Result<bool, DataAccessError>;

    /// Track fitted for the particle. Fails if the particle is not track-like.
    fn track(&self, particle: ParticleId, labels: &DataLabels) -> Result<&Track, DataAccessError>;

    /// Energy-loss samples along the track
    fn dedx(&self, track: &Track, labels: &DataLabels) -> Result<&[f32], DataAccessError>;

    /// Direct children of the particle
    fn children(&self, particle: ParticleId, labels: &DataLabels) -> Result<Vec<ParticleId>, DataAccessError>;

    /// Number of direct children of the particle
    fn child_count(&self, particle: ParticleId, labels: &DataLabels) -> Result<usize, DataAccessError>;
}
