//! Data Access Error Types

use crate::types::{ParticleId, TrackId};
use thiserror::Error;

/// Errors while reading products out of an event
#[derive(Debug, Error)]
pub enum DataAccessError {
    /// No collection of the requested product under the label
    #[error("No {kind} collection with label '{label}'")]
    MissingProduct { kind: &'static str, label: String },

    /// Particle id not present in the particle collection
    #[error("Particle {id} not found under label '{label}'")]
    UnknownParticle { id: ParticleId, label: String },

    /// A track was requested for a particle that is not track-like
    #[error("Particle {0} is not track-like")]
    NotTrackLike(ParticleId),

    /// The particle has no associated track
    #[error("No track associated with particle {0}")]
    MissingTrack(ParticleId),

    /// The track has no associated calorimetry
    #[error("No calorimetry associated with track {0}")]
    MissingCalorimetry(TrackId),

    /// Malformed serialized event
    #[error("Invalid event data: {0}")]
    Parse(#[from] serde_json::Error),
}
