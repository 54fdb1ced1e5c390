//! In-Memory Event Store

use std::collections::HashMap;

use crate::error::DataAccessError;
use crate::source::{DataLabels, EventSource};
use crate::types::{Calorimetry, Particle, ParticleId, Track};
use crate::{SHOWER_PDG, TRACK_PDG};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Event holding labelled product collections in memory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryEvent {
    #[serde(default)]
    particles: HashMap<String, Vec<Particle>>,
    #[serde(default)]
    tracks: HashMap<String, Vec<Track>>,
    #[serde(default)]
    calorimetry: HashMap<String, Vec<Calorimetry>>,
}

impl InMemoryEvent {
    /// Create an empty event
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an event from JSON
    pub fn from_json(json: &str) -> Result<Self, DataAccessError> {
        let event: Self = serde_json::from_str(json)?;
        debug!(
            "Loaded event: {} particle, {} track, {} calorimetry collections",
            event.particles.len(),
            event.tracks.len(),
            event.calorimetry.len()
        );
        Ok(event)
    }

    /// Add a particle under a label
    pub fn with_particle(mut self, label: &str, particle: Particle) -> Self {
        self.particles.entry(label.to_string()).or_default().push(particle);
        self
    }

    /// Add a track under a label
    pub fn with_track(mut self, label: &str, track: Track) -> Self {
        self.tracks.entry(label.to_string()).or_default().push(track);
        self
    }

    /// Add calorimetry under a label
    pub fn with_calorimetry(mut self, label: &str, calorimetry: Calorimetry) -> Self {
        self.calorimetry.entry(label.to_string()).or_default().push(calorimetry);
        self
    }

    fn particle(&self, id: ParticleId, labels: &DataLabels) -> Result<&Particle, DataAccessError> {
        let collection = self
            .particles
            .get(&labels.particle)
            .ok_or_else(|| DataAccessError::MissingProduct {
                kind: "particle",
                label: labels.particle.clone(),
            })?;
        collection
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| DataAccessError::UnknownParticle {
                id,
                label: labels.particle.clone(),
            })
    }
}

impl EventSource for InMemoryEvent {
    fn is_track_like(&self, particle: ParticleId, labels: &DataLabels) -> Result<bool, DataAccessError> {
        Ok(self.particle(particle, labels)?.pdg_code.abs() == TRACK_PDG)
    }

    fn is_shower_like(&self, particle: ParticleId, labels: &DataLabels) -> Result<bool, DataAccessError> {
        Ok(self.particle(particle, labels)?.pdg_code.abs() == SHOWER_PDG)
    }

    fn track(&self, particle: ParticleId, labels: &DataLabels) -> Result<&Track, DataAccessError> {
        if !self.is_track_like(particle, labels)? {
            return Err(DataAccessError::NotTrackLike(particle));
        }
        let collection = self
            .tracks
            .get(&labels.track)
            .ok_or_else(|| DataAccessError::MissingProduct {
                kind: "track",
                label: labels.track.clone(),
            })?;
        collection
            .iter()
            .find(|t| t.particle == particle)
            .ok_or(DataAccessError::MissingTrack(particle))
    }

    fn dedx(&self, track: &Track, labels: &DataLabels) -> Result<&[f32], DataAccessError> {
        let collection = self
            .calorimetry
            .get(&labels.calorimetry)
            .ok_or_else(|| DataAccessError::MissingProduct {
                kind: "calorimetry",
                label: labels.calorimetry.clone(),
            })?;
        collection
            .iter()
            .find(|c| c.track == track.id)
            .map(|c| c.dedx.as_slice())
            .ok_or(DataAccessError::MissingCalorimetry(track.id))
    }

    fn children(&self, particle: ParticleId, labels: &DataLabels) -> Result<Vec<ParticleId>, DataAccessError> {
        Ok(self.particle(particle, labels)?.daughters.clone())
    }

    fn child_count(&self, particle: ParticleId, labels: &DataLabels) -> Result<usize, DataAccessError> {
        Ok(self.particle(particle, labels)?.num_daughters())
    }
}
