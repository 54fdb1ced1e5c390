//! Event Data Access
//!
//! Provides the reconstructed particle/track data model and the labelled
//! data-access interface used by track feature extraction.

mod error;
mod event;
mod source;
mod types;

pub use error::DataAccessError;
pub use event::InMemoryEvent;
pub use source::{DataLabels, EventSource};
pub use types::{Calorimetry, Particle, ParticleId, Track, TrackId, Vec3};

/// PDG code used by pattern recognition for the track hypothesis
pub const TRACK_PDG: i32 = 13;

/// PDG code used by pattern recognition for the shower hypothesis
pub const SHOWER_PDG: i32 = 11;
