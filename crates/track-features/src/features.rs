//! Classifier Input Assembly

use crate::conditioner::SignalConditioner;
use crate::config::{FeatureConfig, TopologyMode};
use crate::error::FeatureError;
use crate::geometry::deflection_statistics;
use crate::normalizer::SequenceNormalizer;
use crate::schema::{FeatureSchema, ModelInput, ScalarFeatures, SCALAR_FEATURES};
use crate::topology::count_children;
use event_data::{DataLabels, EventSource, ParticleId, Track};
use metrics::counter;
use rand::Rng;
use tracing::{debug, info};

/// Whether a particle can be turned into classifier input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackStatus {
    /// Particle does not carry the track hypothesis
    NotTrack,
    /// Track has fewer energy-loss samples than required
    TooFewPoints { points: usize, required: usize },
    /// Track can be classified
    Valid,
}

/// Products looked up for a particle
enum Fetched<'a> {
    NotTrack,
    TooFewPoints { points: usize, required: usize },
    Ready { track: &'a Track, dedx: &'a [f32] },
}

/// Builds classifier input from a reconstructed particle
#[derive(Debug, Clone)]
pub struct FeatureAssembler {
    config: FeatureConfig,
    conditioner: SignalConditioner,
    normalizer: SequenceNormalizer,
}

impl FeatureAssembler {
    /// Create an assembler. Fails if the configuration is inconsistent.
    pub fn new(config: FeatureConfig) -> Result<Self, FeatureError> {
        config.validate()?;
        info!(
            "Creating feature assembler: min_track_points={}, dedx_length={}, max_charge={}, max_charge_jump={}",
            config.min_track_points, config.dedx_length, config.max_charge, config.max_charge_jump
        );
        if config.topology_mode == TopologyMode::ParentQuirk {
            info!("Child topology counted with the parent hypothesis");
        }

        Ok(Self {
            conditioner: SignalConditioner::new(config.max_charge, config.max_charge_jump),
            normalizer: SequenceNormalizer::new(config.dedx_length, config.min_track_points),
            config,
        })
    }

    /// Schema of the inputs this assembler produces
    pub fn schema(&self) -> FeatureSchema {
        FeatureSchema::new(self.config.dedx_length)
    }

    /// Check whether a particle can be classified
    pub fn status<S>(&self, source: &S, particle: ParticleId, labels: &DataLabels) -> Result<TrackStatus, FeatureError>
    where
        S: EventSource + ?Sized,
    {
        Ok(match self.fetch(source, particle, labels)? {
            Fetched::NotTrack => TrackStatus::NotTrack,
            Fetched::TooFewPoints { points, required } => TrackStatus::TooFewPoints { points, required },
            Fetched::Ready { .. } => TrackStatus::Valid,
        })
    }

    /// Look the track and its samples up once, stopping at the first check
    /// that fails
    fn fetch<'a, S>(&self, source: &'a S, particle: ParticleId, labels: &DataLabels) -> Result<Fetched<'a>, FeatureError>
    where
        S: EventSource + ?Sized,
    {
        if !source.is_track_like(particle, labels)? {
            return Ok(Fetched::NotTrack);
        }
        let track = source.track(particle, labels)?;
        let dedx = source.dedx(track, labels)?;
        if dedx.len() < self.config.min_track_points {
            return Ok(Fetched::TooFewPoints {
                points: dedx.len(),
                required: self.config.min_track_points,
            });
        }
        Ok(Fetched::Ready { track, dedx })
    }

    /// Build the classifier input for a particle.
    ///
    /// Returns `Ok(None)` when the particle is not track-like or its track
    /// has too few energy-loss samples.
    pub fn assemble<S, R>(
        &self,
        source: &S,
        particle: ParticleId,
        labels: &DataLabels,
        rng: &mut R,
    ) -> Result<Option<ModelInput>, FeatureError>
    where
        S: EventSource + ?Sized,
        R: Rng + ?Sized,
    {
        let (track, dedx) = match self.fetch(source, particle, labels)? {
            Fetched::Ready { track, dedx } => (track, dedx),
            Fetched::NotTrack => {
                counter!("track_pid_inputs_total", "outcome" => "not_track").increment(1);
                debug!("Particle {} is not track-like, no classifier input", particle);
                return Ok(None);
            }
            Fetched::TooFewPoints { points, required } => {
                counter!("track_pid_inputs_total", "outcome" => "too_few_points").increment(1);
                debug!(
                    "Particle {} has {} dE/dx points, need {}, no classifier input",
                    particle, points, required
                );
                return Ok(None);
            }
        };

        let cleaned = self.conditioner.conditioned(dedx)?;
        let normalized = self.normalizer.normalize(cleaned, rng)?;

        let topology = count_children(source, particle, labels, self.config.topology_mode)?;
        let deflection = deflection_statistics(track)?;

        let scalars = ScalarFeatures {
            child_tracks: topology.tracks as f32,
            child_showers: topology.showers as f32,
            grandchildren: topology.grandchildren as f32,
            dedx_mean: normalized.window.mean,
            dedx_sigma: normalized.window.std_dev,
            deflection_mean: deflection.mean,
            deflection_sigma: deflection.std_dev,
        };

        counter!("track_pid_inputs_total", "outcome" => "assembled").increment(1);
        if normalized.padded > 0 {
            counter!("track_pid_padded_samples_total").increment(normalized.padded as u64);
        }
        debug!(
            "Assembled input for particle {}: {} dE/dx ({} padded), scalars={:?}",
            particle,
            normalized.dedx.len(),
            normalized.padded,
            SCALAR_FEATURES
                .iter()
                .map(|feature| (feature.as_str(), scalars.get(*feature)))
                .collect::<Vec<_>>()
        );

        Ok(Some(ModelInput {
            dedx: normalized.dedx,
            scalars,
        }))
    }
}
