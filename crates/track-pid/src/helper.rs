//! Track PID helper

use std::sync::{Mutex, PoisonError};

use crate::config::PidConfig;
use crate::PidError;
use event_data::{DataLabels, EventSource, ParticleId};
use metrics::histogram;
use pid_inference::{Classifier, InferenceError, OnnxClassifier, PidResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use track_features::{FeatureAssembler, ModelInput};
use tracing::{debug, info};

/// Builds classifier inputs for particles and classifies them.
///
/// The classifier is loaded once when the helper is created. Each call draws
/// its padding from a generator seeded by one owned by the helper, which in
/// turn is seeded from the configuration when a seed is given. Calls sharing
/// a helper across threads only contend while that seed is drawn.
pub struct PidHelper<C: Classifier = OnnxClassifier> {
    labels: DataLabels,
    assembler: FeatureAssembler,
    classifier: C,
    rng: Mutex<StdRng>,
}

impl PidHelper<OnnxClassifier> {
    /// Create a helper running the ONNX network named in the configuration
    pub fn new(config: &PidConfig) -> Result<Self, PidError> {
        let assembler = FeatureAssembler::new(config.features.clone())?;
        let classifier = OnnxClassifier::load(config.network_location()?, assembler.schema())?;
        Self::build(config, assembler, classifier)
    }
}

impl<C: Classifier> PidHelper<C> {
    /// Create a helper around an already loaded classifier
    pub fn with_classifier(config: &PidConfig, classifier: C) -> Result<Self, PidError> {
        let assembler = FeatureAssembler::new(config.features.clone())?;
        Self::build(config, assembler, classifier)
    }

    fn build(config: &PidConfig, assembler: FeatureAssembler, classifier: C) -> Result<Self, PidError> {
        let expected = assembler.schema();
        let actual = classifier.schema();
        if expected != actual {
            return Err(InferenceError::InvalidInputShape {
                expected: format!("{:?}", expected),
                actual: format!("{:?}", actual),
            }
            .into());
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!(
            "Track PID ready: labels particle={} track={} calorimetry={}, seeded={}",
            config.particle_label,
            config.track_label,
            config.calorimetry_label,
            config.seed.is_some()
        );

        Ok(Self {
            labels: config.labels(),
            assembler,
            classifier,
            rng: Mutex::new(rng),
        })
    }

    /// The labels products are read with
    pub fn labels(&self) -> &DataLabels {
        &self.labels
    }

    /// Classifier input for a particle, or `None` if it cannot be classified
    pub fn network_inputs<S>(&self, event: &S, particle: ParticleId) -> Result<Option<ModelInput>, PidError>
    where
        S: EventSource + ?Sized,
    {
        // Lock only to draw this call's seed
        let seed = self.rng.lock().unwrap_or_else(PoisonError::into_inner).gen::<u64>();
        self.network_inputs_with_rng(event, particle, &mut StdRng::seed_from_u64(seed))
    }

    /// Classifier input for a particle using the caller's generator for padding
    pub fn network_inputs_with_rng<S, R>(
        &self,
        event: &S,
        particle: ParticleId,
        rng: &mut R,
    ) -> Result<Option<ModelInput>, PidError>
    where
        S: EventSource + ?Sized,
        R: Rng + ?Sized,
    {
        Ok(self.assembler.assemble(event, particle, &self.labels, rng)?)
    }

    /// Fixed-length energy-loss input for a particle
    pub fn dedx_vector<S>(&self, event: &S, particle: ParticleId) -> Result<Option<Vec<f32>>, PidError>
    where
        S: EventSource + ?Sized,
    {
        Ok(self.network_inputs(event, particle)?.map(|input| input.dedx))
    }

    /// Scalar feature input for a particle
    pub fn variable_vector<S>(&self, event: &S, particle: ParticleId) -> Result<Option<Vec<f32>>, PidError>
    where
        S: EventSource + ?Sized,
    {
        Ok(self
            .network_inputs(event, particle)?
            .map(|input| input.scalars.to_vec()))
    }

    /// Classify a particle. Particles that cannot be classified get an
    /// invalid (empty) result.
    pub fn run_pid<S>(&self, event: &S, particle: ParticleId) -> Result<PidResult, PidError>
    where
        S: EventSource + ?Sized,
    {
        match self.network_inputs(event, particle)? {
            Some(input) => {
                let start = std::time::Instant::now();
                let result = self.classifier.classify(&input)?;
                histogram!("track_pid_inference_seconds").record(start.elapsed().as_secs_f64());
                debug!(
                    "Particle {} classified: best class {:?}, scores {:?}",
                    particle,
                    result.best_class(),
                    result.scores()
                );
                Ok(result)
            }
            None => Ok(PidResult::invalid()),
        }
    }
}
