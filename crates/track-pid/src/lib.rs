//! Convolutional Track PID
//!
//! Builds classifier inputs for reconstructed tracks and runs the track
//! classifier on them.

mod config;
mod helper;

pub use crate::config::PidConfig;
pub use helper::PidHelper;

pub use event_data::{DataLabels, EventSource, InMemoryEvent, ParticleId};
pub use pid_inference::{Classifier, MockClassifier, OnnxClassifier, PidResult};
pub use track_features::{FeatureConfig, FeatureSchema, ModelInput, ScalarFeature, TopologyMode};

use pid_inference::InferenceError;
use thiserror::Error;
use tracing::Level;
use track_features::FeatureError;

/// Track PID error types
#[derive(Error, Debug)]
pub enum PidError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    Settings(#[from] ::config::ConfigError),

    #[error("Feature extraction failed: {0}")]
    Feature(#[from] FeatureError),

    #[error("Inference failed: {0}")]
    Inference(#[from] InferenceError),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// Initialize logging
pub fn init_logging(json: bool) -> Result<(), PidError> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(true);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| PidError::Logging(e.to_string()))
}
