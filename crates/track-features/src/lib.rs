//! Track Feature Engine
//!
//! Turns a reconstructed track's energy-loss samples and topology into the
//! fixed-shape two-part input expected by the track classifier.

mod conditioner;
mod config;
mod error;
mod features;
mod geometry;
mod normalizer;
mod schema;
mod statistics;
mod topology;

pub use conditioner::SignalConditioner;
pub use config::{FeatureConfig, TopologyMode};
pub use error::FeatureError;
pub use features::{FeatureAssembler, TrackStatus};
pub use geometry::{deflection_angles, deflection_statistics};
pub use normalizer::{average_window, NormalizedSequence, SequenceNormalizer};
pub use schema::{
    FeatureSchema, ModelInput, ScalarFeature, ScalarFeatures, FEATURE_SCHEMA_VERSION, SCALAR_FEATURES,
    SCALAR_FEATURE_COUNT,
};
pub use statistics::SampleStatistics;
pub use topology::{count_children, TopologyCounts};
