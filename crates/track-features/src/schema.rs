//! Classifier Input Schema
//!
//! The classifier consumes two tensors: the fixed-length energy-loss
//! sequence and a vector of scalar features in the order given by
//! [`SCALAR_FEATURES`]. The network was trained against this exact layout,
//! so any change to the order or count must bump [`FEATURE_SCHEMA_VERSION`]
//! together with a retrained network.

use serde::{Deserialize, Serialize};

/// Version of the two-part input layout
pub const FEATURE_SCHEMA_VERSION: u32 = 1;

/// Number of scalar features
pub const SCALAR_FEATURE_COUNT: usize = 7;

/// Scalar features in network input order
pub const SCALAR_FEATURES: [ScalarFeature; SCALAR_FEATURE_COUNT] = [
    ScalarFeature::ChildTracks,
    ScalarFeature::ChildShowers,
    ScalarFeature::Grandchildren,
    ScalarFeature::DedxMean,
    ScalarFeature::DedxSigma,
    ScalarFeature::DeflectionMean,
    ScalarFeature::DeflectionSigma,
];

/// One named scalar feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarFeature {
    ChildTracks,
    ChildShowers,
    Grandchildren,
    DedxMean,
    DedxSigma,
    DeflectionMean,
    DeflectionSigma,
}

impl ScalarFeature {
    /// Position in the scalar input
    pub fn index(&self) -> usize {
        match self {
            ScalarFeature::ChildTracks => 0,
            ScalarFeature::ChildShowers => 1,
            ScalarFeature::Grandchildren => 2,
            ScalarFeature::DedxMean => 3,
            ScalarFeature::DedxSigma => 4,
            ScalarFeature::DeflectionMean => 5,
            ScalarFeature::DeflectionSigma => 6,
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarFeature::ChildTracks => "n_child_tracks",
            ScalarFeature::ChildShowers => "n_child_showers",
            ScalarFeature::Grandchildren => "n_grandchildren",
            ScalarFeature::DedxMean => "dedx_mean",
            ScalarFeature::DedxSigma => "dedx_sigma",
            ScalarFeature::DeflectionMean => "deflection_mean",
            ScalarFeature::DeflectionSigma => "deflection_sigma",
        }
    }
}

/// Scalar features of one track, by name
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScalarFeatures {
    pub child_tracks: f32,
    pub child_showers: f32,
    pub grandchildren: f32,
    pub dedx_mean: f32,
    pub dedx_sigma: f32,
    pub deflection_mean: f32,
    pub deflection_sigma: f32,
}

impl ScalarFeatures {
    /// Value of a single feature
    pub fn get(&self, feature: ScalarFeature) -> f32 {
        match feature {
            ScalarFeature::ChildTracks => self.child_tracks,
            ScalarFeature::ChildShowers => self.child_showers,
            ScalarFeature::Grandchildren => self.grandchildren,
            ScalarFeature::DedxMean => self.dedx_mean,
            ScalarFeature::DedxSigma => self.dedx_sigma,
            ScalarFeature::DeflectionMean => self.deflection_mean,
            ScalarFeature::DeflectionSigma => self.deflection_sigma,
        }
    }

    /// Features in network input order
    pub fn as_array(&self) -> [f32; SCALAR_FEATURE_COUNT] {
        SCALAR_FEATURES.map(|feature| self.get(feature))
    }

    /// Features in network input order
    pub fn to_vec(&self) -> Vec<f32> {
        self.as_array().to_vec()
    }
}

/// Shape of the two-part classifier input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub version: u32,
    pub dedx_length: usize,
    pub scalar_len: usize,
}

impl FeatureSchema {
    /// Current schema for a given energy-loss length
    pub fn new(dedx_length: usize) -> Self {
        Self {
            version: FEATURE_SCHEMA_VERSION,
            dedx_length,
            scalar_len: SCALAR_FEATURE_COUNT,
        }
    }
}

/// Classifier input for one track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInput {
    /// Fixed-length energy-loss sequence
    pub dedx: Vec<f32>,
    /// Scalar features
    pub scalars: ScalarFeatures,
}

impl ModelInput {
    /// Schema this input conforms to
    pub fn schema(&self) -> FeatureSchema {
        FeatureSchema::new(self.dedx.len())
    }

    /// The two network inputs: energy-loss sequence, then scalar features
    pub fn network_inputs(&self) -> [Vec<f32>; 2] {
        [self.dedx.clone(), self.scalars.to_vec()]
    }
}
