//! Inference Engine Implementation

use std::path::{Path, PathBuf};

use crate::result::PidResult;
use crate::InferenceError;
use track_features::{FeatureSchema, ModelInput};
use tracing::{debug, info};
use tract_onnx::prelude::*;

/// A trained track classifier
pub trait Classifier: Send + Sync {
    /// Input layout the classifier was trained on
    fn schema(&self) -> FeatureSchema;

    /// Classify one track
    fn classify(&self, input: &ModelInput) -> Result<PidResult, InferenceError>;

    /// Classify several tracks
    fn classify_batch(&self, inputs: &[ModelInput]) -> Vec<Result<PidResult, InferenceError>> {
        inputs.iter().map(|input| self.classify(input)).collect()
    }
}

/// Reject inputs that do not match the classifier's layout
fn check_shape(schema: &FeatureSchema, input: &ModelInput) -> Result<(), InferenceError> {
    let actual = input.schema();
    if actual != *schema {
        return Err(InferenceError::InvalidInputShape {
            expected: format!("v{} [1, {}] + [1, {}]", schema.version, schema.dedx_length, schema.scalar_len),
            actual: format!("v{} [1, {}] + [1, {}]", actual.version, actual.dedx_length, actual.scalar_len),
        });
    }
    Ok(())
}

/// ONNX track classifier executed with tract
pub struct OnnxClassifier {
    /// Model path
    model_path: PathBuf,
    /// Input layout
    schema: FeatureSchema,
    /// Optimized execution plan
    plan: TypedRunnableModel<TypedModel>,
}

impl OnnxClassifier {
    /// Load and optimize the network. Inputs are the energy-loss sequence
    /// `[1, dedx_length]` and the scalar features `[1, scalar_len]`.
    pub fn load(model_path: impl AsRef<Path>, schema: FeatureSchema) -> Result<Self, InferenceError> {
        let model_path = model_path.as_ref().to_path_buf();
        info!("Loading track classifier: {}", model_path.display());

        let load_err = |e: TractError| InferenceError::ModelLoadError(format!("{}: {}", model_path.display(), e));
        let plan = tract_onnx::onnx()
            .model_for_path(&model_path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, schema.dedx_length]).into()))
            .and_then(|model| model.with_input_fact(1, f32::fact([1, schema.scalar_len]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(load_err)?;

        info!("Model loaded successfully");
        Ok(Self {
            model_path,
            schema,
            plan,
        })
    }

    /// Get model path
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl Classifier for OnnxClassifier {
    fn schema(&self) -> FeatureSchema {
        self.schema
    }

    fn classify(&self, input: &ModelInput) -> Result<PidResult, InferenceError> {
        check_shape(&self.schema, input)?;
        let start = std::time::Instant::now();

        let failed = |e: TractError| InferenceError::InferenceFailed(e.to_string());
        let [dedx, scalars] = input.network_inputs();
        let dedx = Tensor::from_shape(&[1, dedx.len()], dedx.as_slice()).map_err(failed)?;
        let scalars = Tensor::from_shape(&[1, scalars.len()], scalars.as_slice()).map_err(failed)?;

        let outputs = self.plan.run(tvec!(dedx.into(), scalars.into())).map_err(failed)?;
        let scores = outputs
            .first()
            .ok_or_else(|| InferenceError::InferenceFailed("network produced no output".to_string()))?
            .as_slice::<f32>()
            .map_err(failed)?
            .to_vec();

        debug!("Inference completed in {}us", start.elapsed().as_micros());
        Ok(PidResult::new(scores))
    }
}

/// Classifier returning fixed scores, for development and tests
#[derive(Debug, Clone)]
pub struct MockClassifier {
    schema: FeatureSchema,
    scores: Vec<f32>,
}

impl MockClassifier {
    /// Create a mock classifier that always returns `scores`
    pub fn new(schema: FeatureSchema, scores: Vec<f32>) -> Self {
        info!("Creating mock track classifier with {} classes", scores.len());
        Self { schema, scores }
    }
}

impl Classifier for MockClassifier {
    fn schema(&self) -> FeatureSchema {
        self.schema
    }

    fn classify(&self, input: &ModelInput) -> Result<PidResult, InferenceError> {
        check_shape(&self.schema, input)?;
        Ok(PidResult::new(self.scores.clone()))
    }
}
