//! Track Classifier Inference
//!
//! Runs the convolutional track classifier on assembled inputs using tract-onnx.

mod batcher;
mod engine;
mod result;

pub use batcher::{PidBatcher, PidBatcherHandle};
pub use engine::{Classifier, MockClassifier, OnnxClassifier};
pub use result::PidResult;

use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: String, actual: String },
    #[error("Batcher is not running")]
    BatcherClosed,
}
