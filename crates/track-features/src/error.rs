//! Feature Extraction Error Types

use event_data::DataAccessError;
use thiserror::Error;

/// Errors during feature extraction
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Sequence shorter than an operation requires
    #[error("Sequence too short: need at least {required} samples, got {actual}")]
    SequenceTooShort { required: usize, actual: usize },

    /// Statistics requested over no values
    #[error("Cannot compute statistics of an empty sequence")]
    EmptySequence,

    /// Trajectory with too few points to form a deflection
    #[error("Trajectory has {points} points, need at least 2")]
    TrajectoryTooShort { points: usize },

    /// Rejected feature configuration
    #[error("Invalid feature configuration: {0}")]
    InvalidConfig(String),

    /// Gaussian padding parameters are unusable
    #[error("Invalid padding distribution: mean={mean}, sigma={sigma}")]
    InvalidPadding { mean: f32, sigma: f32 },

    /// Failure in the event data collaborator
    #[error("Data access failed: {0}")]
    DataAccess(#[from] DataAccessError),
}
