//! Feature extraction configuration

use crate::error::FeatureError;
use serde::{Deserialize, Serialize};

/// How child particles are classified when counting topology
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopologyMode {
    /// Classify each child by its own hypothesis
    #[default]
    PerChild,
    /// Classify the parent once per child. Matches classifiers trained on
    /// inputs produced with the parent hypothesis counted for every child.
    ParentQuirk,
}

/// Feature extraction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Minimum number of energy-loss samples for a track to be classified
    pub min_track_points: usize,

    /// Fixed length of the energy-loss input
    pub dedx_length: usize,

    /// Ceiling applied to every energy-loss sample
    pub max_charge: f32,

    /// Rise between neighbouring samples treated as a spurious jump
    pub max_charge_jump: f32,

    /// Child classification policy
    pub topology_mode: TopologyMode,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            min_track_points: 50,
            dedx_length: 100,
            max_charge: 1000.0,
            max_charge_jump: 500.0,
            topology_mode: TopologyMode::PerChild,
        }
    }
}

impl FeatureConfig {
    /// Number of samples in the statistics window
    pub fn points_for_average(&self) -> usize {
        self.dedx_length.saturating_sub(self.min_track_points) / 3
    }

    /// Check the invariants the pipeline relies on
    pub fn validate(&self) -> Result<(), FeatureError> {
        if self.min_track_points < 3 {
            return Err(FeatureError::InvalidConfig(format!(
                "min_track_points must be at least 3, got {}",
                self.min_track_points
            )));
        }
        if self.dedx_length < self.min_track_points {
            return Err(FeatureError::InvalidConfig(format!(
                "dedx_length ({}) must not be less than min_track_points ({})",
                self.dedx_length, self.min_track_points
            )));
        }
        let window = self.points_for_average();
        if window == 0 {
            return Err(FeatureError::InvalidConfig(format!(
                "dedx_length - min_track_points must be at least 3 to form a statistics window, got {}",
                self.dedx_length - self.min_track_points
            )));
        }
        // The window reaches back 2 * window samples from the end
        if 2 * window > self.min_track_points {
            return Err(FeatureError::InvalidConfig(format!(
                "statistics window of {} samples does not fit twice into min_track_points ({})",
                window, self.min_track_points
            )));
        }
        if !(self.max_charge.is_finite() && self.max_charge > 0.0) {
            return Err(FeatureError::InvalidConfig(format!(
                "max_charge must be positive, got {}",
                self.max_charge
            )));
        }
        if !(self.max_charge_jump.is_finite() && self.max_charge_jump >= 0.0) {
            return Err(FeatureError::InvalidConfig(format!(
                "max_charge_jump must be non-negative, got {}",
                self.max_charge_jump
            )));
        }
        Ok(())
    }
}
