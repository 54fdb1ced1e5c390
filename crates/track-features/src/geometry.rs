//! Trajectory Deflection Analysis

use crate::error::FeatureError;
use crate::statistics::SampleStatistics;
use event_data::Track;

/// Angles in radians between the directions at consecutive trajectory points
pub fn deflection_angles(track: &Track) -> Result<Vec<f32>, FeatureError> {
    let points = track.num_points();
    if points < 2 {
        return Err(FeatureError::TrajectoryTooShort { points });
    }

    Ok(track
        .directions
        .windows(2)
        .map(|pair| pair[1].angle(&pair[0]) as f32)
        .collect())
}

/// Mean and spread of the trajectory deflection ("wobble")
pub fn deflection_statistics(track: &Track) -> Result<SampleStatistics, FeatureError> {
    SampleStatistics::compute(&deflection_angles(track)?)
}
