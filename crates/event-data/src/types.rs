//! Reconstructed Object Types

use serde::{Deserialize, Serialize};

/// Identifier of a reconstructed particle
pub type ParticleId = u64;

/// Identifier of a reconstructed track
pub type TrackId = u64;

/// Three-vector used for trajectory directions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Create a new vector
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Dot product
    pub fn dot(&self, other: &Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Euclidean length
    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Cross product
    pub fn cross(&self, other: &Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Angle to another vector in radians, within [0, π].
    ///
    /// Returns 0 when either vector has zero length.
    pub fn angle(&self, other: &Vec3) -> f64 {
        if self.magnitude() == 0.0 || other.magnitude() == 0.0 {
            return 0.0;
        }
        // atan2 stays exact for parallel vectors where acos would not
        self.cross(other).magnitude().atan2(self.dot(other))
    }
}

/// Reconstructed particle from pattern recognition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Particle {
    pub id: ParticleId,
    /// Pattern-recognition hypothesis (13 track-like, 11 shower-like)
    pub pdg_code: i32,
    pub parent: Option<ParticleId>,
    #[serde(default)]
    pub daughters: Vec<ParticleId>,
}

impl Particle {
    /// Number of direct daughters
    pub fn num_daughters(&self) -> usize {
        self.daughters.len()
    }
}

/// Reconstructed track with the direction at each trajectory point
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    /// Particle this track was fitted for
    pub particle: ParticleId,
    #[serde(default)]
    pub directions: Vec<Vec3>,
}

impl Track {
    /// Number of trajectory points
    pub fn num_points(&self) -> usize {
        self.directions.len()
    }
}

/// Calorimetric energy-loss samples along a track
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Calorimetry {
    pub track: TrackId,
    /// Energy loss per unit length, ordered along the track
    #[serde(default)]
    pub dedx: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_angle_parallel() {
        let a = Vec3::new(0.3, 0.4, 0.5);
        assert_eq!(a.angle(&a), 0.0);
        assert!(a.angle(&Vec3::new(0.6, 0.8, 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_angle_perpendicular_and_opposite() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        assert!((a.angle(&Vec3::new(0.0, 1.0, 0.0)) - FRAC_PI_2).abs() < 1e-12);
        assert!((a.angle(&Vec3::new(-2.0, 0.0, 0.0)) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_angle_zero_vector() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(a.angle(&Vec3::default()), 0.0);
    }

    proptest::proptest! {
        #[test]
        fn prop_angle_in_range(
            ax in -10.0f64..10.0, ay in -10.0f64..10.0, az in -10.0f64..10.0,
            bx in -10.0f64..10.0, by in -10.0f64..10.0, bz in -10.0f64..10.0,
        ) {
            let angle = Vec3::new(ax, ay, az).angle(&Vec3::new(bx, by, bz));
            proptest::prop_assert!((0.0..=PI).contains(&angle));
        }
    }

    #[test]
    fn test_track_points() {
        let track = Track {
            id: 1,
            particle: 7,
            directions: vec![Vec3::new(0.0, 0.0, 1.0); 4],
        };
        assert_eq!(track.num_points(), 4);
    }
}
