//! Fixed-length Sequence Normalization
//!
//! Brings a conditioned energy-loss sequence to exactly `dedx_length`
//! samples. Long tracks keep their final samples; short tracks are padded at
//! the front with Gaussian draws around the statistics of a window near the
//! end of the track, so the real samples always sit at the tail of the input.

use std::ops::Range;

use crate::error::FeatureError;
use crate::statistics::SampleStatistics;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::{debug, warn};

/// Draws allowed per padded sample before falling back to zero
pub const MAX_RESAMPLE_ATTEMPTS: usize = 1000;

/// Index range of the statistics window for a sequence of `len` samples.
///
/// With `p = (dedx_length - min_track_points) / 3`, the window is the `p`
/// samples ending `p` samples before the end of the sequence.
pub fn average_window(
    len: usize,
    dedx_length: usize,
    min_track_points: usize,
) -> Result<Range<usize>, FeatureError> {
    let points = dedx_length.saturating_sub(min_track_points) / 3;
    if points == 0 {
        return Err(FeatureError::InvalidConfig(format!(
            "no statistics window for dedx_length={} and min_track_points={}",
            dedx_length, min_track_points
        )));
    }
    let start = len.checked_sub(2 * points).ok_or(FeatureError::SequenceTooShort {
        required: 2 * points,
        actual: len,
    })?;
    Ok(start..len - points)
}

/// Output of the normalizer
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSequence {
    /// Exactly `dedx_length` samples
    pub dedx: Vec<f32>,
    /// Statistics of the window, computed before padding
    pub window: SampleStatistics,
    /// Number of synthetic samples at the front of `dedx`
    pub padded: usize,
}

/// Truncates or pads conditioned sequences to a fixed length
#[derive(Debug, Clone, Copy)]
pub struct SequenceNormalizer {
    dedx_length: usize,
    min_track_points: usize,
}

impl SequenceNormalizer {
    /// Create a normalizer
    pub fn new(dedx_length: usize, min_track_points: usize) -> Self {
        Self {
            dedx_length,
            min_track_points,
        }
    }

    /// Normalize a conditioned sequence
    pub fn normalize<R>(&self, cleaned: Vec<f32>, rng: &mut R) -> Result<NormalizedSequence, FeatureError>
    where
        R: Rng + ?Sized,
    {
        let range = average_window(cleaned.len(), self.dedx_length, self.min_track_points)?;
        // Visited in reverse so f32 accumulation matches the trained inputs
        let window = SampleStatistics::compute_reversed(&cleaned[range])?;

        let mut dedx = cleaned;
        let padded = self.pad_front(&mut dedx, window, rng)?;

        let start = dedx.len() - self.dedx_length;
        let dedx = dedx.split_off(start);

        debug!(
            "Normalized dE/dx: window mean={:.3} sigma={:.3}, padded={}",
            window.mean, window.std_dev, padded
        );

        Ok(NormalizedSequence { dedx, window, padded })
    }

    /// Prepend non-negative Gaussian draws until the sequence reaches
    /// `dedx_length`. Returns the number of samples added.
    pub fn pad_front<R>(
        &self,
        dedx: &mut Vec<f32>,
        stats: SampleStatistics,
        rng: &mut R,
    ) -> Result<usize, FeatureError>
    where
        R: Rng + ?Sized,
    {
        let missing = self.dedx_length.saturating_sub(dedx.len());
        if missing == 0 {
            return Ok(0);
        }

        let invalid = || FeatureError::InvalidPadding {
            mean: stats.mean,
            sigma: stats.std_dev,
        };
        if !stats.mean.is_finite() {
            return Err(invalid());
        }
        let gauss = Normal::new(stats.mean, stats.std_dev).map_err(|_| invalid())?;

        let draws: Vec<f32> = (0..missing).map(|_| draw_non_negative(&gauss, rng)).collect();
        // Each draw is inserted at the front in turn, so the first draw ends
        // up next to the real samples
        dedx.splice(0..0, draws.into_iter().rev());

        Ok(missing)
    }
}

fn draw_non_negative<R>(gauss: &Normal<f32>, rng: &mut R) -> f32
where
    R: Rng + ?Sized,
{
    for _ in 0..MAX_RESAMPLE_ATTEMPTS {
        let value = gauss.sample(rng);
        if value >= 0.0 {
            return value;
        }
    }
    warn!(
        "No non-negative padding draw after {} attempts, using 0",
        MAX_RESAMPLE_ATTEMPTS
    );
    0.0
}
