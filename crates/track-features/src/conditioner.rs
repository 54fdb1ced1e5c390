//! Energy-loss Signal Conditioning

use crate::error::FeatureError;
use tracing::trace;

/// Minimum samples needed for the boundary extrapolation
pub const MIN_CONDITION_LENGTH: usize = 3;

/// Clamps energy-loss samples and smooths isolated jumps
#[derive(Debug, Clone, Copy)]
pub struct SignalConditioner {
    max_charge: f32,
    max_charge_jump: f32,
}

impl SignalConditioner {
    /// Create a conditioner with a clamp ceiling and a jump threshold
    pub fn new(max_charge: f32, max_charge_jump: f32) -> Self {
        Self {
            max_charge,
            max_charge_jump,
        }
    }

    /// Condition samples in place. The length is preserved.
    pub fn condition(&self, dedx: &mut [f32]) -> Result<(), FeatureError> {
        let n = dedx.len();
        if n < MIN_CONDITION_LENGTH {
            return Err(FeatureError::SequenceTooShort {
                required: MIN_CONDITION_LENGTH,
                actual: n,
            });
        }

        for value in dedx.iter_mut() {
            if *value > self.max_charge {
                *value = self.max_charge;
            }
            if *value < 0.0 {
                *value = 0.0;
            }
        }

        // End points are extrapolated from their two neighbours. The result
        // is not clamped again and may go negative.
        if dedx[0] - dedx[1] > self.max_charge_jump {
            trace!("Smoothing leading jump {} -> {}", dedx[0], dedx[1]);
            dedx[0] = dedx[1] + (dedx[1] - dedx[2]);
        }
        if dedx[n - 1] - dedx[n - 2] > self.max_charge_jump {
            trace!("Smoothing trailing jump {} -> {}", dedx[n - 1], dedx[n - 2]);
            dedx[n - 1] = dedx[n - 2] + (dedx[n - 2] - dedx[n - 3]);
        }

        // Single forward pass: earlier replacements feed later comparisons.
        // Only rises into a sample are checked.
        for q in 1..n - 1 {
            if dedx[q] - dedx[q - 1] > self.max_charge_jump {
                trace!("Smoothing jump at sample {}", q);
                dedx[q] = 0.5 * (dedx[q - 1] + dedx[q + 1]);
            }
        }

        Ok(())
    }

    /// Condition a copy of the samples
    pub fn conditioned(&self, dedx: &[f32]) -> Result<Vec<f32>, FeatureError> {
        let mut cleaned = dedx.to_vec();
        self.condition(&mut cleaned)?;
        Ok(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn conditioner() -> SignalConditioner {
        SignalConditioner::new(1000.0, 500.0)
    }

    #[test]
    fn test_clamps_out_of_range_values() {
        let cleaned = conditioner()
            .conditioned(&[900.0, 1500.0, 1200.0, 800.0, 700.0, 300.0, -3.0, -10.0])
            .unwrap();
        assert_eq!(cleaned, vec![900.0, 1000.0, 1000.0, 800.0, 700.0, 300.0, 0.0, 0.0]);
    }

    #[test]
    fn test_interior_spike_smoothed() {
        let cleaned = conditioner().conditioned(&[10.0, 12.0, 900.0, 14.0, 16.0]).unwrap();
        assert_eq!(cleaned[2], 13.0);
        assert_eq!(cleaned.len(), 5);
    }

    #[test]
    fn test_falling_edge_not_smoothed() {
        // A drop into a sample is not a jump
        let cleaned = conditioner().conditioned(&[900.0, 900.0, 10.0, 900.0, 900.0]).unwrap();
        assert_eq!(cleaned[2], 10.0);
        // The rise out of the dip is
        assert_eq!(cleaned[3], 455.0);
    }

    #[test]
    fn test_leading_jump_extrapolated() {
        let cleaned = conditioner().conditioned(&[800.0, 20.0, 18.0, 16.0]).unwrap();
        assert_eq!(cleaned[0], 22.0);
    }

    #[test]
    fn test_extrapolated_end_point_not_reclamped() {
        let cleaned = conditioner().conditioned(&[900.0, 10.0, 400.0, 400.0, 400.0]).unwrap();
        assert_eq!(cleaned, vec![-380.0, 10.0, 400.0, 400.0, 400.0]);
    }

    #[test]
    fn test_trailing_jump_extrapolated() {
        let cleaned = conditioner().conditioned(&[10.0, 12.0, 14.0, 950.0]).unwrap();
        assert_eq!(cleaned[3], 16.0);
    }

    #[test]
    fn test_clamp_happens_before_smoothing() {
        // 5000 clamps to 1000, which is still a jump of 990 over 10
        let cleaned = conditioner().conditioned(&[10.0, 10.0, 5000.0, 10.0, 10.0]).unwrap();
        assert_eq!(cleaned[2], 10.0);
    }

    #[test]
    fn test_too_short_rejected() {
        let mut short = [1.0, 2.0];
        assert!(matches!(
            conditioner().condition(&mut short),
            Err(FeatureError::SequenceTooShort { required: 3, actual: 2 })
        ));
    }

    proptest! {
        #[test]
        fn prop_identity_without_jumps(values in proptest::collection::vec(0.0f32..400.0, 3..200)) {
            // Any rise is below the 500 threshold and every value is in range
            let cleaned = conditioner().conditioned(&values).unwrap();
            prop_assert_eq!(cleaned, values);
        }

        #[test]
        fn prop_length_preserved(values in proptest::collection::vec(-2000.0f32..3000.0, 3..200)) {
            let cleaned = conditioner().conditioned(&values).unwrap();
            prop_assert_eq!(cleaned.len(), values.len());
            prop_assert!(cleaned.iter().all(|v| v.is_finite()));
        }

        #[test]
        fn prop_clamp_exact_without_smoothing(
            over in 1000.0f32..1e6,
            under in -1e6f32..0.0,
        ) {
            // High run then low run: no rise exceeds the threshold within runs
            let values = vec![over, over, over, under, under, under];
            let cleaned = conditioner().conditioned(&values).unwrap();
            prop_assert_eq!(cleaned, vec![1000.0, 1000.0, 1000.0, 0.0, 0.0, 0.0]);
        }
    }
}
