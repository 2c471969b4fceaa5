//! Decision extraction: raw classifier scores to a validated prediction.

use crate::core::constants::NUM_CLASSES;
use crate::core::errors::{DigitError, DigitResult};
use serde::{Deserialize, Serialize};

/// A classified digit and the raw score behind it.
///
/// `confidence` is the score at the argmax index, not a calibrated
/// probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// The predicted digit, 0-9.
    pub digit: usize,
    /// Raw classifier score for the predicted digit.
    pub confidence: f32,
}

/// Derives the predicted digit and its confidence from a raw score vector.
///
/// The vector must contain exactly one score per digit class; anything else
/// fails with `MalformedOutput`. The winner is the left-to-right maximum
/// (first occurrence wins on ties). A NaN winning score fails with
/// `DegenerateConfidence` so the caller never silently receives NaN. The
/// classifier emits NaN when the upstream tensor was malformed, and that is
/// an integration bug to surface, not a value to forward.
pub fn extract(scores: &[f32]) -> DigitResult<Prediction> {
    if scores.is_empty() {
        return Err(DigitError::malformed_output(
            "classifier returned an empty score vector",
        ));
    }
    if scores.len() != NUM_CLASSES {
        return Err(DigitError::malformed_output(format!(
            "expected {NUM_CLASSES} class scores, got {}",
            scores.len()
        )));
    }

    // Strict > keeps the first occurrence on ties. NaN never wins a
    // comparison, so a NaN elsewhere in the vector cannot displace a valid
    // maximum; a NaN at index 0 with no larger score stays the winner and
    // is rejected below.
    let mut digit = 0;
    let mut confidence = scores[0];
    for (idx, &score) in scores.iter().enumerate().skip(1) {
        if score > confidence {
            digit = idx;
            confidence = score;
        }
    }

    if confidence.is_nan() {
        return Err(DigitError::DegenerateConfidence { digit });
    }

    Ok(Prediction { digit, confidence })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_hot_at_nine() {
        let scores = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0];
        let prediction = extract(&scores).unwrap();
        assert_eq!(prediction.digit, 9);
        assert_eq!(prediction.confidence, 1.0);
    }

    #[test]
    fn test_tie_break_takes_lowest_index() {
        let scores = [0.1f32; 10];
        let prediction = extract(&scores).unwrap();
        assert_eq!(prediction.digit, 0);
        assert_eq!(prediction.confidence, 0.1);
    }

    #[test]
    fn test_nan_at_argmax_is_degenerate() {
        let mut scores = [0.0f32; 10];
        scores[0] = f32::NAN;
        let err = extract(&scores).unwrap_err();
        assert!(matches!(
            err,
            DigitError::DegenerateConfidence { digit: 0 }
        ));
    }

    #[test]
    fn test_nan_elsewhere_does_not_win() {
        let mut scores = [0.1f32; 10];
        scores[3] = f32::NAN;
        scores[7] = 0.9;
        let prediction = extract(&scores).unwrap();
        assert_eq!(prediction.digit, 7);
        assert_eq!(prediction.confidence, 0.9);
    }

    #[test]
    fn test_wrong_length_is_malformed() {
        assert!(matches!(
            extract(&[0.5f32; 9]).unwrap_err(),
            DigitError::MalformedOutput { .. }
        ));
        assert!(matches!(
            extract(&[0.5f32; 11]).unwrap_err(),
            DigitError::MalformedOutput { .. }
        ));
        assert!(matches!(
            extract(&[]).unwrap_err(),
            DigitError::MalformedOutput { .. }
        ));
    }

    #[test]
    fn test_unnormalized_scores_pass_through() {
        let scores = [1.0, 12.5, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let prediction = extract(&scores).unwrap();
        assert_eq!(prediction.digit, 1);
        assert_eq!(prediction.confidence, 12.5);
    }
}
