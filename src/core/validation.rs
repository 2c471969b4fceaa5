//! Scalar and shape validation helpers shared across pipeline stages.

use crate::core::errors::{DigitError, DigitResult};

/// Validates that a sequence has exactly the expected length.
pub fn validate_length(actual: usize, expected: usize, context: &str) -> DigitResult<()> {
    if actual != expected {
        return Err(DigitError::invalid_shape(format!(
            "{context}: expected {expected} values, got {actual}"
        )));
    }
    Ok(())
}

/// Validates that every value in a slice is finite.
///
/// Returns the index and value of the first offender in the error message so
/// a caller can tell a NaN from an infinity without re-scanning.
pub fn validate_finite(values: &[f32], context: &str) -> DigitResult<()> {
    for (idx, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(DigitError::invalid_shape(format!(
                "{context}: non-finite value {value} at index {idx}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_length() {
        assert!(validate_length(784, 784, "sample").is_ok());
        let err = validate_length(783, 784, "sample").unwrap_err();
        assert!(err.to_string().contains("783"));
    }

    #[test]
    fn test_validate_finite_flags_nan_and_infinity() {
        assert!(validate_finite(&[0.0, 0.5, 1.0], "sample").is_ok());
        assert!(validate_finite(&[0.0, f32::NAN], "sample").is_err());
        assert!(validate_finite(&[f32::INFINITY], "sample").is_err());
        assert!(validate_finite(&[], "sample").is_ok());
    }

    #[test]
    fn test_validate_finite_reports_index() {
        let err = validate_finite(&[0.0, 0.1, f32::NAN], "sample").unwrap_err();
        assert!(err.to_string().contains("index 2"));
    }
}
