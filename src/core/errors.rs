//! Error types for the digit recognition pipeline.
//!
//! Every failure mode of the pipeline maps to one [`DigitError`] variant.
//! Errors are raised in the stage where the invariant breaks, carry context
//! about what that stage was doing, and are returned to the caller without
//! partial results; nothing is retried inside the pipeline.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type DigitResult<T> = Result<T, DigitError>;

/// Errors that can occur while classifying a drawn digit.
#[derive(Error, Debug)]
pub enum DigitError {
    /// The classifier has not finished loading; the request is rejected,
    /// never queued behind the load.
    #[error("model not loaded yet")]
    ModelNotReady,

    /// The input sample is not a valid 28x28 grid (wrong length or
    /// non-finite values).
    #[error("invalid image data: {message}")]
    InvalidShape {
        /// What was wrong with the input.
        message: String,
    },

    /// The classifier itself failed.
    #[error("inference failed in model '{model_name}': {context}")]
    Inference {
        /// Name of the model that failed.
        model_name: String,
        /// What the adapter was doing when it failed.
        context: String,
        /// The underlying runtime error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The classifier returned something other than a well-formed
    /// 10-element score vector. Logged as a likely integration bug.
    #[error("malformed classifier output: {message}")]
    MalformedOutput {
        /// What was wrong with the output.
        message: String,
    },

    /// The winning score is NaN. Surfaced as a hard failure so the caller
    /// never receives a digit paired with an unusable confidence.
    #[error("confidence for digit {digit} is NaN")]
    DegenerateConfidence {
        /// The argmax index whose score was NaN.
        digit: usize,
    },

    /// Error from the ONNX Runtime session.
    #[error(transparent)]
    Session(#[from] ort::Error),

    /// Error from basic tensor operations.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),

    /// Error decoding an image file.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },
}

impl From<image::ImageError> for DigitError {
    fn from(error: image::ImageError) -> Self {
        Self::ImageLoad(error)
    }
}

impl DigitError {
    /// Creates an invalid-shape error.
    pub fn invalid_shape(message: impl Into<String>) -> Self {
        Self::InvalidShape {
            message: message.into(),
        }
    }

    /// Creates a malformed-output error.
    pub fn malformed_output(message: impl Into<String>) -> Self {
        Self::MalformedOutput {
            message: message.into(),
        }
    }

    /// Wraps an error raised while invoking a classifier.
    pub fn inference(
        model_name: impl Into<String>,
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Inference {
            model_name: model_name.into(),
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_shape_message() {
        let err = DigitError::invalid_shape("expected 784 values, got 783");
        assert_eq!(
            err.to_string(),
            "invalid image data: expected 784 values, got 783"
        );
    }

    #[test]
    fn test_degenerate_confidence_names_digit() {
        let err = DigitError::DegenerateConfidence { digit: 7 };
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn test_shape_errors_convert_to_tensor_variant() {
        let shape_err = ndarray::Array2::<f32>::from_shape_vec((2, 2), vec![0.0]).unwrap_err();
        let err: DigitError = shape_err.into();
        assert!(matches!(err, DigitError::Tensor(_)));
    }
}
