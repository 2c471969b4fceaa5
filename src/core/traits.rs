//! The classifier capability consumed by the pipeline.

use crate::core::errors::DigitResult;
use crate::processors::AlignedTensor;

/// An opaque digit classifier.
///
/// The pipeline treats the model as a pure function over an aligned tensor
/// plus a readiness probe. The production adapter wraps an ONNX Runtime
/// session ([`crate::core::OrtClassifier`]); tests substitute deterministic
/// stubs. Implementations must be safe to share across concurrent requests:
/// `forward` takes `&self` and must not leak per-call state between callers.
pub trait DigitClassifier: Send + Sync {
    /// Runs the model on an aligned 28x28x1 tensor and returns the raw
    /// per-class score vector (one score per digit, not guaranteed to be
    /// normalized probabilities).
    fn forward(&self, tensor: &AlignedTensor) -> DigitResult<Vec<f32>>;

    /// Whether the underlying model has finished loading.
    fn is_loaded(&self) -> bool;

    /// Human-readable model name used in logs and error context.
    fn model_name(&self) -> &str {
        "digit-classifier"
    }
}
