//! # sketch-digit
//!
//! Hand-drawn digit recognition built around a fixed preprocessing-and-decision
//! pipeline in front of a pretrained classifier.
//!
//! The pipeline is composed linearly per request:
//!
//! 1. A [`RawSample`] (784 pixel intensities captured with the ink = 1
//!    convention) is converted by [`SampleNormalizer`] into the tensor
//!    layout and value convention the classifier was trained on: convention
//!    inversion, bilinear upsample to 32x32, center crop back to 28x28.
//! 2. The aligned tensor is fed to a [`DigitClassifier`] (an opaque
//!    `forward`/`is_loaded` capability; the production adapter wraps an ONNX
//!    Runtime session).
//! 3. [`predictor::extract`] validates the raw score vector and derives the
//!    predicted digit and its confidence, rejecting degenerate results
//!    instead of forwarding them.
//!
//! All per-request state is owned and immutable; the classifier itself is
//! process-wide, loaded once and shared read-only across requests.

pub mod core;
pub mod predictor;
pub mod processors;
pub mod utils;

pub use crate::core::{DigitClassifier, DigitError, DigitResult, OrtClassifier};
pub use crate::predictor::{DigitPredictor, Prediction};
pub use crate::processors::{AlignedTensor, RawSample, SampleNormalizer};
