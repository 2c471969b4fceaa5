//! Core building blocks of the digit recognition pipeline.
//!
//! This module contains the pieces every other part of the crate leans on:
//! - Fixed pipeline constants (grid geometry, class count)
//! - Error handling ([`DigitError`])
//! - The classifier capability trait ([`DigitClassifier`])
//! - The ONNX Runtime production adapter ([`OrtClassifier`])
//! - Scalar/shape validation helpers

pub mod constants;
pub mod errors;
pub mod inference;
pub mod traits;
pub mod validation;

pub use constants::*;
pub use errors::{DigitError, DigitResult};
pub use inference::OrtClassifier;
pub use traits::DigitClassifier;
pub use validation::{validate_finite, validate_length};
