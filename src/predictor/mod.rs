//! The per-request prediction pipeline.

pub mod decision;
pub mod digit;

pub use decision::{Prediction, extract};
pub use digit::DigitPredictor;
