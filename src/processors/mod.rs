//! Pixel-grid processing for the digit pipeline.
//!
//! Converts raw, UI-captured intensity grids into the exact tensor layout
//! and value convention the classifier was trained on.

pub mod normalization;
pub mod resize;
pub mod sample;

pub use normalization::SampleNormalizer;
pub use sample::RawSample;

/// A 28x28x1 single-channel grid in the classifier's expected convention
/// (1.0 = background, 0.0 = ink), ready to be fed to `forward`.
pub type AlignedTensor = ndarray::Array3<f32>;
