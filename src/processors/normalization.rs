//! Input normalization: raw capture grid to classifier-aligned tensor.

use crate::core::constants::{CROP_OFFSET, GRID_SIDE, UPSAMPLE_SIDE};
use crate::core::errors::DigitResult;
use crate::processors::AlignedTensor;
use crate::processors::resize::{crop, resize_bilinear};
use crate::processors::sample::RawSample;
use ndarray::{Array2, Axis};

/// Converts raw samples into the tensor layout and value convention the
/// classifier was trained on.
///
/// The transform chain is a fixed contract with the model, not
/// configuration:
///
/// 1. **Convention inversion**: every pixel becomes `1 - p`, flipping the
///    capture convention (ink = 1) to the training convention. A polarity
///    mismatch produces confident wrong answers, never an error.
/// 2. **Reshape** to a row-major 28x28 grid.
/// 3. **Bilinear upsample** to a 32x32 intermediate.
/// 4. **Center crop** back to 28x28 at offset (2, 2), reproducing the
///    spatial centering the training pipeline applied.
///
/// No scalar divisor is applied beyond the inversion; inputs already live in
/// [0, 1] and bilinear interpolation cannot leave that range.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleNormalizer;

impl SampleNormalizer {
    /// Creates a normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Runs the full transform chain on a validated sample.
    pub fn normalize(&self, sample: &RawSample) -> DigitResult<AlignedTensor> {
        let inverted: Vec<f32> = sample.values().iter().map(|&p| 1.0 - p).collect();
        let grid = Array2::from_shape_vec((GRID_SIDE, GRID_SIDE), inverted)?;

        let upsampled = resize_bilinear(&grid, UPSAMPLE_SIDE, UPSAMPLE_SIDE)?;
        let aligned = crop(
            &upsampled,
            CROP_OFFSET,
            CROP_OFFSET,
            GRID_SIDE,
            GRID_SIDE,
        )?;

        Ok(aligned.insert_axis(Axis(2)))
    }
}
