//! Raw sample capture type.

use crate::core::constants::{GRID_SIDE, SAMPLE_LEN};
use crate::core::errors::DigitResult;
use crate::core::validation::{validate_finite, validate_length};
use image::DynamicImage;
use image::imageops::FilterType;
use std::path::Path;

/// Luma weights used by the drawing surface when it flattens RGB captures
/// to grayscale. Kept identical here so the CLI image path and the HTTP
/// pixel path produce the same samples.
const LUMA_WEIGHTS: [f32; 3] = [0.30, 0.59, 0.11];

/// A flat 784-value intensity grid as captured from the drawing surface.
///
/// Row-major 28x28, with the capture convention `1.0 = drawn ink`,
/// `0.0 = background`. Immutable once constructed: validation happens at
/// the boundary, so downstream stages can assume a well-formed grid.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSample {
    values: Vec<f32>,
}

impl RawSample {
    /// Validates and wraps a flat pixel grid.
    ///
    /// The sequence must contain exactly 784 finite values. Finite values
    /// outside [0, 1] are clamped into range; non-finite values and wrong
    /// lengths are rejected with `InvalidShape`.
    pub fn new(values: Vec<f32>) -> DigitResult<Self> {
        validate_length(values.len(), SAMPLE_LEN, "raw sample")?;
        validate_finite(&values, "raw sample")?;

        let values = values.into_iter().map(|p| p.clamp(0.0, 1.0)).collect();
        Ok(Self { values })
    }

    /// Decodes an image file and builds a sample from it.
    ///
    /// Decode failures surface as `ImageLoad`.
    pub fn from_image_path(path: impl AsRef<Path>) -> DigitResult<Self> {
        let img = image::open(path)?;
        Self::from_image(&img)
    }

    /// Builds a sample from a decoded image.
    ///
    /// The image is resized to the 28x28 capture grid, flattened to
    /// grayscale with the capture surface's luma weights, scaled to [0, 1],
    /// and flipped from brightness (white background = 1) to the ink = 1
    /// capture convention.
    pub fn from_image(img: &DynamicImage) -> DigitResult<Self> {
        let resized = img
            .resize_exact(GRID_SIDE as u32, GRID_SIDE as u32, FilterType::Triangle)
            .to_rgb8();

        let mut values = Vec::with_capacity(SAMPLE_LEN);
        for pixel in resized.pixels() {
            let brightness = (pixel[0] as f32 * LUMA_WEIGHTS[0]
                + pixel[1] as f32 * LUMA_WEIGHTS[1]
                + pixel[2] as f32 * LUMA_WEIGHTS[2])
                / 255.0;
            values.push(1.0 - brightness);
        }

        Self::new(values)
    }

    /// The pixel values in row-major order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_accepts_exact_length() {
        let sample = RawSample::new(vec![0.0; SAMPLE_LEN]).unwrap();
        assert_eq!(sample.values().len(), SAMPLE_LEN);
    }

    #[test]
    fn test_rejects_short_and_long_inputs() {
        assert!(RawSample::new(vec![0.0; 783]).is_err());
        assert!(RawSample::new(vec![0.0; 785]).is_err());
        assert!(RawSample::new(Vec::new()).is_err());
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let mut values = vec![0.5; SAMPLE_LEN];
        values[100] = f32::NAN;
        assert!(RawSample::new(values).is_err());

        let mut values = vec![0.5; SAMPLE_LEN];
        values[0] = f32::INFINITY;
        assert!(RawSample::new(values).is_err());
    }

    #[test]
    fn test_clamps_out_of_range_values() {
        let mut values = vec![0.5; SAMPLE_LEN];
        values[0] = -0.25;
        values[1] = 1.75;
        let sample = RawSample::new(values).unwrap();
        assert_eq!(sample.values()[0], 0.0);
        assert_eq!(sample.values()[1], 1.0);
    }

    #[test]
    fn test_from_image_white_background_is_zero_ink() {
        let mut img = RgbImage::new(28, 28);
        for pixel in img.pixels_mut() {
            *pixel = Rgb([255, 255, 255]);
        }
        let sample = RawSample::from_image(&DynamicImage::ImageRgb8(img)).unwrap();
        for &v in sample.values() {
            assert!(v.abs() < 1e-5, "white pixel should carry no ink, got {v}");
        }
    }

    #[test]
    fn test_from_image_black_ink_is_one() {
        let img = RgbImage::new(28, 28);
        let sample = RawSample::from_image(&DynamicImage::ImageRgb8(img)).unwrap();
        for &v in sample.values() {
            assert!((v - 1.0).abs() < 1e-5, "black pixel should be full ink, got {v}");
        }
    }

    #[test]
    fn test_from_image_path_surfaces_decode_failures() {
        let err = RawSample::from_image_path("definitely/not/a/real/file.png").unwrap_err();
        assert!(matches!(err, crate::core::DigitError::ImageLoad(_)));
    }
}
