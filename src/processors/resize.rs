//! Grid resampling primitives.
//!
//! Bilinear interpolation and cropping over single-channel float grids.
//! Source coordinates are mapped as `dst_index * (src_size / dst_size)` and
//! edge pixels clamp to the nearest valid input coordinate: no wraparound,
//! no extrapolation beyond the input extent. Interpolating values in [0, 1]
//! therefore cannot leave that range.

use crate::core::errors::{DigitError, DigitResult};
use ndarray::{Array2, s};

/// Bilinear-resamples `src` to `dst_h` x `dst_w`.
///
/// Each output pixel is the inverse-distance-weighted average of the four
/// nearest input pixels along each axis. Deterministic: identical input
/// yields bit-identical output.
pub fn resize_bilinear(src: &Array2<f32>, dst_h: usize, dst_w: usize) -> DigitResult<Array2<f32>> {
    let (src_h, src_w) = src.dim();
    if src_h == 0 || src_w == 0 {
        return Err(DigitError::invalid_shape("cannot resample an empty grid"));
    }
    if dst_h == 0 || dst_w == 0 {
        return Err(DigitError::invalid_shape(
            "target grid dimensions must be non-zero",
        ));
    }

    let scale_y = src_h as f32 / dst_h as f32;
    let scale_x = src_w as f32 / dst_w as f32;

    let mut dst = Array2::<f32>::zeros((dst_h, dst_w));
    for oy in 0..dst_h {
        let sy = oy as f32 * scale_y;
        let y0 = (sy.floor() as usize).min(src_h - 1);
        let y1 = (y0 + 1).min(src_h - 1);
        let dy = sy - y0 as f32;

        for ox in 0..dst_w {
            let sx = ox as f32 * scale_x;
            let x0 = (sx.floor() as usize).min(src_w - 1);
            let x1 = (x0 + 1).min(src_w - 1);
            let dx = sx - x0 as f32;

            let top = src[[y0, x0]] * (1.0 - dx) + src[[y0, x1]] * dx;
            let bottom = src[[y1, x0]] * (1.0 - dx) + src[[y1, x1]] * dx;
            dst[[oy, ox]] = top * (1.0 - dy) + bottom * dy;
        }
    }

    Ok(dst)
}

/// Extracts a `height` x `width` sub-grid starting at (`top`, `left`).
pub fn crop(
    src: &Array2<f32>,
    top: usize,
    left: usize,
    height: usize,
    width: usize,
) -> DigitResult<Array2<f32>> {
    let (src_h, src_w) = src.dim();
    if height == 0 || width == 0 {
        return Err(DigitError::invalid_shape("crop dimensions must be non-zero"));
    }
    if top + height > src_h || left + width > src_w {
        return Err(DigitError::invalid_shape(format!(
            "crop {height}x{width} at ({top}, {left}) exceeds {src_h}x{src_w} grid"
        )));
    }

    Ok(src
        .slice(s![top..top + height, left..left + width])
        .to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_identity_resize_preserves_values() {
        let src = array![[0.0, 0.25], [0.5, 1.0]];
        let dst = resize_bilinear(&src, 2, 2).unwrap();
        assert_eq!(src, dst);
    }

    #[test]
    fn test_constant_grid_stays_constant() {
        let src = Array2::from_elem((28, 28), 0.75f32);
        let dst = resize_bilinear(&src, 32, 32).unwrap();
        for &v in dst.iter() {
            assert!((v - 0.75).abs() < 1e-6);
        }
    }

    #[test]
    fn test_upsample_interpolates_with_edge_clamp() {
        // 1D gradient along x: source row [0, 1] doubled to width 4.
        // Source coords 0.0, 0.5, 1.0, 1.5; the last clamps to the edge.
        let src = array![[0.0, 1.0], [0.0, 1.0]];
        let dst = resize_bilinear(&src, 2, 4).unwrap();
        let expected = [0.0, 0.5, 1.0, 1.0];
        for (ox, &e) in expected.iter().enumerate() {
            assert!(
                (dst[[0, ox]] - e).abs() < 1e-6,
                "column {ox}: expected {e}, got {}",
                dst[[0, ox]]
            );
        }
    }

    #[test]
    fn test_resize_stays_within_input_range() {
        let mut src = Array2::<f32>::zeros((28, 28));
        for (i, v) in src.iter_mut().enumerate() {
            *v = (i % 7) as f32 / 6.0;
        }
        let dst = resize_bilinear(&src, 32, 32).unwrap();
        for &v in dst.iter() {
            assert!((0.0..=1.0).contains(&v), "value {v} escaped [0, 1]");
        }
    }

    #[test]
    fn test_resize_is_deterministic() {
        let mut src = Array2::<f32>::zeros((28, 28));
        for (i, v) in src.iter_mut().enumerate() {
            *v = ((i * 31) % 100) as f32 / 100.0;
        }
        let a = resize_bilinear(&src, 32, 32).unwrap();
        let b = resize_bilinear(&src, 32, 32).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_crop_extracts_expected_region() {
        let mut src = Array2::<f32>::zeros((4, 4));
        src[[2, 2]] = 1.0;
        let out = crop(&src, 2, 2, 2, 2).unwrap();
        assert_eq!(out[[0, 0]], 1.0);
        assert_eq!(out.dim(), (2, 2));
    }

    #[test]
    fn test_crop_out_of_bounds_is_rejected() {
        let src = Array2::<f32>::zeros((32, 32));
        assert!(crop(&src, 2, 2, 28, 28).is_ok());
        assert!(crop(&src, 5, 5, 28, 28).is_err());
        assert!(crop(&src, 0, 0, 33, 28).is_err());
        assert!(crop(&src, 0, 0, 0, 28).is_err());
    }

    #[test]
    fn test_empty_grid_is_rejected() {
        let src = Array2::<f32>::zeros((0, 28));
        assert!(resize_bilinear(&src, 32, 32).is_err());
        let src = Array2::<f32>::zeros((28, 28));
        assert!(resize_bilinear(&src, 0, 32).is_err());
    }
}
