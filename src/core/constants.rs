//! Fixed constants of the preprocessing-and-decision pipeline.
//!
//! These are contracts with the pretrained classifier, not tunables: the
//! model was trained on 28x28 bitmaps that went through a 32x32 resize and a
//! (2, 2) center crop, and it emits one score per digit class.

/// Side length of the input grid captured by the drawing surface.
pub const GRID_SIDE: usize = 28;

/// Number of values in a flattened raw sample (28 * 28).
pub const SAMPLE_LEN: usize = GRID_SIDE * GRID_SIDE;

/// Side length of the intermediate bilinear upsample.
pub const UPSAMPLE_SIDE: usize = 32;

/// Row/column offset of the center crop applied after upsampling.
pub const CROP_OFFSET: usize = 2;

/// Number of digit classes the classifier scores (digits 0-9).
pub const NUM_CLASSES: usize = 10;
