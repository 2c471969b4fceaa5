//! ONNX Runtime adapter for the digit classifier.
//!
//! Wraps an `ort` session behind the [`DigitClassifier`] capability. The
//! adapter owns a small pool of sessions selected round-robin so concurrent
//! requests are not serialized on a single session lock beyond what the
//! runtime itself requires.

use crate::core::constants::{GRID_SIDE, NUM_CLASSES};
use crate::core::errors::{DigitError, DigitResult};
use crate::core::traits::DigitClassifier;
use crate::processors::AlignedTensor;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::TensorRef;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Default number of pooled sessions.
const DEFAULT_SESSION_POOL_SIZE: usize = 2;

/// Digit classifier backed by an ONNX Runtime session pool.
pub struct OrtClassifier {
    sessions: Vec<Mutex<Session>>,
    next_idx: AtomicUsize,
    input_name: String,
    output_name: String,
    model_name: String,
    model_path: PathBuf,
}

impl OrtClassifier {
    /// Loads the model with the default session pool size.
    pub fn load(model_path: impl AsRef<Path>) -> DigitResult<Self> {
        Self::load_with_pool(model_path, DEFAULT_SESSION_POOL_SIZE)
    }

    /// Loads the model, creating `pool_size` sessions over the same file.
    pub fn load_with_pool(model_path: impl AsRef<Path>, pool_size: usize) -> DigitResult<Self> {
        let model_path = model_path.as_ref();
        if pool_size == 0 {
            return Err(DigitError::config("session pool size must be at least 1"));
        }
        if !model_path.exists() {
            return Err(DigitError::config(format!(
                "model file not found: {}",
                model_path.display()
            )));
        }

        let model_name = model_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "digit-classifier".to_string());

        let mut sessions = Vec::with_capacity(pool_size);
        for _ in 0..pool_size {
            let session = Session::builder()?
                .with_optimization_level(GraphOptimizationLevel::Level3)?
                .with_intra_threads(1)?
                .commit_from_file(model_path)?;
            sessions.push(Mutex::new(session));
        }

        let (input_name, output_name) = {
            let session = sessions[0].lock().map_err(|_| {
                DigitError::config("failed to acquire session lock during model load")
            })?;
            let input_name = session
                .inputs
                .first()
                .map(|i| i.name.clone())
                .ok_or_else(|| {
                    DigitError::config("model declares no inputs - file may be invalid or corrupted")
                })?;
            let output_name = session
                .outputs
                .first()
                .map(|o| o.name.clone())
                .ok_or_else(|| {
                    DigitError::config(
                        "model declares no outputs - file may be invalid or corrupted",
                    )
                })?;
            (input_name, output_name)
        };

        debug!(
            model = %model_name,
            input = %input_name,
            output = %output_name,
            pool_size,
            "ONNX session pool ready"
        );

        Ok(Self {
            sessions,
            next_idx: AtomicUsize::new(0),
            input_name,
            output_name,
            model_name,
            model_path: model_path.to_path_buf(),
        })
    }

    /// Returns the model path this classifier was loaded from.
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl DigitClassifier for OrtClassifier {
    fn forward(&self, tensor: &AlignedTensor) -> DigitResult<Vec<f32>> {
        let (h, w, c) = tensor.dim();
        if (h, w, c) != (GRID_SIDE, GRID_SIDE, 1) {
            return Err(DigitError::invalid_shape(format!(
                "aligned tensor must be {GRID_SIDE}x{GRID_SIDE}x1, got {h}x{w}x{c}"
            )));
        }

        // NHWC with a leading batch dimension of 1, matching the layout the
        // model was exported with.
        let input_dims: Vec<i64> = vec![1, h as i64, w as i64, c as i64];
        let input_data = tensor.as_slice().ok_or_else(|| {
            DigitError::invalid_shape("aligned tensor is not contiguous in memory")
        })?;

        let idx = self.next_idx.fetch_add(1, Ordering::Relaxed) % self.sessions.len();
        let mut session = self.sessions[idx].lock().map_err(|_| {
            DigitError::config(format!(
                "model '{}': failed to acquire session lock for session {}/{}",
                self.model_name,
                idx,
                self.sessions.len()
            ))
        })?;

        let input_tensor = TensorRef::from_array_view((input_dims, input_data))
            .map_err(|e| DigitError::inference(&self.model_name, "tensor conversion", e))?;

        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input_tensor])
            .map_err(|e| DigitError::inference(&self.model_name, "forward pass", e))?;

        let (output_shape, output_data) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| {
                DigitError::inference(
                    &self.model_name,
                    format!("extracting output tensor '{}' as f32", self.output_name),
                    e,
                )
            })?;

        // Expect [1, 10] (or [10] from models exported without the batch
        // axis); anything else is handed to the decision extractor, which
        // rejects score vectors that are not exactly NUM_CLASSES long.
        let total: i64 = output_shape.iter().product();
        if total != NUM_CLASSES as i64 {
            return Err(DigitError::malformed_output(format!(
                "model '{}' returned output shape {:?}, expected {} scores",
                self.model_name,
                output_shape.iter().copied().collect::<Vec<i64>>(),
                NUM_CLASSES
            )));
        }

        Ok(output_data.to_vec())
    }

    fn is_loaded(&self) -> bool {
        !self.sessions.is_empty()
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

impl std::fmt::Debug for OrtClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrtClassifier")
            .field("model_name", &self.model_name)
            .field("model_path", &self.model_path)
            .field("sessions", &self.sessions.len())
            .finish()
    }
}
