//! High-level digit predictor composing the full pipeline.

use crate::core::errors::{DigitError, DigitResult};
use crate::core::traits::DigitClassifier;
use crate::predictor::decision;
use crate::predictor::decision::Prediction;
use crate::processors::{RawSample, SampleNormalizer};
use rayon::prelude::*;
use std::sync::Arc;

/// Runs the normalize -> classify -> extract pipeline for each request.
///
/// The classifier is shared, read-only state; every call owns its tensors,
/// so concurrent predictions cannot contaminate each other. No stage
/// retries: malformed input and degenerate output are reported immediately,
/// once.
#[derive(Clone)]
pub struct DigitPredictor {
    classifier: Arc<dyn DigitClassifier>,
    normalizer: SampleNormalizer,
}

impl DigitPredictor {
    /// Creates a predictor over a shared classifier.
    pub fn new(classifier: Arc<dyn DigitClassifier>) -> Self {
        Self {
            classifier,
            normalizer: SampleNormalizer::new(),
        }
    }

    /// Classifies a single sample.
    pub fn predict(&self, sample: &RawSample) -> DigitResult<Prediction> {
        if !self.classifier.is_loaded() {
            return Err(DigitError::ModelNotReady);
        }

        let tensor = self.normalizer.normalize(sample)?;
        let scores = self.classifier.forward(&tensor)?;
        decision::extract(&scores)
    }

    /// Classifies a batch of samples in parallel.
    ///
    /// Fails on the first error; samples are independent, so a failure in
    /// one carries no partial results for the others.
    pub fn predict_batch(&self, samples: &[RawSample]) -> DigitResult<Vec<Prediction>> {
        samples
            .par_iter()
            .map(|sample| self.predict(sample))
            .collect()
    }

    /// Name of the underlying model, for logs.
    pub fn model_name(&self) -> &str {
        self.classifier.model_name()
    }
}
