//! CLI mode for one-shot digit classification.

use crate::config::ClassifierConfig;
use serde::Serialize;
use sketch_digit::{DigitPredictor, OrtClassifier, Prediction, RawSample};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// JSON output emitted by `--output json`.
#[derive(Serialize)]
struct PredictionOutput {
    prediction: usize,
    confidence: f32,
    processing_time_ms: f64,
}

/// Classify a JSON file holding a flat array of 784 pixel intensities.
pub fn classify_pixels(
    path: &Path,
    config: &ClassifierConfig,
    output_format: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let raw = std::fs::read_to_string(path)?;
    let pixels: Vec<f32> = serde_json::from_str(&raw)?;
    let sample = RawSample::new(pixels)?;

    classify_sample(sample, config, output_format)
}

/// Classify an image file, grayscaling it into a capture sample first.
pub fn classify_image(
    path: &Path,
    config: &ClassifierConfig,
    output_format: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let start = Instant::now();
    let sample = RawSample::from_image_path(path)?;
    info!(
        "Loaded and sampled image in {:.2}ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    classify_sample(sample, config, output_format)
}

/// Run one sample through a freshly loaded classifier.
fn classify_sample(
    sample: RawSample,
    config: &ClassifierConfig,
    output_format: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let start = Instant::now();

    info!("Loading classifier model...");
    let classifier = OrtClassifier::load(&config.model)?;
    let init_time = start.elapsed();
    info!(
        "Model loaded in {:.2}ms",
        init_time.as_secs_f64() * 1000.0
    );

    let predictor = DigitPredictor::new(Arc::new(classifier));

    let predict_start = Instant::now();
    let prediction = predictor.predict(&sample)?;
    let processing_time = predict_start.elapsed();
    info!(
        "Classification completed in {:.2}ms",
        processing_time.as_secs_f64() * 1000.0
    );

    output_result(
        &prediction,
        output_format,
        processing_time.as_secs_f64() * 1000.0,
    );
    Ok(())
}

/// Output the classification result in the specified format.
fn output_result(prediction: &Prediction, format: &str, processing_time_ms: f64) {
    match format {
        "json" => {
            let response = PredictionOutput {
                prediction: prediction.digit,
                confidence: prediction.confidence,
                processing_time_ms,
            };
            println!("{}", serde_json::to_string(&response).unwrap());
        }
        _ => {
            println!("\n=== Digit Classification ===");
            println!("Prediction: {}", prediction.digit);
            println!("Confidence: {:.4}", prediction.confidence);
            println!("Processing time: {:.2}ms", processing_time_ms);
        }
    }
}
