//! HTTP server for digit classification.

use crate::config::ServerConfig;
use axum::{
    Json, Router,
    extract::State,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use sketch_digit::core::DigitClassifier;
use sketch_digit::{DigitError, DigitPredictor, OrtClassifier, RawSample};
use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Application state shared across handlers.
///
/// The predictor slot is write-once: the model loads on a blocking worker
/// task at startup and is published here exactly once. Requests that land
/// before publication are rejected with 503 instead of waiting.
struct AppState {
    predictor: OnceLock<DigitPredictor>,
}

/// Request to classify a drawn digit.
#[derive(Deserialize)]
struct PredictRequest {
    /// Flat 784-value pixel grid, ink = 1 convention.
    image: Option<Vec<f32>>,
}

/// Successful classification response.
#[derive(Serialize)]
struct PredictResponse {
    prediction: usize,
    confidence: f32,
}

/// Structured error payload.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    model_loaded: bool,
}

/// Run the HTTP server.
pub async fn run_server(
    config: ServerConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let state = Arc::new(AppState {
        predictor: OnceLock::new(),
    });

    // Load the model off the async runtime. The server accepts connections
    // immediately; /predict returns 503 until the slot is filled.
    let load_state = Arc::clone(&state);
    let model_path = config.classifier.model.clone();
    tokio::task::spawn_blocking(move || match OrtClassifier::load(&model_path) {
        Ok(classifier) => {
            let model_name = classifier.model_name().to_string();
            if load_state
                .predictor
                .set(DigitPredictor::new(Arc::new(classifier)))
                .is_ok()
            {
                info!(model = %model_name, "model loaded");
            }
        }
        Err(e) => {
            error!(error = %e, path = %model_path.display(), "failed to load model");
        }
    });

    // The drawing surface is served elsewhere; keep CORS open.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/predict", post(predict_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| format!("Invalid address: {e}"))?;

    info!("Server listening on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /health  - Health check");
    info!("  POST /predict - Digit classification");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Health check endpoint.
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model_loaded: state.predictor.get().is_some(),
    })
}

/// Digit classification endpoint.
async fn predict_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();

    let Some(predictor) = state.predictor.get() else {
        warn!(request_id = %request_id, "prediction requested before model finished loading");
        return error_response(StatusCode::SERVICE_UNAVAILABLE, "model not loaded yet");
    };

    let Ok(Json(PredictRequest {
        image: Some(pixels),
    })) = body
    else {
        return error_response(StatusCode::BAD_REQUEST, "missing image data");
    };

    let sample = match RawSample::new(pixels) {
        Ok(sample) => sample,
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "rejected malformed sample");
            return error_response(StatusCode::BAD_REQUEST, &e.to_string());
        }
    };

    let start = Instant::now();

    // The forward pass is compute-bound; run it on a blocking worker so
    // in-flight requests are not serialized behind it.
    let predictor = predictor.clone();
    let result = tokio::task::spawn_blocking(move || predictor.predict(&sample)).await;

    match result {
        Ok(Ok(prediction)) => {
            info!(
                request_id = %request_id,
                digit = prediction.digit,
                confidence = prediction.confidence,
                elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                "prediction completed"
            );
            (
                StatusCode::OK,
                Json(PredictResponse {
                    prediction: prediction.digit,
                    confidence: prediction.confidence,
                }),
            )
                .into_response()
        }
        Ok(Err(e)) => {
            error!(request_id = %request_id, error = %e, "prediction failed");
            error_response(status_for(&e), &e.to_string())
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "prediction task panicked");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "prediction task failed")
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

fn status_for(err: &DigitError) -> StatusCode {
    match err {
        DigitError::ModelNotReady => StatusCode::SERVICE_UNAVAILABLE,
        DigitError::InvalidShape { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown...");
        }
    }
}
