//! sketch-digit Server and CLI
//!
//! A cross-platform binary for digit classification via CLI or HTTP server.
//!
//! # Usage
//!
//! ## CLI Mode
//! ```bash
//! sketch-digit-server predict --pixels sample.json --model models/digits.onnx
//! sketch-digit-server predict --image digit.png --model models/digits.onnx
//! ```
//!
//! ## Server Mode
//! ```bash
//! sketch-digit-server serve --model models/digits.onnx --port 5000
//! ```

mod cli;
mod config;
mod server;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "sketch-digit-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Hand-drawn digit classification via CLI or HTTP server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single stored sample via CLI
    Predict {
        /// JSON file holding a flat array of 784 pixel intensities in [0,1]
        #[arg(long, conflicts_with = "image")]
        pixels: Option<PathBuf>,

        /// Image file to grayscale and classify
        #[arg(long, conflicts_with = "pixels")]
        image: Option<PathBuf>,

        /// Path to the digit classifier model
        #[arg(long, env = "SKETCH_DIGIT_MODEL")]
        model: PathBuf,

        /// Output format (json, pretty)
        #[arg(long, default_value = "pretty")]
        output: String,
    },
    /// Start the HTTP server
    Serve {
        /// Path to the digit classifier model
        #[arg(long, env = "SKETCH_DIGIT_MODEL")]
        model: PathBuf,

        /// Port to listen on
        #[arg(long, short, default_value = "5000", env = "SKETCH_DIGIT_PORT")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0", env = "SKETCH_DIGIT_HOST")]
        host: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    sketch_digit::utils::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Predict {
            pixels,
            image,
            model,
            output,
        } => {
            let config = config::ClassifierConfig { model };

            if let Some(pixels) = pixels {
                info!("Classifying pixel file: {}", pixels.display());
                cli::classify_pixels(&pixels, &config, &output)?;
            } else if let Some(image) = image {
                info!("Classifying image file: {}", image.display());
                cli::classify_image(&image, &config, &output)?;
            } else {
                eprintln!("Error: Either --pixels or --image must be provided");
                std::process::exit(1);
            }
        }
        Commands::Serve { model, port, host } => {
            let config = config::ServerConfig {
                classifier: config::ClassifierConfig { model },
                host,
                port,
            };

            info!("Starting server on {}:{}", config.host, config.port);
            server::run_server(config).await?;
        }
    }

    Ok(())
}
