//! Configuration types for the digit server and CLI.

use std::path::PathBuf;

/// Configuration for the classifier model.
#[derive(Clone)]
pub struct ClassifierConfig {
    pub model: PathBuf,
}

/// Configuration for the HTTP server.
#[derive(Clone)]
pub struct ServerConfig {
    pub classifier: ClassifierConfig,
    pub host: String,
    pub port: u16,
}
