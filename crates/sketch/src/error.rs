//! Error types for the sketch core.

use sketchpad_config::ConfigError;

/// Errors that can occur while creating a capture session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that can occur while exporting sketch or interaction data.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),
}
