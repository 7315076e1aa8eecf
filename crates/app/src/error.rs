//! Errors surfaced by the replay binary

use std::path::PathBuf;

use sketch::{ExportError, SessionError};
use sketchpad_config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Usage: sketchpad <trace.json> [out_dir]")]
    Usage,

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Malformed trace at line {line}: {source}")]
    Trace {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
