//! Capture configuration selection

use std::path::Path;

use sketchpad_config::SketchConfig;
use tracing::info;

use crate::error::AppError;

/// Path to a JSON configuration file. Takes precedence over `SKETCHPAD_*`.
pub const ENV_CONFIG_PATH: &str = "SKETCHPAD_CONFIG";
/// Enables debug logging when set to anything but `0`/`false`
pub const ENV_DEBUG: &str = "SKETCHPAD_DEBUG";

/// Whether debug logging was requested through the environment
pub fn debug_from_env() -> bool {
    match std::env::var(ENV_DEBUG) {
        Ok(value) => !matches!(value.trim().to_ascii_lowercase().as_str(), "" | "0" | "false"),
        Err(_) => false,
    }
}

/// Load the capture configuration from `SKETCHPAD_CONFIG` if set, otherwise
/// from the individual `SKETCHPAD_*` variables
pub fn load() -> Result<SketchConfig, AppError> {
    match std::env::var(ENV_CONFIG_PATH) {
        Ok(path) => load_file(Path::new(&path)),
        Err(_) => {
            let config = SketchConfig::from_env()?;
            info!("Using configuration from environment: {:?}", config);
            Ok(config)
        }
    }
}

/// Load and validate a JSON configuration file
pub fn load_file(path: &Path) -> Result<SketchConfig, AppError> {
    let json = std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    let config = SketchConfig::from_json_str(&json)?;
    info!("Loaded configuration from {}: {:?}", path.display(), config);
    Ok(config)
}
