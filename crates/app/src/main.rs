//! Sketchpad - replay a recorded input trace through the capture core
//!
//! Reads a trace of per-frame input samples, runs it through a capture
//! session and writes the resulting sketch and interaction log as JSON.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use sketch::ExportJson;
use tracing::{error, info, warn};

mod config;
mod error;
mod logging;
mod replay;

use error::AppError;

fn main() -> ExitCode {
    logging::init(config::debug_from_env());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let mut args = std::env::args_os().skip(1);
    let trace_path = PathBuf::from(args.next().ok_or(AppError::Usage)?);
    let out_dir = args.next().map_or_else(|| PathBuf::from("."), PathBuf::from);

    let config = config::load()?;
    info!(
        "Replaying {} (mode {:?}, tolerance {})",
        trace_path.display(),
        config.simplify_mode,
        config.tolerance
    );

    let input = std::fs::read_to_string(&trace_path).map_err(|e| AppError::io(&trace_path, e))?;
    let samples = replay::parse_trace(&input)?;
    let (session, summary) = replay::replay(config, samples)?;

    if summary.rejected > 0 {
        warn!("{} points rejected at the length cap", summary.rejected);
    }

    std::fs::create_dir_all(&out_dir).map_err(|e| AppError::io(&out_dir, e))?;

    match session.export_sketch() {
        Some(record) => write_json(&out_dir.join("sketch.json"), &record.to_json_pretty()?)?,
        None => warn!("No pen-down in trace; sketch.json not written"),
    }
    write_json(
        &out_dir.join("interaction.json"),
        &session.export_interaction().to_json_pretty()?,
    )?;

    info!(
        "Done: {} points in {} strokes, status {:?}",
        session.total_points(),
        session.sketch().map_or(0, |s| s.len()),
        session.length_status()
    );
    Ok(())
}

fn write_json(path: &Path, json: &str) -> Result<(), AppError> {
    std::fs::write(path, json).map_err(|e| AppError::io(path, e))?;
    info!("Wrote {}", path.display());
    Ok(())
}
