//! Trace replay: feed recorded frame samples through a capture session

use sketch::{CaptureSession, FrameSample, SessionEvent};
use sketchpad_config::SketchConfig;
use tracing::{debug, info};

use crate::error::AppError;

/// Totals gathered while replaying a trace
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub frames: usize,
    pub strokes_committed: usize,
    pub undos: usize,
    pub clears: usize,
    pub evictions: usize,
    pub rejected: usize,
}

impl ReplaySummary {
    fn count(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::StrokeCommitted { .. } => self.strokes_committed += 1,
            SessionEvent::StrokeUndone { .. } => self.undos += 1,
            SessionEvent::SketchCleared { .. } => self.clears += 1,
            SessionEvent::Evicted(_) => self.evictions += 1,
            SessionEvent::PointRejected { .. } => self.rejected += 1,
            SessionEvent::SketchStarted { .. } | SessionEvent::StrokeStarted { .. } => {}
        }
    }
}

/// Parse a trace: either one JSON array of samples, or one sample per line.
///
/// Blank lines are skipped in the line-delimited form.
pub fn parse_trace(input: &str) -> Result<Vec<FrameSample>, AppError> {
    if input.trim_start().starts_with('[') {
        return serde_json::from_str(input).map_err(|source| AppError::Trace {
            line: source.line(),
            source,
        });
    }

    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| AppError::Trace {
                line: index + 1,
                source,
            })
        })
        .collect()
}

/// Drive a fresh session with `samples`, in order
pub fn replay(
    config: SketchConfig,
    samples: impl IntoIterator<Item = FrameSample>,
) -> Result<(CaptureSession, ReplaySummary), AppError> {
    let mut session = CaptureSession::new(config)?;
    let mut summary = ReplaySummary::default();

    for sample in samples {
        let frame = session.frame(sample);
        summary.frames += 1;
        for event in &frame.events {
            debug!("Frame {}: {:?}", summary.frames, event);
            summary.count(event);
        }
    }

    info!(
        "Replayed {} frames: {} strokes committed, {} undone, {} clears, {} evictions",
        summary.frames,
        summary.strokes_committed,
        summary.undos,
        summary.clears,
        summary.evictions
    );

    Ok((session, summary))
}
