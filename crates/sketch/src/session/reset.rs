//! Undo, clear, and resize handling for the capture session

use tracing::debug;

use crate::events::{ClearReason, SessionEvent};
use crate::store::Sketch;

use super::{CaptureSession, FrameSample};

impl CaptureSession {
    /// Clear the sketch if the surface changed size since the last frame
    pub(crate) fn check_resize(&mut self, sample: &FrameSample, events: &mut Vec<SessionEvent>) {
        let dims = (sample.surface_width, sample.surface_height);
        let previous = self.surface.replace(dims);

        let resized = previous.is_some_and(|prev| prev != dims);
        if resized && self.config.clear_on_resize && self.has_started() {
            debug!("Surface resized to {}x{}, clearing sketch", dims.0, dims.1);
            self.clear(ClearReason::Resize, events);
        }
    }

    /// Drop all strokes, including the one being drawn
    pub(crate) fn clear(&mut self, reason: ClearReason, events: &mut Vec<SessionEvent>) {
        self.active = None;
        if let Some(sketch) = self.sketch.as_mut() {
            sketch.clear();
        }
        events.push(SessionEvent::SketchCleared { reason });
    }

    /// Remove the most recent committed stroke, if the sketch has started
    pub(crate) fn undo(&mut self, events: &mut Vec<SessionEvent>) {
        if !self.has_started() {
            debug!("Undo ignored: sketch not started");
            return;
        }
        if let Some(stroke) = self.sketch.as_mut().and_then(Sketch::undo) {
            events.push(SessionEvent::StrokeUndone {
                points: stroke.len(),
            });
        }
    }
}
