//! Per-frame pen handling for the capture session

use sketchpad_config::{CapPolicy, SimplifyMode};
use tracing::{debug, trace, warn};

use crate::events::{ClearReason, SessionEvent};
use crate::store::Sketch;
use crate::stroke::Stroke;
use crate::types::Point;

use super::{CaptureSession, Frame, FrameSample};

impl CaptureSession {
    /// Process one frame of input.
    ///
    /// Pending requests in the sample are applied first (resize, clear,
    /// undo). A pen-down sample inside the surface then extends or starts the
    /// active stroke; anything else ends it. Finally the frame's snapshot is
    /// added to the interaction log if it changed.
    pub fn frame(&mut self, sample: FrameSample) -> Frame {
        let mut events = Vec::new();

        self.check_resize(&sample, &mut events);
        if sample.clear {
            self.clear(ClearReason::Requested, &mut events);
        }
        if sample.undo {
            self.undo(&mut events);
        }

        if sample.is_drawing() {
            self.pen_down(&sample, &mut events);
        } else {
            self.pen_up(&mut events);
        }

        self.interaction.record(sample.snapshot());

        Frame {
            events,
            status: self.length_status(),
            total_points: self.total_points(),
        }
    }

    /// Pen is touching the surface
    fn pen_down(&mut self, sample: &FrameSample, events: &mut Vec<SessionEvent>) {
        let point = Point::new(sample.x, sample.y, sample.timestamp);

        if !self.has_started() {
            debug!(
                "Starting sketch {}x{} at t={}",
                sample.surface_width, sample.surface_height, sample.timestamp
            );
            self.sketch = Some(Sketch::new(
                sample.surface_width,
                sample.surface_height,
                sample.timestamp,
            ));
            events.push(SessionEvent::SketchStarted {
                width: sample.surface_width,
                height: sample.surface_height,
                start_time: sample.timestamp,
            });
        }

        if self
            .active
            .as_ref()
            .is_some_and(|stroke| stroke.repeats_last(&point))
        {
            return;
        }

        if !self.admit(point, events) {
            return;
        }

        if let Some(stroke) = self.active.as_mut() {
            stroke.push(point);
            trace!("Added point ({}, {}) to active stroke", point.x, point.y);
        } else {
            debug!("Starting stroke at ({}, {})", point.x, point.y);
            self.active = Some(Stroke::starting_at(point));
            events.push(SessionEvent::StrokeStarted { point });
        }

        self.after_append(events);
    }

    /// Check a new point against the cap when new points are refused at the cap
    fn admit(&self, point: Point, events: &mut Vec<SessionEvent>) -> bool {
        if self.config.cap_policy != CapPolicy::RejectNew {
            return true;
        }
        match self.config.max_length {
            Some(max) if self.total_points() >= max => {
                trace!("Rejecting point ({}, {}): sketch at cap", point.x, point.y);
                events.push(SessionEvent::PointRejected { point });
                false
            }
            _ => true,
        }
    }

    /// Cap enforcement, then real-time simplification of the active stroke
    fn after_append(&mut self, events: &mut Vec<SessionEvent>) {
        let tolerance = self.config.tolerance;

        if self.config.cap_policy == CapPolicy::EvictOldest
            && let (Some(max), Some(sketch)) = (self.config.max_length, self.sketch.as_mut())
        {
            let evictions = sketch.enforce_cap(max, tolerance, self.active.as_mut());
            events.extend(evictions.into_iter().map(SessionEvent::Evicted));
        }

        if self.config.simplify_mode == SimplifyMode::RealTime
            && let Some(stroke) = self.active.as_mut()
        {
            stroke.simplify(tolerance);
        }
    }

    /// Pen is lifted or outside the surface: commit the active stroke
    fn pen_up(&mut self, events: &mut Vec<SessionEvent>) {
        let Some(mut stroke) = self.active.take() else {
            return;
        };

        if self.config.simplify_mode == SimplifyMode::StrokeEnd {
            stroke.simplify(self.config.tolerance);
        }

        let points = stroke.len();
        let simplified = stroke.simplified().len();
        match self.sketch.as_mut() {
            Some(sketch) => {
                sketch.commit(stroke);
                events.push(SessionEvent::StrokeCommitted { points, simplified });
            }
            None => warn!("Dropping stroke of {} points: no sketch to commit to", points),
        }
    }
}
