//! Capture session: the per-frame driver
//!
//! This module connects:
//! - Input samples (one per frame, from an external input source)
//! - The active stroke buffer (dedupe, append, simplification)
//! - The sketch store (commit, undo, clear, cap enforcement)
//! - The interaction log
//!
//! All mutable capture state lives in [`CaptureSession`], so independent
//! sessions can run side by side. Within a frame the order is fixed: requests
//! (resize, clear, undo), then append, then cap enforcement, then
//! simplification, then size-dependent reads.

mod frame;
mod reset;

use serde::{Deserialize, Serialize};
use sketchpad_config::{SimplifyMode, SketchConfig};

use crate::error::SessionError;
use crate::events::SessionEvent;
use crate::export::{InteractionRecord, SketchRecord};
use crate::interaction::{InteractionLog, InteractionSnapshot};
use crate::render::{LengthStatus, PointSource, RenderRequest, StrokeDraw};
use crate::store::Sketch;
use crate::stroke::Stroke;

/// One frame of input
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameSample {
    /// Drawing surface width in pixels
    pub surface_width: u32,
    /// Drawing surface height in pixels
    pub surface_height: u32,
    /// Pointer position in surface coordinates
    pub x: f64,
    pub y: f64,
    /// Timestamp of the last pointer movement, in milliseconds
    pub timestamp: f64,
    /// Whether the pen/button is down
    pub down: bool,
    /// Undo was requested since the previous frame
    #[serde(default)]
    pub undo: bool,
    /// Clear was requested since the previous frame
    #[serde(default)]
    pub clear: bool,
}

impl FrameSample {
    /// Whether the pen is down strictly inside the surface
    pub fn is_drawing(&self) -> bool {
        self.down
            && self.x > 0.0
            && self.x < self.surface_width as f64
            && self.y > 0.0
            && self.y < self.surface_height as f64
    }

    fn snapshot(&self) -> InteractionSnapshot {
        InteractionSnapshot {
            width: self.surface_width,
            height: self.surface_height,
            x: self.x,
            y: self.y,
            t: self.timestamp,
            down: self.down,
            undo: self.undo,
            clear: self.clear,
        }
    }
}

/// Result of processing one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub events: Vec<SessionEvent>,
    pub status: LengthStatus,
    /// Raw points across committed and active strokes
    pub total_points: usize,
}

/// Capture state for one drawing session
///
/// Feed it one [`FrameSample`] per frame via [`CaptureSession::frame`].
#[derive(Debug, Clone)]
pub struct CaptureSession {
    /// Validated configuration
    pub(crate) config: SketchConfig,
    /// Sketch (None until the first pen-down)
    pub(crate) sketch: Option<Sketch>,
    /// Stroke being drawn (None while the pen is up)
    pub(crate) active: Option<Stroke>,
    /// Recorded interaction snapshots
    pub(crate) interaction: InteractionLog,
    /// Surface dimensions seen on the previous frame
    pub(crate) surface: Option<(u32, u32)>,
}

impl CaptureSession {
    /// Create a session, rejecting invalid configuration
    pub fn new(config: SketchConfig) -> Result<Self, SessionError> {
        config.validate()?;
        Ok(Self {
            config,
            sketch: None,
            active: None,
            interaction: InteractionLog::new(),
            surface: None,
        })
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    /// The sketch, once drawing has started
    pub fn sketch(&self) -> Option<&Sketch> {
        self.sketch.as_ref()
    }

    /// The stroke currently being drawn
    pub fn active_stroke(&self) -> Option<&Stroke> {
        self.active.as_ref()
    }

    pub fn interaction_log(&self) -> &InteractionLog {
        &self.interaction
    }

    /// Whether the sketch has started (first pen-down since the last clear)
    pub fn has_started(&self) -> bool {
        self.sketch.as_ref().is_some_and(Sketch::is_started)
    }

    /// Whether a stroke is in progress
    pub fn is_stroking(&self) -> bool {
        self.active.is_some()
    }

    /// Raw points across committed strokes and the active stroke
    pub fn total_points(&self) -> usize {
        let committed = self.sketch.as_ref().map_or(0, Sketch::point_count);
        let active = self.active.as_ref().map_or(0, Stroke::len);
        committed + active
    }

    /// Length indicator for the current point count
    pub fn length_status(&self) -> LengthStatus {
        LengthStatus::from_count(
            self.total_points(),
            self.config.min_length,
            self.config.max_length,
        )
    }

    /// Strokes to draw this frame, with the point source chosen by the
    /// simplification mode
    pub fn render_request(&self) -> RenderRequest<'_> {
        let mode = self.config.simplify_mode;
        let mut strokes = Vec::new();

        if let Some(sketch) = &self.sketch {
            for stroke in sketch.strokes() {
                strokes.push(draw(stroke, mode.renders_simplified(), false));
            }
        }
        if let Some(stroke) = &self.active {
            strokes.push(draw(stroke, mode == SimplifyMode::RealTime, true));
        }

        RenderRequest {
            strokes,
            status: self.length_status(),
            total_points: self.total_points(),
        }
    }

    /// Export the sketch (None before the first pen-down)
    pub fn export_sketch(&self) -> Option<SketchRecord> {
        self.sketch.as_ref().map(Sketch::export)
    }

    /// Export the interaction log
    pub fn export_interaction(&self) -> InteractionRecord {
        self.interaction.export()
    }
}

fn draw(stroke: &Stroke, prefer_simplified: bool, active: bool) -> StrokeDraw<'_> {
    let source = if prefer_simplified && stroke.is_simplified() {
        PointSource::Simplified
    } else {
        PointSource::Raw
    };
    StrokeDraw {
        points: stroke.render_points(prefer_simplified),
        source,
        active,
    }
}
