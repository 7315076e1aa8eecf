//! Sketch store: committed strokes, sketch metadata, and length-cap eviction

use std::collections::VecDeque;

use tracing::{debug, trace, warn};

use crate::export::{SketchRecord, StrokeRecord};
use crate::stroke::Stroke;
use crate::types::Point;

/// A single eviction performed while enforcing the length cap
#[derive(Debug, Clone, PartialEq)]
pub enum Eviction {
    /// The oldest committed stroke lost its first point
    Point(Point),
    /// The oldest committed stroke was down to one point and was removed
    Stroke(Stroke),
    /// The active (uncommitted) stroke lost its first point
    ActivePoint(Point),
}

/// A drawing session's committed strokes plus metadata.
///
/// Strokes are ordered oldest first. Undo removes from the tail; cap
/// eviction removes from the head.
#[derive(Debug, Clone, PartialEq)]
pub struct Sketch {
    strokes: VecDeque<Stroke>,
    /// Surface width at the time the sketch started
    width: u32,
    /// Surface height at the time the sketch started
    height: u32,
    /// Timestamp of the first pen-down (None after a clear)
    start_time: Option<f64>,
    /// Raw points across all committed strokes
    point_count: usize,
}

impl Sketch {
    /// Create a sketch at its first pen-down
    pub fn new(width: u32, height: u32, start_time: f64) -> Self {
        Self {
            strokes: VecDeque::new(),
            width,
            height,
            start_time: Some(start_time),
            point_count: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    /// Whether the sketch has a start time (false after a clear)
    pub fn is_started(&self) -> bool {
        self.start_time.is_some()
    }

    /// Committed strokes, oldest first
    pub fn strokes(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes.iter()
    }

    /// Number of committed strokes
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Total raw points across committed strokes
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Append a finished stroke
    pub fn commit(&mut self, stroke: Stroke) {
        debug!(
            "Committing stroke {} ({} points, {} simplified)",
            self.strokes.len(),
            stroke.len(),
            stroke.simplified().len()
        );
        self.point_count += stroke.len();
        self.strokes.push_back(stroke);
    }

    /// Remove the most recent stroke
    ///
    /// Returns the removed stroke, or None if there was nothing to undo
    pub fn undo(&mut self) -> Option<Stroke> {
        let Some(stroke) = self.strokes.pop_back() else {
            debug!("Undo: no strokes to remove");
            return None;
        };
        self.point_count -= stroke.len();
        debug!("Undid stroke {} ({} points)", self.strokes.len(), stroke.len());
        Some(stroke)
    }

    /// Drop all strokes and the start time; dimensions are kept
    pub fn clear(&mut self) {
        debug!("Clearing sketch ({} strokes)", self.strokes.len());
        self.strokes.clear();
        self.point_count = 0;
        self.start_time = None;
    }

    /// Evict oldest points until the sketch fits within `max_length`.
    ///
    /// The budget covers committed strokes plus `active`, the stroke still
    /// being drawn. Eviction is FIFO across the whole sketch: the oldest
    /// committed stroke loses its first point (and is re-simplified with
    /// `tolerance`), or is removed once it is down to one point. The active
    /// stroke is only trimmed when nothing is committed.
    pub fn enforce_cap(
        &mut self,
        max_length: usize,
        tolerance: f64,
        mut active: Option<&mut Stroke>,
    ) -> Vec<Eviction> {
        let mut evictions = Vec::new();

        loop {
            let active_len = active.as_ref().map_or(0, |stroke| stroke.len());
            if self.point_count + active_len <= max_length {
                break;
            }

            if let Some(oldest) = self.strokes.front_mut() {
                if let Some(point) = oldest.evict_front() {
                    oldest.simplify(tolerance);
                    self.point_count -= 1;
                    trace!("Evicted point ({}, {}) from oldest stroke", point.x, point.y);
                    evictions.push(Eviction::Point(point));
                } else if let Some(stroke) = self.strokes.pop_front() {
                    self.point_count -= stroke.len();
                    debug!("Evicted oldest stroke ({} points)", stroke.len());
                    evictions.push(Eviction::Stroke(stroke));
                }
                continue;
            }

            match active.as_deref_mut().and_then(Stroke::evict_front) {
                Some(point) => {
                    trace!("Evicted point ({}, {}) from active stroke", point.x, point.y);
                    evictions.push(Eviction::ActivePoint(point));
                }
                None => {
                    warn!(
                        "Cannot evict below one point (max_length = {}); cap left exceeded",
                        max_length
                    );
                    break;
                }
            }
        }

        evictions
    }

    /// Export committed strokes from their raw points
    pub fn export(&self) -> SketchRecord {
        SketchRecord {
            canvas_width: self.width,
            canvas_height: self.height,
            start_time: self.start_time,
            strokes: self
                .strokes
                .iter()
                .map(|stroke| StrokeRecord(stroke.xs(), stroke.ys(), stroke.times()))
                .collect(),
        }
    }
}
