//! Events emitted by a capture session.

use crate::store::Eviction;
use crate::types::Point;

/// Why a sketch was cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearReason {
    /// A reset was requested through the input sample
    Requested,
    /// The surface changed size, invalidating recorded coordinates
    Resize,
}

/// Events emitted while processing frames.
///
/// These let hosts react to sketch changes (status displays, autosave,
/// telemetry) without inspecting session state every frame.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The first pen-down of a sketch
    SketchStarted {
        width: u32,
        height: u32,
        start_time: f64,
    },
    /// A new stroke began at `point`
    StrokeStarted { point: Point },
    /// The active stroke was committed to the sketch
    StrokeCommitted { points: usize, simplified: usize },
    /// The most recent committed stroke was removed
    StrokeUndone { points: usize },
    /// All strokes were dropped
    SketchCleared { reason: ClearReason },
    /// Cap enforcement removed data from the sketch
    Evicted(Eviction),
    /// A point was refused because the sketch is at its cap
    PointRejected { point: Point },
}
