//! Interaction log: per-frame input snapshots, recorded on change

use serde::{Deserialize, Serialize};

use crate::export::InteractionRecord;

/// State of the input surface for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InteractionSnapshot {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Pointer position
    pub x: f64,
    pub y: f64,
    /// Timestamp of the last pointer movement
    pub t: f64,
    /// Whether the pen/button is down
    pub down: bool,
    /// Undo was requested this frame
    pub undo: bool,
    /// Clear was requested this frame
    pub clear: bool,
}

impl InteractionSnapshot {
    /// Whether anything other than the timestamp differs
    fn differs_from(&self, other: &InteractionSnapshot) -> bool {
        self.width != other.width
            || self.height != other.height
            || self.x != other.x
            || self.y != other.y
            || self.down != other.down
            || self.undo != other.undo
            || self.clear != other.clear
    }
}

/// Append-only log of interaction snapshots.
///
/// A frame is recorded only if it differs from the previous entry in some
/// field other than the timestamp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionLog {
    entries: Vec<InteractionSnapshot>,
}

impl InteractionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame's snapshot. Returns true if it was appended.
    pub fn record(&mut self, snapshot: InteractionSnapshot) -> bool {
        if let Some(last) = self.entries.last()
            && !snapshot.differs_from(last)
        {
            return false;
        }
        self.entries.push(snapshot);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[InteractionSnapshot] {
        &self.entries
    }

    /// Export as parallel columns
    pub fn export(&self) -> InteractionRecord {
        let mut record = InteractionRecord::default();
        for entry in &self.entries {
            record.window_width.push(entry.width);
            record.window_height.push(entry.height);
            record.mouse_x.push(entry.x);
            record.mouse_y.push(entry.y);
            record.time.push(entry.t);
            record.mouse_down.push(entry.down);
            record.undo.push(entry.undo);
            record.reset.push(entry.clear);
        }
        record
    }
}
