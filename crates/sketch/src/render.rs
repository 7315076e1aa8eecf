//! Draw requests handed to the external renderer

use crate::types::Point;

/// Which point sequence a draw request carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointSource {
    Raw,
    Simplified,
}

/// One stroke to draw
#[derive(Debug, Clone, Copy)]
pub struct StrokeDraw<'a> {
    pub points: &'a [Point],
    pub source: PointSource,
    /// True for the stroke currently being drawn
    pub active: bool,
}

impl<'a> StrokeDraw<'a> {
    /// Points as raw bytes (`x, y, t` as native-endian `f64`s) for vertex upload
    pub fn vertex_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.points)
    }
}

/// Progress of the sketch's point count toward the configured limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthStatus {
    /// Below the minimum length
    #[default]
    Blocked,
    /// At or above the minimum length
    MinimumReached,
    /// At the maximum length
    MaximumReached,
}

impl LengthStatus {
    /// Classify a total raw point count
    ///
    /// Without a minimum, any non-empty sketch counts as reaching it.
    pub fn from_count(total: usize, min_length: Option<usize>, max_length: Option<usize>) -> Self {
        if max_length.is_some_and(|max| total >= max) {
            return Self::MaximumReached;
        }
        let min = min_length.unwrap_or(1);
        if total >= min {
            Self::MinimumReached
        } else {
            Self::Blocked
        }
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    /// Committed strokes oldest first, then the active stroke if any
    pub strokes: Vec<StrokeDraw<'a>>,
    pub status: LengthStatus,
    /// Raw points across committed and active strokes
    pub total_points: usize,
}
