use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A single recorded input sample
///
/// Laid out as three packed `f64`s so stroke buffers can be handed to a
/// renderer as vertex data without conversion.
#[derive(
    Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable,
)]
#[repr(C)]
pub struct Point {
    /// X position in surface coordinates
    pub x: f64,
    /// Y position in surface coordinates
    pub y: f64,
    /// Timestamp in milliseconds
    pub t: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64, t: f64) -> Self {
        Self { x, y, t }
    }

    /// Position as a vector, dropping the timestamp
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Whether two points share a coordinate (timestamps are ignored)
    pub fn same_position(&self, other: &Point) -> bool {
        self.x == other.x && self.y == other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_position_ignores_time() {
        let a = Point::new(5.0, 5.0, 10.0);
        let b = Point::new(5.0, 5.0, 42.0);
        assert!(a.same_position(&b));
        assert_ne!(a, b);
        assert!(!a.same_position(&Point::new(5.0, 6.0, 10.0)));
    }

    #[test]
    fn test_point_is_packed() {
        assert_eq!(std::mem::size_of::<Point>(), 3 * std::mem::size_of::<f64>());
    }
}
