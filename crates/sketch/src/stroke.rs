//! Stroke buffer: raw points of one pen-down path plus its simplification

use tracing::trace;

use crate::simplify::simplify;
use crate::types::Point;

/// One continuous pen-down-to-pen-up path.
///
/// Raw points are deduplicated on append: two consecutive points never share
/// a coordinate. The simplified sequence is derived data. It is either empty
/// (never simplified, or invalidated by an append or eviction) or starts and
/// ends at the current first and last raw points.
#[derive(Debug, Clone, Default)]
pub struct Stroke {
    /// Raw input points, oldest first. Entries before `head` were evicted.
    points: Vec<Point>,
    /// Index of the oldest live point in `points`
    head: usize,
    /// Last computed simplification of the live points
    simplified: Vec<Point>,
}

impl PartialEq for Stroke {
    fn eq(&self, other: &Self) -> bool {
        self.points() == other.points() && self.simplified == other.simplified
    }
}

impl Stroke {
    /// Create an empty stroke
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stroke from its first pen-down point
    pub fn starting_at(point: Point) -> Self {
        Self {
            points: vec![point],
            head: 0,
            simplified: Vec::new(),
        }
    }

    /// Number of raw points
    pub fn len(&self) -> usize {
        self.points.len() - self.head
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw points, oldest first
    pub fn points(&self) -> &[Point] {
        &self.points[self.head..]
    }

    /// Simplified points (empty if not yet computed)
    pub fn simplified(&self) -> &[Point] {
        &self.simplified
    }

    /// Whether a current simplification is available
    pub fn is_simplified(&self) -> bool {
        !self.simplified.is_empty()
    }

    pub fn first(&self) -> Option<&Point> {
        self.points().first()
    }

    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    /// Whether `point` would be dropped as a repeat of the last raw point
    pub fn repeats_last(&self, point: &Point) -> bool {
        self.last().is_some_and(|last| last.same_position(point))
    }

    /// Append a point.
    ///
    /// Returns false (and records nothing) if the point has the same
    /// coordinate as the current last point. Only points that were actually
    /// added count toward a sketch's length cap. Any previous simplification
    /// is invalidated.
    pub fn push(&mut self, point: Point) -> bool {
        if self.repeats_last(&point) {
            trace!("Dropping repeated point ({}, {})", point.x, point.y);
            return false;
        }
        self.points.push(point);
        self.simplified.clear();
        true
    }

    /// Recompute the simplified sequence from the full raw sequence.
    ///
    /// No-op on an empty stroke.
    pub fn simplify(&mut self, tolerance: f64) {
        if self.is_empty() {
            return;
        }
        self.simplified = simplify(self.points(), tolerance);
    }

    /// Remove the oldest raw point.
    ///
    /// A stroke is never emptied this way: with a single point left this
    /// returns `None` and the owner is expected to drop the whole stroke.
    /// Any previous simplification is invalidated.
    ///
    /// Amortized O(1): the buffer is compacted once evicted entries make up
    /// half of it.
    pub fn evict_front(&mut self) -> Option<Point> {
        if self.len() <= 1 {
            return None;
        }
        let point = self.points[self.head];
        self.head += 1;
        if self.head * 2 >= self.points.len() {
            self.points.drain(..self.head);
            self.head = 0;
        }
        self.simplified.clear();
        Some(point)
    }

    /// Points to draw: the simplification when requested and available,
    /// otherwise the raw points
    pub fn render_points(&self, prefer_simplified: bool) -> &[Point] {
        if prefer_simplified && self.is_simplified() {
            &self.simplified
        } else {
            self.points()
        }
    }

    /// Raw x coordinates
    pub fn xs(&self) -> Vec<f64> {
        self.points().iter().map(|p| p.x).collect()
    }

    /// Raw y coordinates
    pub fn ys(&self) -> Vec<f64> {
        self.points().iter().map(|p| p.y).collect()
    }

    /// Raw timestamps
    pub fn times(&self) -> Vec<f64> {
        self.points().iter().map(|p| p.t).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_dedupes_repeated_coordinate() {
        let mut stroke = Stroke::starting_at(Point::new(0.0, 0.0, 0.0));

        assert!(stroke.push(Point::new(5.0, 5.0, 1.0)));
        assert!(!stroke.push(Point::new(5.0, 5.0, 2.0)));
        assert_eq!(stroke.len(), 2);
        // The first timestamp is the one kept
        assert_eq!(stroke.last().unwrap().t, 1.0);
    }

    #[test]
    fn test_push_allows_revisiting_earlier_coordinate() {
        let mut stroke = Stroke::starting_at(Point::new(0.0, 0.0, 0.0));
        assert!(stroke.push(Point::new(1.0, 0.0, 1.0)));
        assert!(stroke.push(Point::new(0.0, 0.0, 2.0)));
        assert_eq!(stroke.len(), 3);
    }

    #[test]
    fn test_simplify_empty_is_noop() {
        let mut stroke = Stroke::new();
        stroke.simplify(1.0);
        assert!(stroke.is_empty());
        assert!(!stroke.is_simplified());
    }

    #[test]
    fn test_simplify_matches_endpoints() {
        let mut stroke = Stroke::starting_at(Point::new(0.0, 0.0, 0.0));
        for i in 1..10 {
            stroke.push(Point::new(i as f64, 0.0, i as f64));
        }
        stroke.simplify(0.5);

        assert_eq!(stroke.simplified().len(), 2);
        assert_eq!(stroke.simplified().first(), stroke.first());
        assert_eq!(stroke.simplified().last(), stroke.last());
    }

    #[test]
    fn test_evict_front_invalidates_simplification() {
        let mut stroke = Stroke::starting_at(Point::new(0.0, 0.0, 0.0));
        stroke.push(Point::new(1.0, 1.0, 1.0));
        stroke.push(Point::new(2.0, 0.0, 2.0));
        stroke.simplify(0.1);
        assert!(stroke.is_simplified());

        let evicted = stroke.evict_front();
        assert_eq!(evicted, Some(Point::new(0.0, 0.0, 0.0)));
        assert_eq!(stroke.len(), 2);
        assert!(!stroke.is_simplified());
        assert_eq!(stroke.times(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_push_invalidates_simplification() {
        let mut stroke = Stroke::starting_at(Point::new(0.0, 0.0, 0.0));
        stroke.push(Point::new(1.0, 0.0, 1.0));
        stroke.simplify(0.5);
        assert!(stroke.is_simplified());

        assert!(stroke.push(Point::new(9.0, 9.0, 2.0)));
        assert!(!stroke.is_simplified());
        assert_eq!(stroke.render_points(true), stroke.points());
        assert_eq!(stroke.render_points(true).last(), Some(&Point::new(9.0, 9.0, 2.0)));
    }

    #[test]
    fn test_repeated_push_keeps_simplification() {
        let mut stroke = Stroke::starting_at(Point::new(0.0, 0.0, 0.0));
        stroke.push(Point::new(1.0, 0.0, 1.0));
        stroke.simplify(0.5);

        assert!(!stroke.push(Point::new(1.0, 0.0, 2.0)));
        assert!(stroke.is_simplified());
        assert_eq!(stroke.simplified().last(), stroke.last());
    }

    #[test]
    fn test_evict_front_repeatedly() {
        let mut stroke = Stroke::starting_at(Point::new(0.0, 0.0, 0.0));
        for i in 1..100usize {
            stroke.push(Point::new(i as f64, 0.0, i as f64));
            if stroke.len() > 5 {
                let evicted = stroke.evict_front().unwrap();
                assert_eq!(evicted.x, (i - 5) as f64);
            }
            assert_eq!(stroke.first().unwrap().x, i.saturating_sub(4) as f64);
            assert_eq!(stroke.last().unwrap().x, i as f64);
        }
        assert_eq!(stroke.xs(), vec![95.0, 96.0, 97.0, 98.0, 99.0]);

        stroke.simplify(0.5);
        assert_eq!(stroke.simplified().len(), 2);
        assert_eq!(stroke.simplified().first(), stroke.first());
    }

    #[test]
    fn test_equality_ignores_evicted_points() {
        let mut evicted = Stroke::starting_at(Point::new(0.0, 0.0, 0.0));
        evicted.push(Point::new(1.0, 0.0, 1.0));
        evicted.push(Point::new(2.0, 0.0, 2.0));
        evicted.push(Point::new(3.0, 0.0, 3.0));
        evicted.evict_front();

        let mut fresh = Stroke::starting_at(Point::new(1.0, 0.0, 1.0));
        fresh.push(Point::new(2.0, 0.0, 2.0));
        fresh.push(Point::new(3.0, 0.0, 3.0));

        assert_eq!(evicted, fresh);
    }

    #[test]
    fn test_evict_front_never_empties() {
        let mut stroke = Stroke::starting_at(Point::new(3.0, 4.0, 0.0));
        assert_eq!(stroke.evict_front(), None);
        assert_eq!(stroke.len(), 1);

        let mut empty = Stroke::new();
        assert_eq!(empty.evict_front(), None);
    }

    #[test]
    fn test_render_points_falls_back_to_raw() {
        let mut stroke = Stroke::starting_at(Point::new(0.0, 0.0, 0.0));
        stroke.push(Point::new(1.0, 0.0, 1.0));
        stroke.push(Point::new(2.0, 0.0, 2.0));

        assert_eq!(stroke.render_points(true).len(), 3);
        stroke.simplify(0.5);
        assert_eq!(stroke.render_points(true).len(), 2);
        assert_eq!(stroke.render_points(false).len(), 3);
    }

    #[test]
    fn test_coordinate_columns() {
        let mut stroke = Stroke::starting_at(Point::new(1.0, 2.0, 10.0));
        stroke.push(Point::new(3.0, 4.0, 20.0));

        assert_eq!(stroke.xs(), vec![1.0, 3.0]);
        assert_eq!(stroke.ys(), vec![2.0, 4.0]);
        assert_eq!(stroke.times(), vec![10.0, 20.0]);
    }
}
