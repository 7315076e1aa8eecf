//! Two-stage Ramer-Douglas-Peucker polyline simplification
//!
//! Stage 1 clusters points that sit within `tolerance` of the previously kept
//! point, which is cheap and removes jitter from slow pen movement. Stage 2 is
//! the Douglas-Peucker peak search over the reduced sequence: a range is
//! replaced by its chord unless some interior point deviates from the chord by
//! more than `tolerance`, in which case the range is split at that point.
//!
//! The output is fully deterministic for a given input and tolerance. When two
//! interior points are equally far from a chord, the earlier one is chosen.

use glam::DVec2;

use crate::types::Point;

/// Simplify a point sequence with the given tolerance.
///
/// The result always starts and ends with the first and last input points.
/// Inputs with fewer than three points are returned unchanged, and a
/// tolerance of 0.0 only removes exactly collinear interior points and
/// exact repeats.
///
/// `tolerance` is expected to be finite and non-negative; configuration
/// validation rejects anything else before it reaches this function.
#[must_use = "returns the simplified points"]
pub fn simplify(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let tolerance_sq = tolerance * tolerance;
    let reduced = reduce_vertices(points, tolerance_sq);
    let kept = mark_peaks(&reduced, tolerance_sq);

    reduced
        .into_iter()
        .zip(kept)
        .filter_map(|(point, keep)| keep.then_some(point))
        .collect()
}

/// Stage 1: drop points closer than the tolerance to the last kept point.
///
/// The final input point is always present in the output, appended even if
/// it fell inside the last cluster.
fn reduce_vertices(points: &[Point], tolerance_sq: f64) -> Vec<Point> {
    let mut reduced = Vec::with_capacity(points.len());
    let Some(first) = points.first() else {
        return reduced;
    };
    reduced.push(*first);

    let mut reference = 0;
    for (i, point) in points.iter().enumerate().skip(1) {
        if point.position().distance_squared(points[reference].position()) < tolerance_sq {
            continue;
        }
        reduced.push(*point);
        reference = i;
    }

    let last = points.len() - 1;
    if reference < last {
        reduced.push(points[last]);
    }

    reduced
}

/// Stage 2: mark the vertices that survive Douglas-Peucker.
///
/// Ranges are processed from an explicit stack so that very long strokes
/// cannot exhaust the call stack. Marks are independent of the order ranges
/// are visited in.
fn mark_peaks(vertices: &[Point], tolerance_sq: f64) -> Vec<bool> {
    let n = vertices.len();
    let mut kept = vec![false; n];
    if n == 0 {
        return kept;
    }
    kept[0] = true;
    kept[n - 1] = true;

    let mut ranges = vec![(0, n - 1)];
    while let Some((start, end)) = ranges.pop() {
        if end <= start + 1 {
            continue;
        }

        let (farthest, farthest_sq) = farthest_from_chord(vertices, start, end);
        if farthest_sq > tolerance_sq {
            kept[farthest] = true;
            ranges.push((farthest, end));
            ranges.push((start, farthest));
        }
    }

    kept
}

/// Find the interior vertex of `[start, end]` farthest from the chord.
///
/// Returns `(start, 0.0)` when every interior vertex lies on the chord.
fn farthest_from_chord(vertices: &[Point], start: usize, end: usize) -> (usize, f64) {
    let a = vertices[start].position();
    let b = vertices[end].position();

    let mut farthest = start;
    let mut farthest_sq = 0.0;
    for (i, vertex) in vertices.iter().enumerate().take(end).skip(start + 1) {
        let distance_sq = segment_distance_squared(vertex.position(), a, b);
        // Strictly greater: ties keep the earliest index
        if distance_sq > farthest_sq {
            farthest = i;
            farthest_sq = distance_sq;
        }
    }

    (farthest, farthest_sq)
}

/// Squared distance from `p` to the segment `a -> b`.
///
/// A zero-length segment degrades to the point distance from `a`.
fn segment_distance_squared(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let u = b - a;
    let w = p - a;
    let cu = u.dot(u);
    if cu == 0.0 {
        return p.distance_squared(a);
    }

    let cw = w.dot(u);
    if cw <= 0.0 {
        p.distance_squared(a)
    } else if cw >= cu {
        p.distance_squared(b)
    } else {
        let foot = a + u * (cw / cu);
        p.distance_squared(foot)
    }
}
