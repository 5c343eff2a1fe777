//! Point sequences and shared geometry utilities.

use kurbo::{BezPath, PathEl, Point, Vec2};

use crate::error::{RacingLineError, Result};

/// Lengths below this are treated as zero.
pub(crate) const LENGTH_EPSILON: f64 = 1e-9;

/// Whether the last point of a sequence connects back to the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Open,
    Closed,
}

/// An ordered run of points, either a path or a loop.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSequence {
    points: Vec<Point>,
    topology: Topology,
}

impl PointSequence {
    pub fn new(points: Vec<Point>, topology: Topology) -> Self {
        Self { points, topology }
    }

    /// A closed loop (last point joins the first).
    pub fn closed(points: Vec<Point>) -> Self {
        Self::new(points, Topology::Closed)
    }

    pub fn open(points: Vec<Point>) -> Self {
        Self::new(points, Topology::Open)
    }

    /// Closed loop from `(x, y)` tuples, the shape boundary detectors hand back.
    pub fn closed_from_tuples(points: &[(f64, f64)]) -> Self {
        Self::closed(points.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn is_closed(&self) -> bool {
        self.topology == Topology::Closed
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fail with `DegenerateInput` unless there are at least `required` points.
    pub fn require(&self, required: usize) -> Result<()> {
        if self.points.len() < required {
            return Err(RacingLineError::degenerate(required, self.points.len()));
        }
        Ok(())
    }

    /// Fail with `InvalidArgument` if any coordinate is NaN or infinite.
    pub fn require_finite(&self) -> Result<()> {
        match self
            .points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            Some(i) => Err(RacingLineError::invalid(format!(
                "point {i} has a non-finite coordinate"
            ))),
            None => Ok(()),
        }
    }

    /// Indices of the previous and next point: wrapping for loops, clamped
    /// to the endpoint for paths.
    pub fn neighbors(&self, i: usize) -> (usize, usize) {
        let n = self.points.len();
        match self.topology {
            Topology::Closed => ((i + n - 1) % n, (i + 1) % n),
            Topology::Open => (i.saturating_sub(1), (i + 1).min(n - 1)),
        }
    }

    /// Total length of all segments, including the closing one for loops.
    pub fn perimeter(&self) -> f64 {
        segment_lengths(&self.points, self.is_closed()).iter().sum()
    }

    /// Shoelace area. Positive = counter-clockwise in a y-up frame
    /// (clockwise on screen, where y grows downward).
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }

    /// Polyline path for renderers that overlay the line on an image.
    pub fn to_bezpath(&self) -> BezPath {
        let mut path = BezPath::new();
        if let Some(&first) = self.points.first() {
            path.move_to(first);
            for &p in &self.points[1..] {
                path.line_to(p);
            }
            if self.is_closed() {
                path.push(PathEl::ClosePath);
            }
        }
        path
    }
}

/// Consecutive segment lengths. For closed input the last entry is the
/// closing segment back to the first point.
pub(crate) fn segment_lengths(points: &[Point], closed: bool) -> Vec<f64> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }
    let count = if closed { n } else { n - 1 };
    (0..count)
        .map(|i| points[i].distance(points[(i + 1) % n]))
        .collect()
}

/// Signed area via the shoelace formula over the implicit closed polygon.
pub(crate) fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        / 2.0
}

/// Distance from `p` to the infinite line through `a` and `b`.
///
/// When `a` and `b` coincide the chord has no direction, so this falls
/// back to the plain distance from `p` to `a`.
pub(crate) fn perpendicular_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let ap = p - a;
    let len = ab.hypot();
    if len < LENGTH_EPSILON {
        return ap.hypot();
    }
    ab.cross(ap).abs() / len
}

/// Unit vector, or `None` if `v` is too short to have a direction.
pub(crate) fn unit(v: Vec2) -> Option<Vec2> {
    let len = v.hypot();
    if len < LENGTH_EPSILON {
        None
    } else {
        Some(v / len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> PointSequence {
        PointSequence::closed_from_tuples(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)])
    }

    #[test]
    fn perimeter_includes_closing_segment() {
        assert_relative_eq!(square().perimeter(), 40.0);
        let open = PointSequence::open(square().into_points());
        assert_relative_eq!(open.perimeter(), 30.0);
    }

    #[test]
    fn signed_area_tracks_winding() {
        assert_relative_eq!(square().signed_area(), 100.0);
        let mut reversed = square().into_points();
        reversed.reverse();
        assert_relative_eq!(PointSequence::closed(reversed).signed_area(), -100.0);
    }

    #[test]
    fn neighbors_wrap_or_clamp() {
        let closed = square();
        assert_eq!(closed.neighbors(0), (3, 1));
        assert_eq!(closed.neighbors(3), (2, 0));

        let open = PointSequence::open(square().into_points());
        assert_eq!(open.neighbors(0), (0, 1));
        assert_eq!(open.neighbors(3), (2, 3));
    }

    #[test]
    fn perpendicular_distance_degenerate_chord() {
        let a = Point::new(1.0, 1.0);
        assert_relative_eq!(perpendicular_distance(Point::new(4.0, 5.0), a, a), 5.0);
        let d = perpendicular_distance(Point::new(5.0, 3.0), Point::ZERO, Point::new(10.0, 0.0));
        assert_relative_eq!(d, 3.0);
    }

    #[test]
    fn bezpath_closes_loops() {
        let path = square().to_bezpath();
        assert_eq!(path.elements().len(), 5);
        assert_eq!(path.elements().last(), Some(&PathEl::ClosePath));

        let open = PointSequence::open(square().into_points()).to_bezpath();
        assert_eq!(open.elements().len(), 4);
    }

    #[test]
    fn require_checks() {
        let two = PointSequence::closed_from_tuples(&[(0.0, 0.0), (1.0, 0.0)]);
        assert_eq!(
            two.require(3),
            Err(RacingLineError::DegenerateInput { required: 3, found: 2 })
        );
        let bad = PointSequence::closed_from_tuples(&[(0.0, f64::NAN)]);
        assert!(bad.require_finite().is_err());
    }
}
