//! Corner canonicalization.
//!
//! Board corners arrive in arbitrary order (from an annotation tool or a
//! JSON file) and are reordered to `[TL, TR, BR, BL]` in image axes: origin
//! top-left, x right, y down. TL/BR are the extremes of `x + y`, TR/BL the
//! extremes of `x - y`.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Wrong number of corner points.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("expected exactly 4 corners, got {0}")]
pub struct CornerCountError(pub usize);

/// Board corners in canonical `[TL, TR, BR, BL]` order.
///
/// Serializes as a JSON list of four `[x, y]` pairs in canonical order,
/// which is the on-disk corner-file contract. Deserialization accepts the
/// four points in any order and re-canonicalizes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f32; 2]>", into = "Vec<[f32; 2]>")]
pub struct CornerSet {
    points: [Point2<f32>; 4],
}

impl CornerSet {
    /// Canonicalize four points given in any order.
    pub fn from_unordered(points: &[Point2<f32>]) -> Result<Self, CornerCountError> {
        let fixed: [Point2<f32>; 4] = points
            .try_into()
            .map_err(|_| CornerCountError(points.len()))?;
        Ok(Self {
            points: order_corners(fixed),
        })
    }

    pub fn points(&self) -> &[Point2<f32>; 4] {
        &self.points
    }

    pub fn top_left(&self) -> Point2<f32> {
        self.points[0]
    }

    pub fn top_right(&self) -> Point2<f32> {
        self.points[1]
    }

    pub fn bottom_right(&self) -> Point2<f32> {
        self.points[2]
    }

    pub fn bottom_left(&self) -> Point2<f32> {
        self.points[3]
    }
}

impl TryFrom<Vec<[f32; 2]>> for CornerSet {
    type Error = CornerCountError;

    fn try_from(raw: Vec<[f32; 2]>) -> Result<Self, Self::Error> {
        let points: Vec<Point2<f32>> = raw.iter().map(|p| Point2::new(p[0], p[1])).collect();
        Self::from_unordered(&points)
    }
}

impl From<CornerSet> for Vec<[f32; 2]> {
    fn from(c: CornerSet) -> Self {
        c.points.iter().map(|p| [p.x, p.y]).collect()
    }
}

#[inline]
fn argmin_by(pts: &[Point2<f32>; 4], key: impl Fn(Point2<f32>) -> f32) -> usize {
    let mut best = 0;
    for i in 1..4 {
        if key(pts[i]) < key(pts[best]) {
            best = i;
        }
    }
    best
}

#[inline]
fn argmax_by(pts: &[Point2<f32>; 4], key: impl Fn(Point2<f32>) -> f32) -> usize {
    let mut best = 0;
    for i in 1..4 {
        if key(pts[i]) > key(pts[best]) {
            best = i;
        }
    }
    best
}

/// Reorder four arbitrary points to `[TL, TR, BR, BL]`.
///
/// The sum/difference heuristic is ambiguous for quadrilaterals whose
/// extremes coincide (e.g. a square rotated exactly 45 degrees). When the
/// four picks are not distinct we fall back to greedily matching each
/// bounding-box corner to its nearest unused input point; for exact-tie
/// shapes that assignment depends on input order.
pub fn order_corners(pts: [Point2<f32>; 4]) -> [Point2<f32>; 4] {
    let i_tl = argmin_by(&pts, |p| p.x + p.y);
    let i_br = argmax_by(&pts, |p| p.x + p.y);
    let i_tr = argmax_by(&pts, |p| p.x - p.y);
    let i_bl = argmin_by(&pts, |p| p.x - p.y);

    let picks = [i_tl, i_tr, i_br, i_bl];
    let mut seen = [false; 4];
    let mut distinct = true;
    for &i in &picks {
        if seen[i] {
            distinct = false;
            break;
        }
        seen[i] = true;
    }

    if distinct {
        return [pts[i_tl], pts[i_tr], pts[i_br], pts[i_bl]];
    }

    log::debug!("sum/difference corner ordering ambiguous, matching bounding-box corners");
    order_by_bbox_corners(pts)
}

fn order_by_bbox_corners(pts: [Point2<f32>; 4]) -> [Point2<f32>; 4] {
    let min_x = pts.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
    let max_x = pts.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
    let min_y = pts.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
    let max_y = pts.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);

    let targets = [
        Point2::new(min_x, min_y), // TL
        Point2::new(max_x, min_y), // TR
        Point2::new(max_x, max_y), // BR
        Point2::new(min_x, max_y), // BL
    ];

    let mut used = [false; 4];
    let mut out = pts;
    for (slot, t) in targets.iter().enumerate() {
        let mut best = usize::MAX;
        let mut best_d = f32::INFINITY;
        for (i, p) in pts.iter().enumerate() {
            if used[i] {
                continue;
            }
            let d = (p - t).norm_squared();
            if d < best_d {
                best_d = d;
                best = i;
            }
        }
        used[best] = true;
        out[slot] = pts[best];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permutations(pts: [Point2<f32>; 4]) -> Vec<[Point2<f32>; 4]> {
        let mut out = Vec::with_capacity(24);
        let idx = [0usize, 1, 2, 3];
        for a in 0..4 {
            for b in 0..4 {
                for c in 0..4 {
                    for d in 0..4 {
                        let perm = [a, b, c, d];
                        let mut seen = [false; 4];
                        if perm.iter().all(|&i| !std::mem::replace(&mut seen[i], true)) {
                            out.push([
                                pts[idx[perm[0]]],
                                pts[idx[perm[1]]],
                                pts[idx[perm[2]]],
                                pts[idx[perm[3]]],
                            ]);
                        }
                    }
                }
            }
        }
        assert_eq!(out.len(), 24);
        out
    }

    #[test]
    fn axis_aligned_square_orders_as_documented() {
        let pts = [
            Point2::new(100.0, 100.0),
            Point2::new(400.0, 100.0),
            Point2::new(400.0, 400.0),
            Point2::new(100.0, 400.0),
        ];
        let ordered = order_corners(pts);
        assert_eq!(ordered[0], Point2::new(100.0, 100.0)); // TL
        assert_eq!(ordered[1], Point2::new(400.0, 100.0)); // TR
        assert_eq!(ordered[2], Point2::new(400.0, 400.0)); // BR
        assert_eq!(ordered[3], Point2::new(100.0, 400.0)); // BL
    }

    #[test]
    fn ordering_is_permutation_invariant() {
        // mildly perspective-distorted convex quadrilateral
        let pts = [
            Point2::new(120.0, 90.0),
            Point2::new(470.0, 110.0),
            Point2::new(500.0, 430.0),
            Point2::new(80.0, 410.0),
        ];
        let reference = order_corners(pts);
        for perm in permutations(pts) {
            assert_eq!(order_corners(perm), reference);
        }
    }

    #[test]
    fn ambiguous_diamond_falls_back_to_distinct_points() {
        // square rotated 45 degrees: every point ties on x+y or x-y
        let pts = [
            Point2::new(0.0, -1.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(-1.0, 0.0),
        ];
        let ordered = order_corners(pts);
        for i in 0..4 {
            for j in i + 1..4 {
                assert_ne!(ordered[i], ordered[j], "slots {i} and {j} collide");
            }
        }
    }

    #[test]
    fn corner_set_rejects_wrong_count() {
        let pts = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        assert_eq!(
            CornerSet::from_unordered(&pts),
            Err(CornerCountError(2))
        );
    }

    #[test]
    fn serde_round_trip_is_canonical() {
        // scrambled on input, canonical order on disk
        let json = "[[400.0,400.0],[100.0,100.0],[100.0,400.0],[400.0,100.0]]";
        let corners: CornerSet = serde_json::from_str(json).expect("deserializes");
        assert_eq!(corners.top_left(), Point2::new(100.0, 100.0));
        assert_eq!(corners.bottom_right(), Point2::new(400.0, 400.0));

        let out = serde_json::to_string(&corners).expect("serializes");
        assert_eq!(
            out,
            "[[100.0,100.0],[400.0,100.0],[400.0,400.0],[100.0,400.0]]"
        );
    }

    #[test]
    fn too_many_points_fail_to_deserialize() {
        let json = "[[0,0],[1,0],[1,1],[0,1],[2,2]]";
        assert!(serde_json::from_str::<CornerSet>(json).is_err());
    }
}
