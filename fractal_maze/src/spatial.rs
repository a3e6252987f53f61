// Uniform-grid spatial index over segment midpoints.
//
// Replaces brute-force radius scans for the two distance queries the carver
// makes: adjacency (proximity radius, strict) and pathway/blocked coincidence
// (coincidence radius, inclusive). Segments are bucketed by their midpoint
// quantized to `cell_size`; a query visits every cell overlapping the query
// circle's bounding square.
//
// The grid is built per carving pass and never cached across generations.
// Query results are sorted by `SegmentId`, i.e. emission order, so the
// callers' subsequent random draws see the same candidate order regardless
// of bucket layout.

use crate::types::{Segment, SegmentId, Vec2};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Whether a point exactly at the query radius counts as inside.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadiusBound {
    Exclusive,
    Inclusive,
}

impl RadiusBound {
    fn contains(self, dist_sq: f32, radius_sq: f32) -> bool {
        match self {
            Self::Exclusive => dist_sq < radius_sq,
            Self::Inclusive => dist_sq <= radius_sq,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SpatialGrid {
    cell_size: f32,
    cells: FxHashMap<(i32, i32), SmallVec<[SegmentId; 4]>>,
    /// Midpoints indexed by `SegmentId`.
    positions: Vec<Vec2>,
}

impl SpatialGrid {
    /// Index `segments`, whose ids must equal their slice indices.
    pub fn build(segments: &[Segment], cell_size: f32) -> Self {
        let mut grid = Self {
            cell_size,
            cells: FxHashMap::default(),
            positions: Vec::with_capacity(segments.len()),
        };
        for (i, seg) in segments.iter().enumerate() {
            debug_assert_eq!(seg.id.index(), i, "segment ids must be dense and ordered");
            let key = grid.cell_of(seg.position);
            grid.cells.entry(key).or_default().push(seg.id);
            grid.positions.push(seg.position);
        }
        grid
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, id: SegmentId) -> Vec2 {
        self.positions[id.index()]
    }

    fn cell_of(&self, p: Vec2) -> (i32, i32) {
        (
            (p.x / self.cell_size).floor() as i32,
            (p.y / self.cell_size).floor() as i32,
        )
    }

    /// All segments within `radius` of `center`, in id order.
    pub fn within(&self, center: Vec2, radius: f32, bound: RadiusBound) -> Vec<SegmentId> {
        let radius_sq = radius * radius;
        let (min_cx, min_cy) = self.cell_of(Vec2::new(center.x - radius, center.y - radius));
        let (max_cx, max_cy) = self.cell_of(Vec2::new(center.x + radius, center.y + radius));

        let mut found = Vec::new();
        for cx in min_cx..=max_cx {
            for cy in min_cy..=max_cy {
                let Some(bucket) = self.cells.get(&(cx, cy)) else {
                    continue;
                };
                found.extend(bucket.iter().copied().filter(|&id| {
                    bound.contains(center.distance_squared(self.position(id)), radius_sq)
                }));
            }
        }
        found.sort_unstable();
        found
    }

    /// Segments strictly closer than `radius` to `id`, excluding `id`.
    pub fn neighbors(&self, id: SegmentId, radius: f32) -> Vec<SegmentId> {
        let mut found = self.within(self.position(id), radius, RadiusBound::Exclusive);
        found.retain(|&other| other != id);
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SegmentTag;

    fn segs(points: &[(f32, f32)]) -> Vec<Segment> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Segment {
                id: SegmentId(i as u32),
                position: Vec2::new(x, y),
                angle_deg: 0.0,
                depth: 0,
                tag: SegmentTag::Unvisited,
            })
            .collect()
    }

    /// Brute-force reference for the grid query.
    fn scan(segments: &[Segment], center: Vec2, radius: f32) -> Vec<SegmentId> {
        segments
            .iter()
            .filter(|s| s.position.distance_squared(center) < radius * radius)
            .map(|s| s.id)
            .collect()
    }

    #[test]
    fn neighbors_in_a_line() {
        let s = segs(&[(0.0, 0.0), (0.0, 1.0), (0.0, 2.0), (0.0, 3.0)]);
        let grid = SpatialGrid::build(&s, 1.5);
        assert_eq!(grid.neighbors(SegmentId(0), 1.5), vec![SegmentId(1)]);
        assert_eq!(grid.neighbors(SegmentId(2), 1.5), vec![SegmentId(1), SegmentId(3)]);
    }

    #[test]
    fn radius_bound_controls_edge_case() {
        let s = segs(&[(0.0, 0.0), (0.0, 1.5)]);
        let grid = SpatialGrid::build(&s, 1.5);
        assert!(grid.neighbors(SegmentId(0), 1.5).is_empty());
        assert_eq!(
            grid.within(Vec2::ZERO, 1.5, RadiusBound::Inclusive),
            vec![SegmentId(0), SegmentId(1)]
        );
    }

    #[test]
    fn matches_brute_force_across_cells() {
        let mut points = Vec::new();
        for i in 0..15 {
            for j in 0..15 {
                points.push((i as f32 * 0.7 - 5.0, j as f32 * 0.45 - 3.0));
            }
        }
        let s = segs(&points);
        let grid = SpatialGrid::build(&s, 1.5);
        for probe in [Vec2::ZERO, Vec2::new(-4.9, 2.1), Vec2::new(3.3, -0.2)] {
            for radius in [0.1, 1.5, 2.7] {
                assert_eq!(grid.within(probe, radius, RadiusBound::Exclusive), scan(&s, probe, radius));
            }
        }
    }

    #[test]
    fn coincident_points_share_a_bucket() {
        let s = segs(&[(1.0, 1.0), (1.0, 1.0), (1.05, 1.0)]);
        let grid = SpatialGrid::build(&s, 1.5);
        assert_eq!(
            grid.within(Vec2::new(1.0, 1.0), 0.1, RadiusBound::Inclusive),
            vec![SegmentId(0), SegmentId(1), SegmentId(2)]
        );
    }
}
