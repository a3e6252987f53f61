// Framing and start selection.
//
// After a level is carved the host needs three things to present it: a
// viewport that fits the whole segment set, a start segment for the player,
// and the height below which the player has fallen out of the level. All are
// computed from segment midpoints.
//
// The viewport's half-height also feeds back into the next generation: the
// turtle starts one segment length above the bottom edge of the current view
// (see `difficulty.rs`).

use crate::config::FramingParams;
use crate::types::{Segment, SegmentId, Vec2};
use fractal_maze_prng::RandomSource;
use serde::{Deserialize, Serialize};

/// Axis-aligned extent of segment midpoints.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Bounds {
    /// `None` for an empty segment set.
    pub fn of(segments: &[Segment]) -> Option<Self> {
        let first = segments.first()?.position;
        let mut b = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for seg in &segments[1..] {
            let p = seg.position;
            b.min_x = b.min_x.min(p.x);
            b.max_x = b.max_x.max(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_y = b.max_y.max(p.y);
        }
        Some(b)
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }
}

/// An orthographic view onto the level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: Vec2,
    /// Half the visible height; the visible width is this times twice the
    /// aspect ratio.
    pub half_height: f32,
}

/// Fit a viewport around every segment, padded by `params.margin`.
pub fn frame(segments: &[Segment], params: &FramingParams) -> Option<Viewport> {
    let bounds = Bounds::of(segments)?;
    let fit = (bounds.height() / 2.0).max(bounds.width() / (2.0 * params.aspect_ratio));
    Some(Viewport {
        center: bounds.center(),
        half_height: fit + params.margin,
    })
}

/// Pick a start segment uniformly among those strictly above `threshold`,
/// whatever their tag.
///
/// Draws nothing and returns `None` when no segment qualifies.
pub fn select_start<R: RandomSource + ?Sized>(
    segments: &[Segment],
    threshold: f32,
    rng: &mut R,
) -> Option<SegmentId> {
    let candidates: Vec<SegmentId> = segments
        .iter()
        .filter(|s| s.position.y > threshold)
        .map(|s| s.id)
        .collect();
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.range_usize(0, candidates.len())])
}

/// Height of the lowest segment plus `margin`.
pub fn lower_boundary(segments: &[Segment], margin: f32) -> Option<f32> {
    Bounds::of(segments).map(|b| b.min_y + margin)
}
