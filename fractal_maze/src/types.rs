// Core types shared across the generator.
//
// Defines the planar coordinate (`Vec2`), the segment identifier, the tag
// enum that marks a segment's role in the maze, and the `Segment` record the
// rendering collaborator instantiates. All types derive `Serialize` and
// `Deserialize` so a finished level can be dumped as JSON.
//
// Coordinates are world units: +Y is up, +X is right. The turtle's heading
// of 0 degrees points along +Y.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A point in the maze plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector for a heading in degrees, measured counter-clockwise
    /// from +Y.
    pub fn from_heading(angle_deg: f32) -> Self {
        let rad = angle_deg.to_radians();
        Self::new(-rad.sin(), rad.cos())
    }

    pub fn distance(self, other: Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    pub fn distance_squared(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Segments
// ---------------------------------------------------------------------------

/// Stable identifier of a segment within one generation pass.
///
/// Assigned sequentially in emission order, so `SegmentId(n)` is also the
/// segment's index in the pass's segment list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(pub u32);

impl SegmentId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Segment#{}", self.0)
    }
}

/// A segment's role in the carved maze. Exclusive by construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentTag {
    /// Neither part of the main path nor an obstacle.
    #[default]
    Unvisited,
    /// On the guaranteed-connected main path.
    Pathway,
    /// Impassable.
    Blocked,
}

/// One maze cell produced by turtle interpretation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    /// Midpoint of the segment.
    pub position: Vec2,
    /// Heading in degrees at the time the segment was drawn.
    pub angle_deg: f32,
    /// Number of forward moves between the root and this segment along
    /// its branch.
    pub depth: u32,
    pub tag: SegmentTag,
}

/// Count segments carrying `tag`.
pub fn count_tagged(segments: &[Segment], tag: SegmentTag) -> usize {
    segments.iter().filter(|s| s.tag == tag).count()
}
