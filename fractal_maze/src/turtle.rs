// Turtle interpreter: command string to segments.
//
// Walks the command string left to right with a cursor (position, heading,
// depth index) and an explicit stack of saved cursor frames. Each forward
// symbol within the depth cap emits one segment whose position is the
// midpoint of the move; forward symbols past the cap are skipped entirely
// (no segment, no movement) but interpretation continues, so later branches
// restored from a shallower frame still draw.
//
// Segments come out tagged `Unvisited` with sequential ids in emission order.
// The carver assigns the real tags afterwards.
//
// See also: `grammar.rs` for `CommandString`, `carver.rs` for the consumer,
// `difficulty.rs` for where the origin and depth cap come from.

use crate::config::TurtleParams;
use crate::error::GrammarIntegrityError;
use crate::grammar::{CommandString, Symbol};
use crate::types::{Segment, SegmentId, SegmentTag, Vec2};

/// Cursor state saved on `[` and restored on the matching `]`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct CursorFrame {
    position: Vec2,
    angle_deg: f32,
    depth: u32,
}

/// Bookkeeping from one interpretation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurtleStats {
    /// Frames pushed (scope-open symbols consumed).
    pub pushes: usize,
    /// Frames popped (scope-close symbols consumed).
    pub pops: usize,
    /// Forward symbols skipped by the depth cap.
    pub truncated: usize,
    /// Deepest stack depth reached.
    pub max_stack: usize,
}

pub struct TurtleOutput {
    pub segments: Vec<Segment>,
    pub stats: TurtleStats,
}

/// Interpret `commands` starting at `origin`, heading straight up.
///
/// A forward symbol emits a segment iff the current depth index is at most
/// `max_depth`; a negative cap therefore emits nothing.
pub fn interpret(
    commands: &CommandString,
    origin: Vec2,
    params: &TurtleParams,
    max_depth: i32,
) -> Result<TurtleOutput, GrammarIntegrityError> {
    let mut segments = Vec::with_capacity(commands.forward_count());
    let mut stats = TurtleStats::default();
    let mut stack: Vec<CursorFrame> = Vec::new();
    let mut cursor = CursorFrame {
        position: origin,
        angle_deg: 0.0,
        depth: 0,
    };

    for (offset, &symbol) in commands.symbols().iter().enumerate() {
        match symbol {
            Symbol::Forward => {
                if i64::from(cursor.depth) > i64::from(max_depth) {
                    stats.truncated += 1;
                    continue;
                }
                let direction = Vec2::from_heading(cursor.angle_deg);
                let end = cursor.position + direction * params.segment_length;
                segments.push(Segment {
                    id: SegmentId(segments.len() as u32),
                    position: cursor.position.midpoint(end),
                    angle_deg: cursor.angle_deg,
                    depth: cursor.depth,
                    tag: SegmentTag::Unvisited,
                });
                cursor.position = end;
                cursor.depth += 1;
            }
            Symbol::TurnPositive => cursor.angle_deg += params.turn_angle_deg,
            Symbol::TurnNegative => cursor.angle_deg -= params.turn_angle_deg,
            Symbol::ScopeOpen => {
                stack.push(cursor);
                stats.pushes += 1;
                stats.max_stack = stats.max_stack.max(stack.len());
            }
            Symbol::ScopeClose => {
                cursor = stack
                    .pop()
                    .ok_or(GrammarIntegrityError::UnmatchedClose { offset })?;
                stats.pops += 1;
            }
        }
    }

    if !stack.is_empty() {
        return Err(GrammarIntegrityError::UnclosedScope { open: stack.len() });
    }

    Ok(TurtleOutput { segments, stats })
}
