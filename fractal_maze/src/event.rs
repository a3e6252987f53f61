// Soft conditions reported by a generation pass.
//
// A pass never aborts on these; it still produces a usable, if imperfect,
// maze. Each `Level` carries the events its pass raised so the host can
// surface them (or ignore them), and `report()` mirrors them to the `log`
// facade as they happen.
//
// See also: `error.rs` for the fatal counterparts, `carver.rs` and
// `difficulty.rs` which raise these.

use crate::types::SegmentId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GenerationEvent {
    /// The turtle emitted no segments (depth cap below zero or an empty
    /// command string). Carving, framing and start selection were skipped.
    EmptyLevel,
    /// The DFS exhausted every reachable segment without reaching the
    /// bottommost one. The bottommost segment is still tagged Pathway, but
    /// no adjacency-respecting route leads to it.
    DisconnectedGraph { visited: usize, bottom: SegmentId },
    /// Fewer candidates than requested were available for blocking.
    InsufficientPool { requested: u32, placed: u32 },
    /// No segment sits above the start-height threshold.
    NoQualifyingStartSegment { threshold: f32 },
    /// Pathway segments untagged because a blocked segment coincided with them.
    ContradictionsResolved { removed: usize },
    /// A plain restart flipped tags on the outgoing level before regenerating.
    PreviousLevelReshuffled { flipped: usize },
}

impl GenerationEvent {
    /// True for conditions that mean the level is weaker than configured.
    pub fn is_degradation(&self) -> bool {
        matches!(
            self,
            Self::EmptyLevel
                | Self::DisconnectedGraph { .. }
                | Self::InsufficientPool { .. }
                | Self::NoQualifyingStartSegment { .. }
        )
    }

    /// Log this event and append it to `events`.
    pub fn report(self, events: &mut Vec<GenerationEvent>) {
        if self.is_degradation() {
            log::warn!("maze generation degraded: {self:?}");
        } else {
            log::debug!("maze generation: {self:?}");
        }
        events.push(self);
    }
}
