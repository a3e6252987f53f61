// Difficulty controller and the full generation pipeline.
//
// `MazeGenerator` is the single entry point the host talks to. It owns the
// immutable `MazeConfig`, the validated `Grammar`, the evolving
// `DifficultyState`, and the current `Level`. It never holds a reference to
// the player; the movement collaborator calls in through `regenerate()`,
// `check_descent()` and `lower_boundary()`.
//
// ## Pipeline
//
// One `generate()` call runs, synchronously and to completion:
//
//   grammar expansion → turtle interpretation → carving → framing →
//   start selection → lower boundary
//
// Random draws happen in exactly that order (the turtle and framing draw
// nothing), all from the caller's `RandomSource`.
//
// ## Difficulty loop
//
// The controller is Idle between calls. A regeneration trigger moves it
// through Regenerating and back to Idle before returning:
//
// - `regenerate(true)` (the player fell below the lower boundary): classify
//   the elapsed time since the last trigger as fast (≤ `fast_secs`),
//   moderate (≤ `slow_secs`) or slow, and move the depth cap by
//   +`fast_depth_boost`, +`moderate_depth_boost` or -`slow_depth_penalty`
//   (floored at `min_depth`). The blocked-count floor and the start-height
//   threshold always rise by their increments.
// - `regenerate(false)` (plain restart): no parameter change. The outgoing
//   level's Pathway/Blocked tags are flipped independently before the new
//   level replaces it.
//
// Either way the elapsed-time counter resets to zero. Time only moves when
// the host calls `advance()`; nothing here reads a clock.
//
// A depth cap of -1 in the config means "derive from the view": on the first
// generation it becomes `floor(view height / (2 * segment length))`.
//
// See also: `config.rs` for `DifficultyParams`, `carver.rs` for escalation
// and reshuffling, `framing.rs` for the viewport that seeds the next origin.

use crate::carver::{self, EscalationReport};
use crate::config::{DifficultyParams, MazeConfig};
use crate::error::MazeError;
use crate::event::GenerationEvent;
use crate::framing::{self, Viewport};
use crate::grammar::Grammar;
use crate::turtle;
use crate::types::{Segment, SegmentId, SegmentTag, Vec2, count_tagged};
use fractal_maze_prng::RandomSource;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Difficulty state
// ---------------------------------------------------------------------------

/// How quickly the player cleared the previous level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pace {
    Fast,
    Moderate,
    Slow,
}

impl Pace {
    pub fn classify(elapsed_secs: f32, params: &DifficultyParams) -> Self {
        if elapsed_secs <= params.fast_secs {
            Self::Fast
        } else if elapsed_secs <= params.slow_secs {
            Self::Moderate
        } else {
            Self::Slow
        }
    }
}

/// Parameters that persist and evolve across levels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyState {
    /// Current depth cap; -1 until derived from the view.
    pub max_depth: i32,
    /// Random blocked placements requested per level.
    pub min_blocked: u32,
    /// Start segments must sit strictly above this height.
    pub start_threshold: f32,
    /// Seconds since the last regeneration trigger.
    pub elapsed_secs: f32,
    /// Half-height of the current view; the next turtle origin sits one
    /// segment length above its bottom edge.
    pub view_half_height: f32,
    /// Number of generation passes run so far.
    pub generation: u64,
}

impl DifficultyState {
    pub fn from_config(config: &MazeConfig) -> Self {
        Self {
            max_depth: config.turtle.max_depth,
            min_blocked: config.carve.min_blocked,
            start_threshold: config.difficulty.initial_start_threshold,
            elapsed_secs: 0.0,
            view_half_height: config.turtle.initial_view_half_height,
            generation: 0,
        }
    }

    /// Adjust for a completed level. Does not reset the elapsed counter.
    ///
    /// A slow level never takes the depth cap below `min_depth`, and every
    /// counter saturates instead of overflowing.
    pub fn apply_descent(&mut self, params: &DifficultyParams) -> Pace {
        let pace = Pace::classify(self.elapsed_secs, params);
        let depth = match pace {
            Pace::Fast => self.max_depth.saturating_add(params.fast_depth_boost),
            Pace::Moderate => self.max_depth.saturating_add(params.moderate_depth_boost),
            Pace::Slow => self
                .max_depth
                .saturating_sub(params.slow_depth_penalty)
                .max(params.min_depth),
        };
        // Never back to the -1 sentinel.
        self.max_depth = depth.max(0);
        self.min_blocked = self.min_blocked.saturating_add(params.blocked_increment);
        self.start_threshold += params.start_height_increment;
        pace
    }
}

// ---------------------------------------------------------------------------
// Level output
// ---------------------------------------------------------------------------

/// Everything one generation pass hands to the host.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub generation: u64,
    /// Length of the expanded command string.
    pub command_len: usize,
    /// Tagged segments in emission order; `segments[i].id == SegmentId(i)`.
    pub segments: Vec<Segment>,
    /// DFS visit order of the main path (see `CarveReport::main_path`),
    /// minus segments a density escalation has since taken off the path.
    pub main_path: Vec<SegmentId>,
    pub viewport: Option<Viewport>,
    /// Randomly selected start above the start-height threshold. Selection
    /// ignores tags, so the start may be Unvisited or Blocked; hosts that
    /// need a walkable spawn should check its tag.
    pub start: Option<SegmentId>,
    /// Height at or below which the player has fallen out.
    pub lower_boundary: Option<f32>,
    pub events: Vec<GenerationEvent>,
}

impl Level {
    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id.index()]
    }

    pub fn count(&self, tag: SegmentTag) -> usize {
        count_tagged(&self.segments, tag)
    }

    /// Highest Pathway segment; first in emission order wins ties.
    pub fn topmost_pathway(&self) -> Option<SegmentId> {
        self.segments
            .iter()
            .filter(|s| s.tag == SegmentTag::Pathway)
            .fold(None, |best: Option<&Segment>, s| match best {
                Some(b) if b.position.y >= s.position.y => Some(b),
                _ => Some(s),
            })
            .map(|s| s.id)
    }

    /// Where to place the player: the selected start, or the topmost
    /// Pathway segment when no segment cleared the start threshold.
    pub fn spawn_segment(&self) -> Option<SegmentId> {
        self.start.or_else(|| self.topmost_pathway())
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

pub struct MazeGenerator {
    config: MazeConfig,
    grammar: Grammar,
    state: DifficultyState,
    level: Level,
}

impl MazeGenerator {
    /// Validate `config` and run the first generation pass.
    pub fn new<R: RandomSource + ?Sized>(config: MazeConfig, rng: &mut R) -> Result<Self, MazeError> {
        config.validate()?;
        let grammar = Grammar::from_params(&config.grammar)?;
        let state = DifficultyState::from_config(&config);
        let mut generator = Self {
            config,
            grammar,
            state,
            level: Level::default(),
        };
        generator.level = generator.generate(rng)?;
        Ok(generator)
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn state(&self) -> &DifficultyState {
        &self.state
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn lower_boundary(&self) -> Option<f32> {
        self.level.lower_boundary
    }

    pub fn start_threshold(&self) -> f32 {
        self.state.start_threshold
    }

    /// Accumulate host time toward the next difficulty decision.
    pub fn advance(&mut self, dt_secs: f32) {
        if dt_secs > 0.0 {
            self.state.elapsed_secs += dt_secs;
        }
    }

    /// Handle a regeneration trigger and replace the current level.
    pub fn regenerate<R: RandomSource + ?Sized>(
        &mut self,
        adjust_difficulty: bool,
        rng: &mut R,
    ) -> Result<&Level, MazeError> {
        let mut carried = Vec::new();
        if adjust_difficulty {
            let before = self.state.max_depth;
            let pace = self.state.apply_descent(&self.config.difficulty);
            log::info!(
                "level cleared in {:.1}s ({pace:?}): max depth {before} -> {}, min blocked {}, start threshold {:.1}",
                self.state.elapsed_secs,
                self.state.max_depth,
                self.state.min_blocked,
                self.state.start_threshold
            );
        } else {
            let flipped = carver::reshuffle_tags(
                &mut self.level.segments,
                self.config.difficulty.reshuffle_flip_probability,
                rng,
            );
            GenerationEvent::PreviousLevelReshuffled { flipped }.report(&mut carried);
        }
        self.state.elapsed_secs = 0.0;

        let mut level = self.generate(rng)?;
        carried.append(&mut level.events);
        level.events = carried;
        self.level = level;
        Ok(&self.level)
    }

    /// Regenerate with difficulty adjustment if `player_y` is at or below
    /// the lower boundary. Returns whether a new level was generated.
    pub fn check_descent<R: RandomSource + ?Sized>(
        &mut self,
        player_y: f32,
        rng: &mut R,
    ) -> Result<bool, MazeError> {
        match self.level.lower_boundary {
            Some(boundary) if player_y <= boundary => {
                self.regenerate(true, rng)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Raise density on the current level without regenerating.
    ///
    /// Segments that lose their Pathway tag drop out of `main_path`. If the
    /// selected start is one of them it is cleared, so `spawn_segment()`
    /// falls back to the topmost remaining Pathway segment.
    pub fn escalate<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> EscalationReport {
        let report = carver::escalate(
            &mut self.level.segments,
            &self.config.carve,
            self.config.carve.extra_blocked,
            rng,
        );

        let level = &mut self.level;
        let mut lost = vec![false; level.segments.len()];
        for id in report.converted.iter().chain(&report.removed_pathways) {
            lost[id.index()] = true;
        }
        level.main_path.retain(|id| !lost[id.index()]);
        if level.start.is_some_and(|id| lost[id.index()]) {
            log::debug!("escalation blocked start {:?}; falling back", level.start);
            level.start = None;
        }
        level.events.extend(report.events.iter().cloned());
        report
    }

    fn generate<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<Level, MazeError> {
        let turtle_params = &self.config.turtle;
        self.state.generation += 1;
        if self.state.max_depth == -1 {
            let view_height = self.state.view_half_height * 2.0;
            self.state.max_depth = (view_height / (2.0 * turtle_params.segment_length)).floor() as i32;
            log::debug!("derived max depth {} from view height {view_height}", self.state.max_depth);
        }

        let commands = self
            .grammar
            .expand(self.config.grammar.iterations, rng);
        let origin = Vec2::new(
            0.0,
            -self.state.view_half_height + turtle_params.segment_length,
        );
        let output = turtle::interpret(&commands, origin, turtle_params, self.state.max_depth)?;
        log::debug!(
            "generation {}: {} commands, {} segments, {} truncated",
            self.state.generation,
            commands.len(),
            output.segments.len(),
            output.stats.truncated
        );

        let mut level = Level {
            generation: self.state.generation,
            command_len: commands.len(),
            segments: output.segments,
            ..Level::default()
        };

        let Some(report) = carver::carve(
            &mut level.segments,
            &self.config.carve,
            self.state.min_blocked,
            rng,
        ) else {
            GenerationEvent::EmptyLevel.report(&mut level.events);
            return Ok(level);
        };
        level.main_path = report.main_path;
        level.events = report.events;

        level.viewport = framing::frame(&level.segments, &self.config.framing);
        if let Some(view) = level.viewport {
            self.state.view_half_height = view.half_height;
        }

        level.start = framing::select_start(&level.segments, self.state.start_threshold, rng);
        if level.start.is_none() {
            GenerationEvent::NoQualifyingStartSegment {
                threshold: self.state.start_threshold,
            }
            .report(&mut level.events);
        }

        level.lower_boundary =
            framing::lower_boundary(&level.segments, self.config.framing.boundary_margin);
        Ok(level)
    }
}
