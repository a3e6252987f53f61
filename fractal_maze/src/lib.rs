// fractal_maze: grammar-grown branching maze generator.
//
// A level is grown from a bracketed rewriting grammar, drawn as line segments
// by a turtle, and carved into a maze: a randomized depth-first main path
// from the top of the structure to its bottom, a fixed trap at mid-height,
// and a floor of randomly placed obstacles. Difficulty adapts between levels
// to how quickly the player descended.
//
// Module overview:
// - `types.rs`:      Vec2, SegmentId, SegmentTag, Segment.
// - `config.rs`:     MazeConfig and its parameter groups, JSON loading, validation.
// - `error.rs`:      ConfigError, GrammarIntegrityError, MazeError.
// - `event.rs`:      GenerationEvent, the soft conditions a pass reports without failing.
// - `grammar.rs`:    Symbol alphabet, CommandString, stochastic rewriting.
// - `turtle.rs`:     Command string → positioned segments with depth truncation.
// - `spatial.rs`:    Uniform-grid index for the carver's radius queries.
// - `carver.rs`:     Main path DFS, midpoint trap, obstacles, contradiction resolution.
// - `framing.rs`:    Viewport fitting, start selection, lower boundary.
// - `difficulty.rs`: MazeGenerator: the pipeline plus the adaptive difficulty loop.
// - `prng`:          Re-exported from `fractal_maze_prng`; xoshiro256++ behind `RandomSource`.
//
// The library draws nothing itself: no rendering, no input, no clock. The
// host feeds elapsed time through `MazeGenerator::advance()` and reports
// player descent through `check_descent()` or `regenerate()`.
//
// **Critical constraint: determinism.** Given the same config, seed, and
// sequence of host calls, every level is identical. All randomness flows
// through the caller's `RandomSource`, and every candidate list is ordered by
// segment emission order before anything is drawn from it.

pub mod carver;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod event;
pub mod framing;
pub mod grammar;
pub use fractal_maze_prng as prng;
pub mod spatial;
pub mod turtle;
pub mod types;
