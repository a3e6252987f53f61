// Data-driven generator configuration.
//
// All tunable parameters live in `MazeConfig`, loaded from JSON or built from
// `Default`. Generation code never uses magic numbers; it reads from the
// config. The config is immutable once handed to `MazeGenerator`; the values
// that evolve between levels (current max depth, blocked-count floor, start
// threshold) are seeded from here into `DifficultyState`.
//
// Parameters are grouped by pipeline stage:
// - `GrammarParams`:    axiom, production rules, iteration count.
// - `TurtleParams`:     turn angle, segment length, depth cap, initial view size.
// - `CarveParams`:      adjacency and coincidence radii, blocked-count targets.
// - `FramingParams`:    viewport aspect ratio and margins.
// - `DifficultyParams`: the elapsed-time feedback loop between levels.
//
// `validate()` is the single gate for configuration errors. `MazeGenerator::new`
// calls it before doing any work, so a malformed rule never reaches the
// turtle.
//
// See also: `grammar.rs` for the symbol alphabet checked here,
// `difficulty.rs` for how `DifficultyParams` drive regeneration.

use crate::error::{ConfigError, MazeError};
use crate::grammar::Grammar;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Parameter groups
// ---------------------------------------------------------------------------

/// The rewriting grammar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrammarParams {
    /// Start string. Conventionally a single forward symbol.
    pub axiom: String,
    /// Replacement strings for the forward symbol, chosen uniformly at random
    /// per occurrence.
    pub rules: Vec<String>,
    /// Number of rewriting passes.
    pub iterations: u32,
}

/// Geometric interpretation of the command string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleParams {
    /// Heading change per turn symbol, in degrees.
    pub turn_angle_deg: f32,
    /// Length of one forward move.
    pub segment_length: f32,
    /// Deepest depth index that still emits a segment. `-1` derives the cap
    /// from the view height on the first generation.
    pub max_depth: i32,
    /// Half-height of the view before the first framing pass. The turtle
    /// starts one segment above the bottom edge of the current view.
    pub initial_view_half_height: f32,
}

/// Main-path carving and obstacle placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarveParams {
    /// Two segments are neighbors iff their midpoints are strictly closer
    /// than this.
    pub proximity_radius: f32,
    /// A blocked segment overrides any pathway segment at most this far away.
    pub coincidence_radius: f32,
    /// Blocked segments to place on the first level.
    pub min_blocked: u32,
    /// Pathway segments converted to blocked by one density escalation.
    pub extra_blocked: u32,
}

/// Viewport fitting and the fall-through boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FramingParams {
    /// Viewport width divided by height.
    pub aspect_ratio: f32,
    /// Padding added to the fitted half-height.
    pub margin: f32,
    /// Offset above the lowest segment at which the player counts as having
    /// fallen out of the level.
    pub boundary_margin: f32,
}

/// The elapsed-time feedback loop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyParams {
    /// Floor for the depth cap when a slow level lowers it.
    pub min_depth: i32,
    /// Added to the blocked-count floor on every adjusted regeneration.
    pub blocked_increment: u32,
    /// Added to the start-height threshold on every adjusted regeneration.
    pub start_height_increment: f32,
    /// Start-height threshold for the first level.
    pub initial_start_threshold: f32,
    /// Levels finished within this many seconds count as fast.
    pub fast_secs: f32,
    /// Levels finished within this many seconds (but not fast) count as moderate.
    pub slow_secs: f32,
    /// Depth cap increase after a fast level.
    pub fast_depth_boost: i32,
    /// Depth cap increase after a moderate level.
    pub moderate_depth_boost: i32,
    /// Depth cap decrease after a slow level.
    pub slow_depth_penalty: i32,
    /// Chance each tagged segment flips on a plain restart.
    pub reshuffle_flip_probability: f64,
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Complete generator configuration. Groups missing from the JSON take
/// their default values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    pub grammar: GrammarParams,
    pub turtle: TurtleParams,
    pub carve: CarveParams,
    pub framing: FramingParams,
    pub difficulty: DifficultyParams,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            grammar: GrammarParams {
                axiom: "F".into(),
                rules: vec!["F[+F]F[-F]F".into(), "F[-F][+F]F".into(), "F[+F][-F]".into()],
                iterations: 6,
            },
            turtle: TurtleParams {
                turn_angle_deg: 30.0,
                segment_length: 1.0,
                max_depth: -1,
                initial_view_half_height: 5.0,
            },
            carve: CarveParams {
                proximity_radius: 1.5,
                coincidence_radius: 0.1,
                min_blocked: 10,
                extra_blocked: 20,
            },
            framing: FramingParams {
                aspect_ratio: 16.0 / 9.0,
                margin: 1.5,
                boundary_margin: 0.5,
            },
            difficulty: DifficultyParams {
                min_depth: 5,
                blocked_increment: 10,
                start_height_increment: 1.0,
                initial_start_threshold: 0.0,
                fast_secs: 15.0,
                slow_secs: 30.0,
                fast_depth_boost: 2,
                moderate_depth_boost: 1,
                slow_depth_penalty: 1,
                reshuffle_flip_probability: 0.5,
            },
        }
    }
}

impl MazeConfig {
    /// Parse a config from JSON. Does not validate.
    pub fn from_json(json: &str) -> Result<Self, MazeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, MazeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every invariant generation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Grammar::from_params(&self.grammar)?;

        let t = &self.turtle;
        positive("turtle.segment_length", t.segment_length)?;
        positive("turtle.initial_view_half_height", t.initial_view_half_height)?;
        finite("turtle.turn_angle_deg", t.turn_angle_deg)?;
        if t.max_depth < -1 {
            return Err(invalid("turtle.max_depth", format!("{} is below -1", t.max_depth)));
        }

        let c = &self.carve;
        positive("carve.proximity_radius", c.proximity_radius)?;
        positive("carve.coincidence_radius", c.coincidence_radius)?;

        let f = &self.framing;
        positive("framing.aspect_ratio", f.aspect_ratio)?;
        finite("framing.margin", f.margin)?;
        finite("framing.boundary_margin", f.boundary_margin)?;

        let d = &self.difficulty;
        if d.min_depth < 0 {
            return Err(invalid("difficulty.min_depth", format!("{} is negative", d.min_depth)));
        }
        non_negative("difficulty.fast_depth_boost", d.fast_depth_boost)?;
        non_negative("difficulty.moderate_depth_boost", d.moderate_depth_boost)?;
        non_negative("difficulty.slow_depth_penalty", d.slow_depth_penalty)?;
        finite("difficulty.fast_secs", d.fast_secs)?;
        finite("difficulty.slow_secs", d.slow_secs)?;
        if d.fast_secs > d.slow_secs {
            return Err(invalid(
                "difficulty.fast_secs",
                format!("{} exceeds slow_secs {}", d.fast_secs, d.slow_secs),
            ));
        }
        finite("difficulty.start_height_increment", d.start_height_increment)?;
        finite("difficulty.initial_start_threshold", d.initial_start_threshold)?;
        if !(0.0..=1.0).contains(&d.reshuffle_flip_probability) {
            return Err(invalid(
                "difficulty.reshuffle_flip_probability",
                format!("{} is outside [0, 1]", d.reshuffle_flip_probability),
            ));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: String) -> ConfigError {
    ConfigError::InvalidParameter { name, reason }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(name, format!("{value} must be positive")))
    }
}

fn non_negative(name: &'static str, value: i32) -> Result<(), ConfigError> {
    if value >= 0 {
        Ok(())
    } else {
        Err(invalid(name, format!("{value} is negative")))
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(name, format!("{value} is not finite")))
    }
}
