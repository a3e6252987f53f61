// Error types for configuration and generation.
//
// Two tiers:
// - `ConfigError`: a malformed `MazeConfig`. Surfaced by `MazeConfig::validate()`
//   before any generation work begins; never produced mid-pass.
// - `GrammarIntegrityError`: the turtle hit a scope-close with no open scope
//   (or finished with scopes still open). Fatal to that pass. Validated
//   configs cannot produce it, but the interpreter checks anyway because it
//   accepts arbitrary command strings.
//
// Soft conditions that degrade a pass without aborting it (disconnected
// graph, short placement pool, no start candidate) are not errors; they are
// reported as `GenerationEvent`s (see `event.rs`).

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grammar has no production rules")]
    EmptyRuleSet,

    #[error("rule {index} has unbalanced brackets: {rule:?}")]
    UnbalancedRule { index: usize, rule: String },

    #[error("axiom has unbalanced brackets: {axiom:?}")]
    UnbalancedAxiom { axiom: String },

    #[error("unknown grammar symbol {symbol:?} in {source_text:?}")]
    UnknownSymbol { symbol: char, source_text: String },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrammarIntegrityError {
    #[error("scope close at command offset {offset} with an empty frame stack")]
    UnmatchedClose { offset: usize },

    #[error("command string ended with {open} unclosed scope(s)")]
    UnclosedScope { open: usize },
}

#[derive(Debug, Error)]
pub enum MazeError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("grammar integrity violated: {0}")]
    GrammarIntegrity(#[from] GrammarIntegrityError),

    #[error("config JSON: {0}")]
    Json(#[from] serde_json::Error),
}
