// Grammar engine: rewriting the axiom into a turtle command string.
//
// The alphabet is fixed at five symbols (see `Symbol`). Only the forward
// symbol is expandable: each rewriting pass replaces every `F` with one of
// the production rules, picked independently and uniformly at random, and
// copies every other symbol through unchanged. Zero passes return the axiom.
//
// Rules are parsed and bracket-checked once, in `Grammar::from_params`, so an
// expanded string built from a valid grammar is always balanced: each rule is
// balanced and substitution never splits a bracket pair.
//
// See also: `turtle.rs` which consumes the `CommandString`, `config.rs` for
// `GrammarParams`.
//
// **Critical constraint: determinism.** Exactly one `range_usize(0, n_rules)`
// draw per forward symbol per pass, in left-to-right order.

use crate::config::GrammarParams;
use crate::error::ConfigError;
use fractal_maze_prng::RandomSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One token of the command alphabet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// `F`: draw one segment and move forward.
    Forward,
    /// `+`: turn counter-clockwise by the turn angle.
    TurnPositive,
    /// `-`: turn clockwise by the turn angle.
    TurnNegative,
    /// `[`: save the cursor.
    ScopeOpen,
    /// `]`: restore the most recently saved cursor.
    ScopeClose,
}

impl Symbol {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'F' => Some(Self::Forward),
            '+' => Some(Self::TurnPositive),
            '-' => Some(Self::TurnNegative),
            '[' => Some(Self::ScopeOpen),
            ']' => Some(Self::ScopeClose),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Forward => 'F',
            Self::TurnPositive => '+',
            Self::TurnNegative => '-',
            Self::ScopeOpen => '[',
            Self::ScopeClose => ']',
        }
    }
}

/// Parse a rule or axiom into symbols, rejecting anything outside the
/// alphabet.
pub fn parse_symbols(text: &str) -> Result<Vec<Symbol>, ConfigError> {
    text.chars()
        .map(|c| {
            Symbol::from_char(c).ok_or_else(|| ConfigError::UnknownSymbol {
                symbol: c,
                source_text: text.to_string(),
            })
        })
        .collect()
}

/// True if every `]` closes an earlier `[` and none are left open.
pub fn is_balanced(symbols: &[Symbol]) -> bool {
    let mut open: usize = 0;
    for s in symbols {
        match s {
            Symbol::ScopeOpen => open += 1,
            Symbol::ScopeClose => {
                if open == 0 {
                    return false;
                }
                open -= 1;
            }
            _ => {}
        }
    }
    open == 0
}

// ---------------------------------------------------------------------------
// Command strings
// ---------------------------------------------------------------------------

/// A fully expanded sequence of turtle commands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandString(Vec<Symbol>);

impl CommandString {
    pub fn from_symbols(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn count(&self, symbol: Symbol) -> usize {
        self.0.iter().filter(|&&s| s == symbol).count()
    }

    pub fn forward_count(&self) -> usize {
        self.count(Symbol::Forward)
    }

    pub fn is_balanced(&self) -> bool {
        is_balanced(&self.0)
    }
}

impl FromStr for CommandString {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_symbols(s).map(Self)
    }
}

impl fmt::Display for CommandString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.0 {
            write!(f, "{}", s.as_char())?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Grammar
// ---------------------------------------------------------------------------

/// A validated axiom plus production rules for the forward symbol.
#[derive(Clone, Debug)]
pub struct Grammar {
    axiom: CommandString,
    rules: Vec<Vec<Symbol>>,
}

impl Grammar {
    /// Parse and check the grammar section of a config.
    pub fn from_params(params: &GrammarParams) -> Result<Self, ConfigError> {
        if params.rules.is_empty() {
            return Err(ConfigError::EmptyRuleSet);
        }
        let axiom = parse_symbols(&params.axiom)?;
        if !is_balanced(&axiom) {
            return Err(ConfigError::UnbalancedAxiom {
                axiom: params.axiom.clone(),
            });
        }
        let mut rules = Vec::with_capacity(params.rules.len());
        for (index, text) in params.rules.iter().enumerate() {
            let rule = parse_symbols(text)?;
            if !is_balanced(&rule) {
                return Err(ConfigError::UnbalancedRule {
                    index,
                    rule: text.clone(),
                });
            }
            rules.push(rule);
        }
        Ok(Self {
            axiom: CommandString(axiom),
            rules,
        })
    }

    pub fn axiom(&self) -> &CommandString {
        &self.axiom
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Rewrite the axiom `iterations` times.
    pub fn expand<R: RandomSource + ?Sized>(&self, iterations: u32, rng: &mut R) -> CommandString {
        let mut current = self.axiom.clone();
        for _ in 0..iterations {
            current = self.rewrite(&current, rng);
        }
        current
    }

    /// One rewriting pass.
    pub fn rewrite<R: RandomSource + ?Sized>(&self, input: &CommandString, rng: &mut R) -> CommandString {
        let longest = self.rules.iter().map(Vec::len).max().unwrap_or(1);
        let mut out = Vec::with_capacity(input.forward_count() * longest + input.len());
        for &symbol in input.symbols() {
            if symbol == Symbol::Forward {
                let pick = rng.range_usize(0, self.rules.len());
                out.extend_from_slice(&self.rules[pick]);
            } else {
                out.push(symbol);
            }
        }
        CommandString(out)
    }
}
