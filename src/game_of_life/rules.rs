//! Birth/survival rules for two-state Life-like automata

use super::CellState;
use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Built-in Life-like rules, named by their survive/birth neighbor counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rule {
    /// Conway's Game of Life, 23/3
    #[default]
    #[serde(rename = "conway")]
    Conway,
    /// 3/3
    #[serde(rename = "s3b3")]
    S3B3,
    /// 13/3
    #[serde(rename = "s13b3")]
    S13B3,
    /// 34/3
    #[serde(rename = "s34b3")]
    S34B3,
}

impl Rule {
    /// All built-in rules in index order
    pub const ALL: [Rule; 4] = [Rule::Conway, Rule::S3B3, Rule::S13B3, Rule::S34B3];

    /// Neighbor counts under which a live cell stays alive
    pub fn survive(self) -> &'static [u8] {
        match self {
            Rule::Conway => &[2, 3],
            Rule::S3B3 => &[3],
            Rule::S13B3 => &[1, 3],
            Rule::S34B3 => &[3, 4],
        }
    }

    /// Neighbor counts under which a dead cell becomes alive
    pub fn birth(self) -> &'static [u8] {
        &[3]
    }

    /// State of a cell in the next generation given its current state and live-neighbor count
    pub fn next_state(self, state: CellState, neighbors: u8) -> CellState {
        match state {
            CellState::Alive if self.survive().contains(&neighbors) => CellState::Alive,
            CellState::Alive => CellState::Dead,
            CellState::Dead if self.birth().contains(&neighbors) => CellState::Alive,
            CellState::Dead => CellState::Dead,
        }
    }

    /// Look up a rule by its numeric selector
    pub fn from_index(index: usize) -> EngineResult<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(EngineError::InvalidRule { index })
    }

    /// Numeric selector of this rule
    pub fn index(self) -> usize {
        match self {
            Rule::Conway => 0,
            Rule::S3B3 => 1,
            Rule::S13B3 => 2,
            Rule::S34B3 => 3,
        }
    }

    /// Short name used in configuration files
    pub fn name(self) -> &'static str {
        match self {
            Rule::Conway => "conway",
            Rule::S3B3 => "s3b3",
            Rule::S13B3 => "s13b3",
            Rule::S34B3 => "s34b3",
        }
    }

    /// Survive/birth notation, e.g. `23/3`
    pub fn notation(self) -> String {
        let digits = |counts: &[u8]| counts.iter().map(u8::to_string).collect::<String>();
        format!("{}/{}", digits(self.survive()), digits(self.birth()))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Conway => write!(f, "Conway ({})", self.notation()),
            _ => write!(f, "{}", self.notation()),
        }
    }
}

impl FromStr for Rule {
    type Err = anyhow::Error;

    /// Accepts a rule name (`conway`, `s3b3`, ...), its notation (`23/3`) or its index
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if let Ok(index) = s.parse::<usize>() {
            return Ok(Self::from_index(index)?);
        }
        Self::ALL
            .into_iter()
            .find(|rule| rule.name() == s || rule.notation() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown rule '{}'", s))
    }
}
