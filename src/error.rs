//! Error types surfaced by the simulation engine

use thiserror::Error;

/// Recoverable failures of engine operations.
///
/// Out-of-range coordinates are deliberately absent: reads substitute a dead
/// cell and writes clamp to the border.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A rule was selected by an index that names no built-in rule.
    #[error("there is no rule with index {index}")]
    InvalidRule { index: usize },

    /// A live-cell record could not be parsed. Records before it stay applied.
    #[error("malformed live-cell record on line {line_number} ({line:?}): {reason}")]
    ParseFailure {
        line_number: usize,
        line: String,
        reason: String,
    },
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
