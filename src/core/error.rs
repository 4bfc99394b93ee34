//! Error types returned by the engine.
//!
//! All failures are synchronous and reported to the caller. A rejected
//! operation never mutates session state.

use thiserror::Error;

use crate::session::Phase;

/// Problems with the data or configuration a match is started from.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// No active player would take part in the match.
    #[error("a match needs at least one active player")]
    NoActivePlayers,

    /// A question offers nothing to choose from.
    #[error("question {index} ({text:?}) has no answers")]
    NoAnswers {
        /// Position of the question in the loaded list.
        index: usize,
        /// Question text, for diagnostics.
        text: String,
    },

    /// A question whose answers are all wrong can never be resolved correctly.
    #[error("question {index} ({text:?}) has no correct answer")]
    NoCorrectAnswer { index: usize, text: String },

    /// Bonus and time limit must be finite, non-negative numbers.
    #[error("question {index} has an invalid {field}: {value}")]
    InvalidNumber {
        index: usize,
        field: &'static str,
        value: f64,
    },

    /// The per-mistake bonus multiplier must lie in `[0, 1]`.
    #[error("bonus loss factor must be within [0, 1], got {0}")]
    InvalidBonusLoss(f64),

    /// At least one wrong answer has to be allowed before a question is lost.
    #[error("maximum mistakes must be at least 1")]
    ZeroMaximumMistakes,

    #[error("players must start with at least one life")]
    ZeroStartingLives,

    #[error("questions per group must be at least 1")]
    ZeroQuestionsPerGroup,

    #[error("category {index} is out of range ({count} categories)")]
    CategoryOutOfRange { index: usize, count: usize },

    #[error("category {0:?} has already been played")]
    CategoryAlreadyUsed(String),
}

/// Errors raised by [`SessionController`](crate::session::SessionController)
/// operations.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SessionError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The operation is not valid in the current phase. The host is expected
    /// to gate its UI, so this signals a programming error.
    #[error("{operation} is not allowed while {phase}")]
    InvalidStateTransition {
        operation: &'static str,
        phase: Phase,
    },

    #[error("answer {index} is out of range ({count} answers)")]
    OutOfRangeAnswer { index: usize, count: usize },

    /// The answer was already tried and disabled for this question.
    #[error("answer {index} was already eliminated")]
    AnswerAlreadyEliminated { index: usize },
}
