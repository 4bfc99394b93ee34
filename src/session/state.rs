//! Session phases and read-only views of the running match.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::PlayerId;
use crate::scoring::Outcome;

/// Where the match is in its lifecycle.
///
/// `Idle -> AwaitingAnswer -> Resolving -> (AwaitingAnswer | Victory | GameOver)`.
/// `Victory` and `GameOver` are terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingAnswer,
    Resolving,
    Victory,
    GameOver,
}

impl Phase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Victory | Phase::GameOver)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::AwaitingAnswer => "awaiting answer",
            Phase::Resolving => "resolving",
            Phase::Victory => "victory",
            Phase::GameOver => "game over",
        };
        f.write_str(name)
    }
}

/// How the last question ended and what to show before the next one.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub question_index: usize,
    /// Who answered (or failed to).
    pub player: PlayerId,
    pub outcome: Outcome,
    /// Follow-up text to display; the host must `advance` explicitly.
    pub followup: Option<String>,
    /// How long to show the result before the next question.
    pub delay: Duration,
}

/// Snapshot of the mutable session counters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub current_question_index: Option<usize>,
    pub current_group_bonus: Option<f64>,
    pub questions_answered_in_group: usize,
    pub current_player_index: usize,
    /// Nominal bonus of the question being asked. Mistakes do not change it;
    /// the decayed value is `SessionController::current_bonus`.
    pub current_bonus_value: f64,
    pub questions_asked_total: usize,
    pub correct_answers_total: usize,
    pub is_game_over: bool,
}

/// Progress counters for the progress bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub asked: usize,
    /// Effective question limit; 0 when the whole bank is played.
    pub limit: usize,
    pub correct: usize,
}
