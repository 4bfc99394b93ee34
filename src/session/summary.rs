//! End-of-match summary handed to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::scoring::Ranking;

/// Terminal result of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// The bank, the last group, or the question limit was exhausted.
    Victory,
    /// Nobody is left with lives to answer.
    GameOver,
}

/// What survives a match: scores, lives and counters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub outcome: MatchOutcome,
    pub ranking: Ranking,
    pub correct_answers: usize,
    pub questions_asked: usize,
    /// Effective question limit; 0 when the whole bank was in play.
    pub question_limit: usize,
    /// Match seed, doubling as the match id for score records.
    pub seed: u64,
}

impl MatchSummary {
    /// "correct/limit" as shown on the victory screen. Falls back to the
    /// number of questions asked when no limit was set.
    #[must_use]
    pub fn progress_text(&self) -> String {
        let out_of = if self.question_limit > 0 {
            self.question_limit
        } else {
            self.questions_asked
        };
        format!("{}/{}", self.correct_answers, out_of)
    }
}
