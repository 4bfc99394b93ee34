//! Collaborators injected into the controller.
//!
//! - [`SessionListener`]: presentation callbacks (show the question, play
//!   the right/wrong feedback, show the result screen).
//! - [`ScoreRecorder`]: high-score persistence. The engine only hands over
//!   `(match seed, player name, score)` when a match ends.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

use super::state::Resolution;
use super::summary::MatchSummary;
use crate::questions::Question;
use crate::scoring::{Player, Verdict};

/// Presentation hooks. Every method defaults to doing nothing.
pub trait SessionListener {
    /// A question is on screen and its timer is running.
    fn on_question_presented(&mut self, _index: usize, _question: &Question, _player: &Player) {}

    /// An answer was evaluated. `Verdict::Pending` means the player may retry.
    fn on_answer_evaluated(&mut self, _answer: usize, _verdict: &Verdict) {}

    fn on_question_resolved(&mut self, _resolution: &Resolution) {}

    fn on_match_ended(&mut self, _summary: &MatchSummary) {}
}

/// Listener that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopListener;

impl SessionListener for NoopListener {}

/// Shared listener; the host keeps a handle to inspect it.
impl<L: SessionListener> SessionListener for Rc<RefCell<L>> {
    fn on_question_presented(&mut self, index: usize, question: &Question, player: &Player) {
        self.borrow_mut().on_question_presented(index, question, player);
    }

    fn on_answer_evaluated(&mut self, answer: usize, verdict: &Verdict) {
        self.borrow_mut().on_answer_evaluated(answer, verdict);
    }

    fn on_question_resolved(&mut self, resolution: &Resolution) {
        self.borrow_mut().on_question_resolved(resolution);
    }

    fn on_match_ended(&mut self, summary: &MatchSummary) {
        self.borrow_mut().on_match_ended(summary);
    }
}

/// Receives final scores when a match ends.
pub trait ScoreRecorder {
    fn record(&mut self, match_seed: u64, player: &str, score: i64);
}

/// One recorded final score.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreEntry {
    pub match_seed: u64,
    pub player: String,
    pub score: i64,
}

/// In-process recorder keeping every entry and the best score per player.
#[derive(Clone, Debug, Default)]
pub struct MemoryScoreRecorder {
    entries: Vec<ScoreEntry>,
    best: FxHashMap<String, i64>,
}

impl MemoryScoreRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    #[must_use]
    pub fn high_score(&self, player: &str) -> Option<i64> {
        self.best.get(player).copied()
    }
}

impl ScoreRecorder for MemoryScoreRecorder {
    fn record(&mut self, match_seed: u64, player: &str, score: i64) {
        self.entries.push(ScoreEntry {
            match_seed,
            player: player.to_string(),
            score,
        });
        let best = self.best.entry(player.to_string()).or_insert(score);
        if score > *best {
            *best = score;
        }
    }
}

impl<R: ScoreRecorder> ScoreRecorder for Rc<RefCell<R>> {
    fn record(&mut self, match_seed: u64, player: &str, score: i64) {
        self.borrow_mut().record(match_seed, player, score);
    }
}
