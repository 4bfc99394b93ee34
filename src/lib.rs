//! # quiz-engine
//!
//! Rules engine for turn-based, hot-seat multiple-choice quiz matches.
//!
//! Several players share one screen and take turns answering timed
//! questions. Each question carries a bonus that shrinks with every wrong
//! answer; questions are grouped by bonus and the match climbs through the
//! groups until the bank, the last group, or the question limit runs out,
//! or everyone has lost their lives.
//!
//! ## Design Principles
//!
//! 1. **No I/O**: The engine never reads files, draws, or plays sounds. The
//!    host loads `Question`s, drives `tick`, and reacts to `SessionListener`
//!    callbacks.
//!
//! 2. **N-Player First**: Every seat is a `PlayerId` into a `PlayerMap`.
//!    Solo play is just a one-seat match.
//!
//! 3. **Deterministic**: All shuffling goes through `QuizRng`, derived from
//!    the match seed. Same seed, same bank, same config: same match, whichever
//!    Rust release built it (context streams are derived with `FxHasher`).
//!
//! 4. **Configuration Over Convention**: Group size, mistakes, lives, bonus
//!    decay and ordering all live in `QuizConfig`.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, errors
//! - `questions`: Questions, banks, categories, the shared question cache
//! - `scoring`: Scores, lives, mistakes, turn order, ranking
//! - `session`: Timer, group sequencing, the `SessionController` state machine

pub mod core;
pub mod questions;
pub mod scoring;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Color, PlayerId, PlayerMap, PlayerProfile,
    QuizRng, QuizConfig,
    ConfigError, SessionError,
};

pub use crate::questions::{
    Answer, Media, Question, QuestionBank,
    Category, CategoryCampaign, QuestionCache,
};

pub use crate::scoring::{MissReason, Outcome, Player, Ranking, ScoreBoard, Verdict};

pub use crate::session::{
    Phase, Progress, Resolution, SessionState,
    MatchOutcome, MatchSummary,
    SessionController, TickReport,
    SessionListener, NoopListener, ScoreRecorder, MemoryScoreRecorder,
    GroupSequencer, Step, Timer,
};
