//! Question data: the shape a loader hands the engine.
//!
//! A `Question` carries its answers, its bonus (which doubles as the
//! difficulty group key) and its answer window. Nothing here is mutated
//! during a match except the order of a question's answers, and each
//! `Answer` carries its own correctness flag so a reorder can never change
//! which answer is right.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::time::Duration;

use crate::core::ConfigError;

/// Inline storage for the usual four answer buttons.
pub type Answers = SmallVec<[Answer; 4]>;

/// One answer option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub is_correct: bool,
}

impl Answer {
    pub fn correct(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_correct: true,
        }
    }

    pub fn wrong(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_correct: false,
        }
    }
}

/// Media shown behind a question. The engine only carries the reference;
/// resolving it to an asset is the presentation layer's job.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Media {
    Image(String),
    Video(String),
}

/// A multiple-choice question.
///
/// ## Example
///
/// ```
/// use quiz_engine::questions::Question;
///
/// let q = Question::new("2 + 2?", 10.0, 15.0)
///     .with_wrong("3")
///     .with_correct("4")
///     .with_followup("Basic arithmetic.");
///
/// assert_eq!(q.answers.len(), 2);
/// assert!(q.is_correct(1));
/// assert!(q.validate(0).is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,

    /// Shown after the question resolves, before moving on.
    #[serde(default)]
    pub followup: Option<String>,

    /// Score reward and difficulty group key (ascending = harder).
    pub bonus: f64,

    /// Length of the answer window in seconds.
    pub time_limit_secs: f64,

    pub answers: Answers,

    #[serde(default)]
    pub media: Option<Media>,
}

impl Question {
    /// Create a question with no answers yet.
    #[must_use]
    pub fn new(text: impl Into<String>, bonus: f64, time_limit_secs: f64) -> Self {
        Self {
            text: text.into(),
            followup: None,
            bonus,
            time_limit_secs,
            answers: SmallVec::new(),
            media: None,
        }
    }

    #[must_use]
    pub fn with_correct(mut self, text: impl Into<String>) -> Self {
        self.answers.push(Answer::correct(text));
        self
    }

    #[must_use]
    pub fn with_wrong(mut self, text: impl Into<String>) -> Self {
        self.answers.push(Answer::wrong(text));
        self
    }

    #[must_use]
    pub fn with_followup(mut self, text: impl Into<String>) -> Self {
        self.followup = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_media(mut self, media: Media) -> Self {
        self.media = Some(media);
        self
    }

    /// Whether the answer at `index` is correct. Out of range is never correct.
    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        self.answers.get(index).is_some_and(|a| a.is_correct)
    }

    /// Number of correct answers offered.
    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }

    /// Answer window as a `Duration`.
    ///
    /// Validated questions always convert; anything else collapses to zero,
    /// which makes the question time out on the first tick.
    #[must_use]
    pub fn time_limit(&self) -> Duration {
        Duration::try_from_secs_f64(self.time_limit_secs).unwrap_or(Duration::ZERO)
    }

    /// Follow-up text, ignoring empty strings.
    #[must_use]
    pub fn followup_text(&self) -> Option<&str> {
        self.followup.as_deref().filter(|t| !t.is_empty())
    }

    /// Check the load-time invariants. `index` is only used in errors.
    pub fn validate(&self, index: usize) -> Result<(), ConfigError> {
        for (field, value) in [("bonus", self.bonus), ("time limit", self.time_limit_secs)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidNumber { index, field, value });
            }
        }
        if self.answers.is_empty() {
            return Err(ConfigError::NoAnswers {
                index,
                text: self.text.clone(),
            });
        }
        if self.correct_count() == 0 {
            return Err(ConfigError::NoCorrectAnswer {
                index,
                text: self.text.clone(),
            });
        }
        Ok(())
    }
}
