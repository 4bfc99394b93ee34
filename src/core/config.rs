//! Match configuration.
//!
//! The presentation layer builds a `QuizConfig` (usually from its settings
//! screen) and hands it to `SessionController::start_match`. Defaults follow
//! the classic hot-seat quiz: four seats, two questions per difficulty group,
//! three lives and two mistakes per question.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::ConfigError;

/// Match configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// How many seats of the roster take part (clamped to the roster size).
    pub number_of_players: usize,

    /// Questions asked from one bonus group before moving to the next,
    /// per active player. The effective value is this times the player count.
    pub questions_per_group: usize,

    /// Total questions to ask before the match is won (0 = whole bank).
    /// Clamped to the bank length at match start.
    pub question_limit: usize,

    /// Wrong answers allowed on one question before it is lost.
    pub maximum_mistakes: u32,

    /// Multiplier applied to the question bonus on each wrong answer.
    pub bonus_loss_factor: f64,

    /// Lives every active player starts with.
    pub starting_lives: u32,

    /// Rotate the answering player after every resolved question.
    pub play_in_turns: bool,

    /// Shuffle the bank at match start.
    pub randomize_questions: bool,

    /// Sort the bank by ascending bonus, forming difficulty groups.
    pub sort_questions: bool,

    /// Shuffle each question's answers when it is presented.
    pub randomize_answers: bool,

    /// 1-based position in the prepared bank of the first question served.
    pub first_question: usize,

    /// How long a resolved question stays on screen before the next one.
    pub presentation_delay_secs: f64,

    /// Match seed. Same seed, same bank, same config: same match.
    pub seed: u64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            number_of_players: 4,
            questions_per_group: 2,
            question_limit: 0,
            maximum_mistakes: 2,
            bonus_loss_factor: 0.5,
            starting_lives: 3,
            play_in_turns: true,
            randomize_questions: true,
            sort_questions: true,
            randomize_answers: true,
            first_question: 1,
            presentation_delay_secs: 0.5,
            seed: 42,
        }
    }
}

impl QuizConfig {
    /// Single player, nothing shuffled: the bank is walked as given.
    #[must_use]
    pub fn solo() -> Self {
        Self {
            number_of_players: 1,
            randomize_questions: false,
            randomize_answers: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_players(mut self, count: usize) -> Self {
        self.number_of_players = count;
        self
    }

    #[must_use]
    pub fn with_questions_per_group(mut self, count: usize) -> Self {
        self.questions_per_group = count;
        self
    }

    #[must_use]
    pub fn with_question_limit(mut self, limit: usize) -> Self {
        self.question_limit = limit;
        self
    }

    #[must_use]
    pub fn with_maximum_mistakes(mut self, mistakes: u32) -> Self {
        self.maximum_mistakes = mistakes;
        self
    }

    #[must_use]
    pub fn with_bonus_loss(mut self, factor: f64) -> Self {
        self.bonus_loss_factor = factor;
        self
    }

    #[must_use]
    pub fn with_lives(mut self, lives: u32) -> Self {
        self.starting_lives = lives;
        self
    }

    #[must_use]
    pub fn with_turns(mut self, play_in_turns: bool) -> Self {
        self.play_in_turns = play_in_turns;
        self
    }

    /// Set all three ordering switches at once.
    #[must_use]
    pub fn with_ordering(mut self, randomize_questions: bool, sort: bool, randomize_answers: bool) -> Self {
        self.randomize_questions = randomize_questions;
        self.sort_questions = sort;
        self.randomize_answers = randomize_answers;
        self
    }

    #[must_use]
    pub fn with_first_question(mut self, first: usize) -> Self {
        self.first_question = first;
        self
    }

    #[must_use]
    pub fn with_presentation_delay(mut self, secs: f64) -> Self {
        self.presentation_delay_secs = secs;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Presentation delay as a `Duration`; invalid values collapse to zero.
    #[must_use]
    pub fn presentation_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.presentation_delay_secs).unwrap_or(Duration::ZERO)
    }

    /// Check the numeric settings. Player count is validated against the
    /// roster at match start.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_of_players == 0 {
            return Err(ConfigError::NoActivePlayers);
        }
        if self.questions_per_group == 0 {
            return Err(ConfigError::ZeroQuestionsPerGroup);
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::ZeroStartingLives);
        }
        if self.maximum_mistakes == 0 {
            return Err(ConfigError::ZeroMaximumMistakes);
        }
        if !(0.0..=1.0).contains(&self.bonus_loss_factor) {
            return Err(ConfigError::InvalidBonusLoss(self.bonus_loss_factor));
        }
        Ok(())
    }
}
