//! The question bank for one match.
//!
//! Built once from loader data, optionally shuffled and sorted at match
//! start, then only read. Sorting by bonus is what forms the difficulty
//! groups; there is no explicit group field.

use std::ops::Index;

use tracing::debug;

use super::question::Question;
use crate::core::{ConfigError, QuizRng};

/// Ordered collection of validated questions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Copy and validate a question list.
    ///
    /// An empty list is legal (the match is won immediately). A question
    /// without answers, or without a correct one, is rejected here rather
    /// than when it is asked.
    pub fn load(questions: &[Question]) -> Result<Self, ConfigError> {
        for (index, question) in questions.iter().enumerate() {
            question.validate(index)?;
        }
        debug!(count = questions.len(), "question bank loaded");
        Ok(Self {
            questions: questions.to_vec(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Bonus values in bank order.
    pub fn bonuses(&self) -> impl Iterator<Item = f64> + '_ {
        self.questions.iter().map(|q| q.bonus)
    }

    /// Uniform random permutation of the questions.
    pub fn shuffle(&mut self, rng: &mut QuizRng) {
        rng.shuffle(&mut self.questions);
    }

    /// Uniform random permutation of one question's answers.
    ///
    /// Correctness travels with each `Answer`, so evaluation is unaffected.
    pub fn shuffle_answers(&mut self, index: usize, rng: &mut QuizRng) {
        if let Some(question) = self.questions.get_mut(index) {
            rng.shuffle(&mut question.answers);
        }
    }

    /// Stable sort by ascending bonus; ties keep their current order.
    pub fn sort_by_bonus_ascending(&mut self) {
        self.questions.sort_by(|a, b| a.bonus.total_cmp(&b.bonus));
    }
}

impl Index<usize> for QuestionBank {
    type Output = Question;

    fn index(&self, index: usize) -> &Self::Output {
        &self.questions[index]
    }
}
