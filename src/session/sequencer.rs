//! Difficulty-group walk over a bonus-sorted bank.
//!
//! Questions sharing a bonus value form a group. The sequencer serves
//! questions in bank order until `questions_per_group` of the current group
//! have been completed, then jumps to the first question with a strictly
//! higher bonus, skipping what is left of the group.

use crate::questions::QuestionBank;

/// What to ask next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Serve the question at this bank index.
    Serve(usize),
    /// Nothing left to ask.
    Done,
}

/// Decides which question index comes next.
#[derive(Clone, Debug)]
pub struct GroupSequencer {
    base_per_group: usize,
    questions_per_group: usize,
    grouping: bool,
    first_index: usize,
    cursor: Option<usize>,
    group_bonus: Option<f64>,
    completed_in_group: usize,
}

impl GroupSequencer {
    /// `first_question` is 1-based. Without grouping the per-group quota is
    /// the bank length, so a group is never cut short.
    #[must_use]
    pub fn new(
        base_per_group: usize,
        player_count: usize,
        grouping: bool,
        bank_len: usize,
        first_question: usize,
    ) -> Self {
        let mut sequencer = Self {
            base_per_group,
            questions_per_group: bank_len,
            grouping,
            first_index: first_question.saturating_sub(1),
            cursor: None,
            group_bonus: None,
            completed_in_group: 0,
        };
        sequencer.set_player_count(player_count);
        sequencer
    }

    /// Scale the quota so every player gets the same share of a group.
    pub fn set_player_count(&mut self, player_count: usize) {
        if self.grouping {
            self.questions_per_group = self.base_per_group * player_count.max(1);
        }
    }

    #[must_use]
    pub fn questions_per_group(&self) -> usize {
        self.questions_per_group
    }

    /// Bank index of the question last served.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub fn group_bonus(&self) -> Option<f64> {
        self.group_bonus
    }

    #[must_use]
    pub fn completed_in_group(&self) -> usize {
        self.completed_in_group
    }

    /// Count the served question as finished, right or wrong.
    pub fn record_completed(&mut self) {
        self.completed_in_group += 1;
    }

    /// The step `advance` would take, without taking it.
    #[must_use]
    pub fn peek(&self, bank: &QuestionBank) -> Step {
        let len = bank.len();
        let next = match self.cursor {
            None => Some(self.first_index),
            Some(cursor) if self.completed_in_group < self.questions_per_group => Some(cursor + 1),
            Some(cursor) => {
                let bonus = bank[cursor].bonus;
                (cursor + 1..len).find(|&i| bank[i].bonus > bonus)
            }
        };
        match next {
            Some(index) if index < len => Step::Serve(index),
            _ => Step::Done,
        }
    }

    /// Move to the next question. The in-group counter resets whenever the
    /// served question's bonus differs from the current group's.
    pub fn advance(&mut self, bank: &QuestionBank) -> Step {
        let step = self.peek(bank);
        if let Step::Serve(index) = step {
            let bonus = bank[index].bonus;
            if self.group_bonus != Some(bonus) {
                self.group_bonus = Some(bonus);
                self.completed_in_group = 0;
            }
            self.cursor = Some(index);
        }
        step
    }
}
