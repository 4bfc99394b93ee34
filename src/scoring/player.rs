//! Per-player match state.

use serde::{Deserialize, Serialize};

use crate::core::{Color, PlayerId, PlayerProfile};

/// An active player's score, lives and mistakes on the current question.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: Color,
    /// Accumulated (possibly fractional) bonus.
    pub score: f64,
    pub lives: u32,
    pub mistakes_this_question: u32,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, profile: &PlayerProfile, lives: u32) -> Self {
        Self {
            id,
            name: profile.name.clone(),
            color: profile.color,
            score: 0.0,
            lives,
            mistakes_this_question: 0,
        }
    }

    /// Score as shown to players.
    #[must_use]
    pub fn display_score(&self) -> i64 {
        self.score.round() as i64
    }

    /// Out of lives; skipped in turn rotation.
    #[must_use]
    pub fn is_eliminated(&self) -> bool {
        self.lives == 0
    }

    /// Take one life, never going below zero.
    pub(crate) fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }
}
