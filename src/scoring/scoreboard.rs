//! Scores, lives, bonus decay, turn order and final ranking.
//!
//! ## Bonus decay
//!
//! Each question starts at its nominal bonus. Every wrong answer multiplies
//! the remaining bonus by the loss factor; reaching the mistake limit zeroes
//! it, costs a life, and loses the question. A correct answer credits
//! whatever is left.
//!
//! ```
//! use quiz_engine::core::{Color, PlayerId, PlayerProfile};
//! use quiz_engine::scoring::{Outcome, ScoreBoard, Verdict};
//!
//! let roster = [PlayerProfile::new("Ada", Color::default())];
//! let mut board = ScoreBoard::new(&roster, 1, 3, 0.5, 3).unwrap();
//! let ada = PlayerId::new(0);
//!
//! board.begin_question(40.0);
//! board.record_wrong(ada);
//! assert_eq!(board.record_correct(ada), Verdict::Resolved(Outcome::Correct { awarded: 20.0 }));
//! assert_eq!(board.player(ada).score, 20.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::player::Player;
use crate::core::{ConfigError, PlayerId, PlayerMap, PlayerProfile};

/// Why a question was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissReason {
    /// Too many wrong answers.
    MistakeLimit,
    /// The answer window ran out.
    Timeout,
}

/// How a question ended.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    Correct { awarded: f64 },
    Incorrect(MissReason),
    /// Skipped by the host; score and lives untouched.
    Skipped,
}

impl Outcome {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, Outcome::Correct { .. })
    }
}

/// Result of recording one answer event.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Verdict {
    /// Wrong, but the player may try again.
    Pending { bonus_remaining: f64, mistakes_left: u32 },
    /// The question is over.
    Resolved(Outcome),
}

/// Final standings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    /// Active players, highest score first; ties keep seat order.
    pub players: Vec<Player>,
    /// Players sharing the top score.
    pub winner_count: usize,
}

impl Ranking {
    pub fn winners(&self) -> &[Player] {
        &self.players[..self.winner_count]
    }

    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.winner_count > 1
    }

    /// One-line announcement of the result.
    #[must_use]
    pub fn result_text(&self) -> String {
        let Some(top) = self.players.first() else {
            return String::new();
        };
        let points = top.display_score();
        match self.winners() {
            [single] => format!("{} wins with {} points!", single.name, points),
            [rest @ .., last] => {
                let names: Vec<&str> = rest.iter().map(|p| p.name.as_str()).collect();
                format!(
                    "It's a draw between {} and {}, each with {} points!",
                    names.join(", "),
                    last.name,
                    points
                )
            }
            [] => String::new(),
        }
    }
}

/// Per-player state plus the bonus of the question in play.
#[derive(Clone, Debug)]
pub struct ScoreBoard {
    players: PlayerMap<Player>,
    benched: Vec<PlayerProfile>,
    current: PlayerId,
    nominal_bonus: f64,
    bonus: f64,
    bonus_loss_factor: f64,
    maximum_mistakes: u32,
}

impl ScoreBoard {
    /// Seat the first `active` profiles of the roster; the rest are benched.
    ///
    /// `active` is clamped to the roster size; an empty result is an error.
    pub fn new(
        roster: &[PlayerProfile],
        active: usize,
        starting_lives: u32,
        bonus_loss_factor: f64,
        maximum_mistakes: u32,
    ) -> Result<Self, ConfigError> {
        let active = active.min(roster.len()).min(255);
        let seated: Vec<Player> = roster[..active]
            .iter()
            .enumerate()
            .map(|(i, profile)| Player::new(PlayerId::new(i as u8), profile, starting_lives))
            .collect();
        let players = PlayerMap::from_vec(seated).ok_or(ConfigError::NoActivePlayers)?;

        Ok(Self {
            players,
            benched: roster[active..].to_vec(),
            current: PlayerId::new(0),
            nominal_bonus: 0.0,
            bonus: 0.0,
            bonus_loss_factor,
            maximum_mistakes,
        })
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    /// Seats not taking part in this match.
    #[must_use]
    pub fn benched(&self) -> &[PlayerProfile] {
        &self.benched
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current(&self) -> PlayerId {
        self.current
    }

    /// Bonus still on offer for the question in play.
    #[must_use]
    pub fn current_bonus(&self) -> f64 {
        self.bonus
    }

    #[must_use]
    pub fn nominal_bonus(&self) -> f64 {
        self.nominal_bonus
    }

    /// Reset the bonus and everyone's mistakes for a new question.
    pub fn begin_question(&mut self, nominal_bonus: f64) {
        self.nominal_bonus = nominal_bonus;
        self.bonus = nominal_bonus;
        for (_, player) in self.players.iter_mut() {
            player.mistakes_this_question = 0;
        }
    }

    /// A wrong answer: decay the bonus, count the mistake, and lose the
    /// question once the mistake limit is reached.
    pub fn record_wrong(&mut self, id: PlayerId) -> Verdict {
        self.bonus *= self.bonus_loss_factor;
        let player = &mut self.players[id];
        player.mistakes_this_question += 1;

        if player.mistakes_this_question >= self.maximum_mistakes {
            self.bonus = 0.0;
            player.lose_life();
            debug!(player = %id, lives = player.lives, "mistake limit reached");
            return Verdict::Resolved(Outcome::Incorrect(MissReason::MistakeLimit));
        }

        Verdict::Pending {
            bonus_remaining: self.bonus,
            mistakes_left: self.maximum_mistakes - player.mistakes_this_question,
        }
    }

    /// A correct answer: credit the bonus that is left.
    pub fn record_correct(&mut self, id: PlayerId) -> Verdict {
        let awarded = self.bonus;
        let player = &mut self.players[id];
        player.score += awarded;
        debug!(player = %id, awarded, score = player.score, "bonus credited");
        Verdict::Resolved(Outcome::Correct { awarded })
    }

    /// The answer window ran out: one life, regardless of mistakes.
    pub fn record_timeout(&mut self, id: PlayerId) -> Verdict {
        let player = &mut self.players[id];
        player.lose_life();
        debug!(player = %id, lives = player.lives, "timed out");
        Verdict::Resolved(Outcome::Incorrect(MissReason::Timeout))
    }

    /// Pass the turn to the next player still in the game.
    ///
    /// A no-op when turns are off or only one player remains.
    pub fn next_turn(&mut self, play_in_turns: bool) -> PlayerId {
        if !play_in_turns {
            return self.current;
        }
        let count = self.player_count();
        let mut candidate = self.current;
        for _ in 0..count {
            candidate = candidate.next(count);
            if !self.players[candidate].is_eliminated() {
                self.current = candidate;
                break;
            }
        }
        self.current
    }

    /// Whether anyone can still answer.
    ///
    /// With turns on, any player with lives left keeps the match going.
    /// With turns off only the answering player counts.
    #[must_use]
    pub fn can_continue(&self, play_in_turns: bool) -> bool {
        if play_in_turns {
            self.players.values().any(|p| !p.is_eliminated())
        } else {
            !self.players[self.current].is_eliminated()
        }
    }

    /// Active players by descending score.
    ///
    /// Winners are the players whose score equals the top score after the
    /// sort; nobody below the top counts, even if tied among themselves.
    #[must_use]
    pub fn rank_players(&self) -> Ranking {
        let mut players: Vec<Player> = self.players.values().cloned().collect();
        players.sort_by(|a, b| b.score.total_cmp(&a.score));

        let top = players[0].score;
        let mut winner_count = 0;
        for (index, player) in players.iter().enumerate() {
            if index == 0 {
                winner_count = 1;
            } else if player.score == top {
                winner_count += 1;
            }
        }

        Ranking {
            players,
            winner_count,
        }
    }
}
