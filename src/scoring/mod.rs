//! Player scores, lives, mistakes and turn order.
//!
//! `ScoreBoard` owns every active player and the bonus of the question in
//! play. It never decides what question comes next or when the match ends;
//! it only reports what an answer did.

pub mod player;
pub mod scoreboard;

pub use player::Player;
pub use scoreboard::{MissReason, Outcome, Ranking, ScoreBoard, Verdict};
