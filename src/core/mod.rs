//! Core engine types: players, RNG, configuration, errors.
//!
//! These are the building blocks every other module leans on. None of them
//! know about questions or sessions.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{Color, PlayerId, PlayerMap, PlayerProfile};
pub use rng::QuizRng;
pub use config::QuizConfig;
pub use error::{ConfigError, SessionError};
