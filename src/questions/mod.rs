//! Question data and its containers.
//!
//! - `question`: `Question`, `Answer`, `Media` (the loader-facing data shape)
//! - `bank`: `QuestionBank`, the per-match ordered question list
//! - `category`: `Category` and the multi-category `CategoryCampaign`
//! - `cache`: `QuestionCache`, a load-once list shared across matches
//!
//! Parsing question files is a loader concern; everything here starts from
//! already typed `Question` values.

pub mod question;
pub mod bank;
pub mod category;
pub mod cache;

pub use question::{Answer, Answers, Media, Question};
pub use bank::QuestionBank;
pub use category::{Category, CategoryCampaign};
pub use cache::QuestionCache;
