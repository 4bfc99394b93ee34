//! Categories and the multi-category campaign.
//!
//! A category is a named question list. The campaign tracks which
//! categories have been played and how many matches have been won; the
//! player wins the campaign after `categories_to_victory` category wins.
//! Choosing *which* category (the wheel) is the host's business.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::question::Question;
use crate::core::{Color, ConfigError, QuizRng};

/// A named group of questions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub color: Color,
    /// Icon asset reference, resolved by the presentation layer.
    #[serde(default)]
    pub icon: Option<String>,
    pub questions: Vec<Question>,
}

impl Category {
    pub fn new(name: impl Into<String>, color: Color, questions: Vec<Question>) -> Self {
        Self {
            name: name.into(),
            color,
            icon: None,
            questions,
        }
    }
}

/// Progress through a set of categories.
#[derive(Clone, Debug)]
pub struct CategoryCampaign {
    categories: Vec<Category>,
    used: FxHashSet<usize>,
    wins: usize,
    categories_to_victory: usize,
}

impl CategoryCampaign {
    /// The target is clamped to the number of categories.
    #[must_use]
    pub fn new(categories: Vec<Category>, categories_to_victory: usize) -> Self {
        let categories_to_victory = categories_to_victory.min(categories.len());
        Self {
            categories,
            used: FxHashSet::default(),
            wins: 0,
            categories_to_victory,
        }
    }

    /// Randomize category order. Only meaningful before any selection.
    pub fn shuffle(&mut self, rng: &mut QuizRng) {
        rng.shuffle(&mut self.categories);
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Categories not yet played, with their positions.
    pub fn available(&self) -> impl Iterator<Item = (usize, &Category)> {
        self.categories
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.used.contains(i))
    }

    #[must_use]
    pub fn is_used(&self, index: usize) -> bool {
        self.used.contains(&index)
    }

    /// Mark a category as played and hand back its questions.
    pub fn select(&mut self, index: usize) -> Result<&Category, ConfigError> {
        let count = self.categories.len();
        let category = self
            .categories
            .get(index)
            .ok_or(ConfigError::CategoryOutOfRange { index, count })?;
        if self.used.contains(&index) {
            return Err(ConfigError::CategoryAlreadyUsed(category.name.clone()));
        }
        self.used.insert(index);
        info!(category = %category.name, "category selected");
        Ok(category)
    }

    /// Count a won match toward the campaign.
    pub fn record_victory(&mut self) {
        self.wins += 1;
    }

    #[must_use]
    pub fn wins(&self) -> usize {
        self.wins
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.wins >= self.categories_to_victory
    }

    /// Every category has been played.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.used.len() == self.categories.len()
    }
}
