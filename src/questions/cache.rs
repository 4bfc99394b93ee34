//! Load-once question cache.
//!
//! Question lists fetched from a remote source are expensive to load, so
//! the loader keeps them here for the rest of the process. The cache is
//! populated at most once and never invalidated; later matches reuse the
//! same read-only list.

use std::sync::{Arc, Mutex, OnceLock};

use tracing::debug;

use super::question::Question;

/// Shared, populate-once question list.
#[derive(Debug, Default)]
pub struct QuestionCache {
    questions: OnceLock<Arc<[Question]>>,
    loading: Mutex<()>,
}

impl QuestionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached list, if it has been populated.
    #[must_use]
    pub fn get(&self) -> Option<Arc<[Question]>> {
        self.questions.get().cloned()
    }

    #[must_use]
    pub fn is_populated(&self) -> bool {
        self.questions.get().is_some()
    }

    /// Return the cached list, running `load` only if nothing is cached yet.
    ///
    /// Concurrent callers wait for a single load. A failed load leaves the
    /// cache empty so a later call can try again.
    pub fn get_or_load<E>(
        &self,
        load: impl FnOnce() -> Result<Vec<Question>, E>,
    ) -> Result<Arc<[Question]>, E> {
        if let Some(questions) = self.questions.get() {
            return Ok(Arc::clone(questions));
        }

        // A poisoned lock only means another loader panicked; the cell is
        // still consistent.
        let _guard = self.loading.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(questions) = self.questions.get() {
            return Ok(Arc::clone(questions));
        }

        let loaded: Arc<[Question]> = load()?.into();
        debug!(count = loaded.len(), "question cache populated");
        Ok(Arc::clone(self.questions.get_or_init(|| loaded)))
    }
}
