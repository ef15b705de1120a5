//! In-memory view cache recording invalidations.

use std::sync::{Arc, RwLock};

use crate::tracker::ports::{View, ViewCache};

/// View cache that records invalidations and answers staleness queries.
#[derive(Debug, Clone, Default)]
pub struct InMemoryViewCache {
    invalidated: Arc<RwLock<Vec<View>>>,
}

impl InMemoryViewCache {
    /// Creates an empty view cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the invalidations recorded so far, in order.
    #[must_use]
    pub fn invalidations(&self) -> Vec<View> {
        self.invalidated
            .read()
            .map_or_else(|_| Vec::new(), |views| views.clone())
    }

    /// Returns whether the view has been marked stale.
    #[must_use]
    pub fn is_stale(&self, view: View) -> bool {
        self.invalidated
            .read()
            .is_ok_and(|views| views.contains(&view))
    }
}

impl ViewCache for InMemoryViewCache {
    fn invalidate(&self, view: View) {
        if let Ok(mut views) = self.invalidated.write() {
            views.push(view);
        }
    }
}
