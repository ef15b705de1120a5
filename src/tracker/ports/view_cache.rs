//! View-cache port for rendered-page invalidation.

/// Logical cached view affected by a mutation.
///
/// Views are identified by their route pattern, mirroring the rendering
/// layer's cache keys; invalidating a view marks every cached instance of
/// the pattern stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Per-user task listing page.
    TaskListing,
    /// Task detail page with its comments.
    TaskDetail,
}

impl View {
    /// Returns the route pattern identifying the view.
    #[must_use]
    pub const fn route_pattern(self) -> &'static str {
        match self {
            Self::TaskListing => "/[username]",
            Self::TaskDetail => "/[username]/[taskId]",
        }
    }
}

/// Invalidation contract for cached rendered views.
///
/// Invalidation happens after persistence and before the action returns;
/// no ordering guarantee beyond that is offered.
pub trait ViewCache: Send + Sync {
    /// Marks the view stale so the next request recomputes it.
    fn invalidate(&self, view: View);
}
