//! Application services for the task tracker.

mod actions;
mod notifications;

pub use actions::{
    ActionError, ActionResult, SESSION_EXPIRED_MESSAGE, StepFailure, ToggleOutcome,
    TrackerActionService,
};
pub use notifications::{NotificationDispatcher, NotificationError, NotificationResult};
