//! In-memory adapters for the tracker ports.

mod mailer;
mod repository;
mod view_cache;

pub use mailer::RecordingMailer;
pub use repository::InMemoryTrackerRepository;
pub use view_cache::InMemoryViewCache;
