//! Port contracts for the task tracker.
//!
//! Ports define infrastructure-agnostic interfaces used by tracker
//! services: persistence, mail delivery, and view-cache invalidation.

pub mod mailer;
pub mod repository;
pub mod view_cache;

pub use mailer::{DeliveryReceipt, EmailMessage, Mailer, MailerError, MailerResult};
pub use repository::{TrackerRepository, TrackerRepositoryError, TrackerRepositoryResult};
pub use view_cache::{View, ViewCache};
