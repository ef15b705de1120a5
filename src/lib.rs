//! Taskmail: personal task tracker core with email notifications.
//!
//! This crate implements the task-mutation-and-notification flow of a
//! personal task tracker: authenticated users create tasks, mark them done,
//! comment, link a GitHub repository, and receive email notifications on
//! state changes.
//!
//! # Architecture
//!
//! Taskmail follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, mail, cache)
//!
//! # Modules
//!
//! - [`tracker`]: mutation actions, validation, and notification dispatch
//! - [`api`]: the HTTP-facing task-creation surface

pub mod api;
pub mod tracker;
