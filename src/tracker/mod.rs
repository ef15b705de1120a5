//! Task-mutation-and-notification core.
//!
//! Implements the tracker's server-side actions: validate input, mutate
//! persisted task state, invalidate cached views, and send email
//! notifications, all gated by session-derived authorization. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Payload schemas in [`validation`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
