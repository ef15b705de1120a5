//! Unit and orchestration tests for the tracker module.

mod action_tests;
mod validation_tests;
