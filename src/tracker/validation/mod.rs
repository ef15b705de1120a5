//! Input validation for action payloads.
//!
//! Validation short-circuits before any persistence or notification side
//! effect; failures carry user-facing messages distinct from the generic
//! operation failure.

mod payloads;

pub use payloads::{
    CreateCommentPayload, CreateTaskPayload, DeleteTaskPayload, LinkRepoPayload, ToggleDonePayload,
};
