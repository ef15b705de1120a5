//! HTTP-facing surface for task creation.
//!
//! The endpoint consumes the action layer and always answers with a
//! serializable body, never a transport-level error: callers inspect the
//! `success` flag and `message` instead of status codes.

use crate::tracker::domain::Session;
use crate::tracker::ports::{Mailer, TrackerRepository, ViewCache};
use crate::tracker::services::{SESSION_EXPIRED_MESSAGE, TrackerActionService};
use crate::tracker::validation::CreateTaskPayload;
use mockable::Clock;
use serde::Serialize;
use tracing::error;

/// Message returned when task creation succeeds.
const TASK_CREATED_MESSAGE: &str = "A new task was successfully created";

/// Message returned when the request body or the creation itself fails.
const TASK_CREATION_FAILED_MESSAGE: &str = "Error occurred while creating a task!";

/// Response envelope for the create-task endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Human-readable outcome message.
    pub message: String,
}

/// Creates a task for the authenticated caller from a raw JSON body and
/// reports the outcome.
///
/// The session is consulted before the body is parsed. Every failure,
/// including a missing session or a malformed body, is folded into the
/// response body with `success: false`.
pub async fn create_task<R, M, V, C>(
    service: &TrackerActionService<R, M, V, C>,
    session: Option<&Session>,
    body: serde_json::Value,
) -> ApiResponse
where
    R: TrackerRepository,
    M: Mailer,
    V: ViewCache,
    C: Clock + Send + Sync,
{
    if session.is_none() {
        return ApiResponse {
            success: false,
            message: SESSION_EXPIRED_MESSAGE.to_owned(),
        };
    }

    let payload: CreateTaskPayload = match serde_json::from_value(body) {
        Ok(payload) => payload,
        Err(err) => {
            error!(error = %err, "create-task body failed to parse");
            return ApiResponse {
                success: false,
                message: TASK_CREATION_FAILED_MESSAGE.to_owned(),
            };
        }
    };

    match service.create_task(session, payload).await {
        Ok(_) => ApiResponse {
            success: true,
            message: TASK_CREATED_MESSAGE.to_owned(),
        },
        Err(err) => ApiResponse {
            success: false,
            message: err.to_string(),
        },
    }
}
