//! Payload schema tests.

use crate::tracker::domain::{TaskId, TrackerDomainError};
use crate::tracker::validation::{
    CreateCommentPayload, CreateTaskPayload, LinkRepoPayload, ToggleDonePayload,
};
use rstest::rstest;
use uuid::Uuid;

#[rstest]
fn toggle_payload_deserializes_from_json() {
    let id = Uuid::new_v4();
    let payload: ToggleDonePayload =
        serde_json::from_value(serde_json::json!({ "id": id, "done": true }))
            .expect("valid toggle payload");

    assert_eq!(payload.id, TaskId::from_uuid(id));
    assert!(payload.done);
}

#[rstest]
fn comment_payload_uses_camel_case_task_id() {
    let task_id = Uuid::new_v4();
    let payload: CreateCommentPayload = serde_json::from_value(serde_json::json!({
        "taskId": task_id,
        "text": "Looks good",
    }))
    .expect("valid comment payload");

    assert_eq!(payload.task_id, TaskId::from_uuid(task_id));
    assert_eq!(payload.text, "Looks good");
}

#[rstest]
fn toggle_payload_rejects_non_uuid_id() {
    let result: Result<ToggleDonePayload, _> =
        serde_json::from_value(serde_json::json!({ "id": "task-1", "done": false }));
    assert!(result.is_err());
}

#[rstest]
fn link_payload_validates_link_pattern() {
    let payload = LinkRepoPayload {
        task_id: TaskId::new(),
        link: "https://github.com/acme/widgets".to_owned(),
    };
    let url = payload.repo_url().expect("valid repo link");
    assert_eq!(url.full_name(), "acme/widgets");

    let invalid = LinkRepoPayload {
        task_id: TaskId::new(),
        link: "not-a-url".to_owned(),
    };
    assert_eq!(
        invalid.repo_url(),
        Err(TrackerDomainError::InvalidRepoLink("not-a-url".to_owned()))
    );
}

#[rstest]
fn create_task_payload_defaults_optional_fields() {
    let payload: CreateTaskPayload =
        serde_json::from_value(serde_json::json!({ "title": "Ship the report" }))
            .expect("valid create payload");

    assert_eq!(payload.title, "Ship the report");
    assert!(payload.description.is_none());
    assert!(payload.due.is_none());
}

#[rstest]
fn create_task_payload_parses_rfc3339_due() {
    let payload: CreateTaskPayload = serde_json::from_value(serde_json::json!({
        "title": "Ship the report",
        "due": "2025-03-01T12:00:00Z",
    }))
    .expect("valid create payload");

    let due = payload.due.expect("due should parse");
    assert_eq!(due.to_rfc3339(), "2025-03-01T12:00:00+00:00");
}
