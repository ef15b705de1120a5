//! Orchestration tests for the mutation actions.

use std::sync::Arc;

use crate::tracker::{
    adapters::memory::{InMemoryTrackerRepository, InMemoryViewCache, RecordingMailer},
    domain::{Author, NewTask, Session, Task, TaskId, TrackerDomainError, UserId},
    ports::{DeliveryReceipt, EmailMessage, Mailer, MailerError, MailerResult, View},
    services::{ActionError, SESSION_EXPIRED_MESSAGE, TrackerActionService},
    validation::{
        CreateCommentPayload, CreateTaskPayload, DeleteTaskPayload, LinkRepoPayload,
        ToggleDonePayload,
    },
};
use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService =
    TrackerActionService<InMemoryTrackerRepository, RecordingMailer, InMemoryViewCache, DefaultClock>;

struct Harness {
    service: TestService,
    repository: InMemoryTrackerRepository,
    mailer: RecordingMailer,
    view_cache: InMemoryViewCache,
}

fn harness_with(mailer: RecordingMailer) -> Harness {
    let repository = InMemoryTrackerRepository::new();
    let view_cache = InMemoryViewCache::new();
    let service = TrackerActionService::new(
        Arc::new(repository.clone()),
        Arc::new(mailer.clone()),
        Arc::new(view_cache.clone()),
        Arc::new(DefaultClock),
    )
    .expect("notification templates should compile");
    Harness {
        service,
        repository,
        mailer,
        view_cache,
    }
}

#[fixture]
fn harness() -> Harness {
    harness_with(RecordingMailer::new())
}

/// Seeds an author with an open task and returns the author's session and
/// the task identifier.
fn seed_task(harness: &Harness) -> (Session, TaskId) {
    let author = Author::new(UserId::new(), "alice@example.com");
    let session = Session::new(author.id(), author.username());
    harness.repository.seed_author(author.clone());

    let task = Task::new(
        NewTask {
            title: "Ship the report".to_owned(),
            description: None,
            due: None,
            author_id: author.id(),
        },
        &DefaultClock,
    );
    let task_id = task.id();
    harness.repository.seed_task(task);
    (session, task_id)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn toggle_done_sets_flag_and_echoes_it(harness: Harness) {
    let (session, task_id) = seed_task(&harness);

    let outcome = harness
        .service
        .toggle_done(Some(&session), ToggleDonePayload {
            id: task_id,
            done: true,
        })
        .await
        .expect("toggle should succeed");

    assert!(outcome.done);
    let stored = harness.repository.task(task_id).expect("task should remain");
    assert!(stored.done());
    assert!(harness.view_cache.is_stale(View::TaskListing));

    let sent = harness.mailer.sent();
    assert_eq!(sent.len(), 1);
    let email = sent.first().expect("one email sent");
    assert_eq!(email.to, "alice@example.com");
    assert_eq!(email.subject, "Task Marked as DONE");
    assert_eq!(email.sender_name, "Todo User");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn toggle_done_back_to_incomplete(harness: Harness) {
    let (session, task_id) = seed_task(&harness);
    harness
        .service
        .toggle_done(Some(&session), ToggleDonePayload {
            id: task_id,
            done: true,
        })
        .await
        .expect("first toggle should succeed");

    let outcome = harness
        .service
        .toggle_done(Some(&session), ToggleDonePayload {
            id: task_id,
            done: false,
        })
        .await
        .expect("second toggle should succeed");

    assert!(!outcome.done);
    let subjects: Vec<String> = harness
        .mailer
        .sent()
        .into_iter()
        .map(|email| email.subject)
        .collect();
    assert_eq!(
        subjects,
        vec![
            "Task Marked as DONE".to_owned(),
            "Task Marked as INCOMPLETE".to_owned()
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn actions_without_session_fail_with_fixed_message(harness: Harness) {
    let (_, task_id) = seed_task(&harness);
    let tasks_before = harness.repository.task_count();

    let toggle = harness
        .service
        .toggle_done(None, ToggleDonePayload {
            id: task_id,
            done: true,
        })
        .await;
    let delete = harness
        .service
        .delete_task(None, DeleteTaskPayload { id: task_id })
        .await;
    let comment = harness
        .service
        .create_comment(None, CreateCommentPayload {
            task_id,
            text: "hello".to_owned(),
        })
        .await;
    let link = harness
        .service
        .link_repo(None, LinkRepoPayload {
            task_id,
            link: "https://github.com/acme/widgets".to_owned(),
        })
        .await;
    let create = harness
        .service
        .create_task(None, CreateTaskPayload {
            title: "Another".to_owned(),
            description: None,
            due: None,
        })
        .await;

    for err in [
        toggle.expect_err("toggle must fail"),
        delete.map(|_| ()).expect_err("delete must fail"),
        comment.map(|_| ()).expect_err("comment must fail"),
        link.map(|_| ()).expect_err("link must fail"),
        create.map(|_| ()).expect_err("create must fail"),
    ] {
        assert!(matches!(err, ActionError::Unauthenticated));
        assert_eq!(err.to_string(), SESSION_EXPIRED_MESSAGE);
    }

    // Zero writes and zero side effects.
    assert_eq!(harness.repository.task_count(), tasks_before);
    assert!(!harness.repository.task(task_id).expect("task kept").done());
    assert!(harness.repository.comments_for(task_id).is_empty());
    assert!(harness.repository.repo_link(task_id).is_none());
    assert!(harness.mailer.sent().is_empty());
    assert!(harness.view_cache.invalidations().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_task_returns_snapshot_and_cascades(harness: Harness) {
    let (session, task_id) = seed_task(&harness);
    harness
        .service
        .create_comment(Some(&session), CreateCommentPayload {
            task_id,
            text: "note to self".to_owned(),
        })
        .await
        .expect("comment should succeed");

    let deleted = harness
        .service
        .delete_task(Some(&session), DeleteTaskPayload { id: task_id })
        .await
        .expect("delete should succeed");

    assert_eq!(deleted.task.id(), task_id);
    assert_eq!(deleted.author.username(), "alice@example.com");
    assert!(harness.repository.task(task_id).is_none());
    assert!(harness.repository.comments_for(task_id).is_empty());
    assert!(harness.view_cache.is_stale(View::TaskListing));

    let last = harness.mailer.sent().pop().expect("deletion email sent");
    assert_eq!(last.subject, "Task Deleted");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_task_on_missing_id_is_generic_failure(harness: Harness) {
    let (session, _) = seed_task(&harness);

    let err = harness
        .service
        .delete_task(Some(&session), DeleteTaskPayload { id: TaskId::new() })
        .await
        .map(|_| ())
        .expect_err("delete of missing task must fail");

    assert!(matches!(err, ActionError::OperationFailed { .. }));
    assert_eq!(err.to_string(), "Error occurred while deleting the task!");
    assert!(harness.mailer.sent().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_comment_persists_and_notifies_author(harness: Harness) {
    let (session, task_id) = seed_task(&harness);

    let created = harness
        .service
        .create_comment(Some(&session), CreateCommentPayload {
            task_id,
            text: "Looks good".to_owned(),
        })
        .await
        .expect("comment should succeed");

    assert_eq!(created.comment.text(), "Looks good");
    assert_eq!(created.comment.sender_id(), session.user_id());
    assert_eq!(created.task.id(), task_id);
    assert_eq!(harness.repository.comments_for(task_id).len(), 1);
    assert!(harness.view_cache.is_stale(View::TaskDetail));

    let email = harness.mailer.sent().pop().expect("comment email sent");
    assert_eq!(email.subject, "New Comment on Your Task");
    assert!(email.html_body.contains("Looks good"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_comment_reports_failure_when_mail_fails_but_row_persists() {
    let harness = harness_with(RecordingMailer::failing());
    let (session, task_id) = seed_task(&harness);

    let err = harness
        .service
        .create_comment(Some(&session), CreateCommentPayload {
            task_id,
            text: "still stored".to_owned(),
        })
        .await
        .map(|_| ())
        .expect_err("mail failure must surface as generic failure");

    assert_eq!(err.to_string(), "Error occurred while creating the comment!");
    // Accepted best-effort inconsistency: the write already committed.
    assert_eq!(harness.repository.comments_for(task_id).len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn link_repo_upserts_and_overwrites(harness: Harness) {
    let (session, task_id) = seed_task(&harness);

    let first = harness
        .service
        .link_repo(Some(&session), LinkRepoPayload {
            task_id,
            link: "https://github.com/acme/widgets".to_owned(),
        })
        .await
        .expect("first link should succeed");
    assert_eq!(first.owner(), "acme");
    assert_eq!(first.repo_name(), "widgets");
    assert_eq!(first.full_name(), "acme/widgets");

    let second = harness
        .service
        .link_repo(Some(&session), LinkRepoPayload {
            task_id,
            link: "https://github.com/other/gadgets".to_owned(),
        })
        .await
        .expect("second link should succeed");
    assert_eq!(second.full_name(), "other/gadgets");

    let stored = harness
        .repository
        .repo_link(task_id)
        .expect("link should persist");
    assert_eq!(stored.owner(), "other");
    assert_eq!(stored.repo_name(), "gadgets");
    assert_eq!(stored.full_name(), "other/gadgets");
    assert!(harness.view_cache.is_stale(View::TaskListing));

    let email = harness.mailer.sent().pop().expect("link email sent");
    assert_eq!(email.subject, "Repository Linked to Task");
    assert!(email.html_body.contains("other/gadgets"));
}

#[rstest]
#[case("", "There is no link")]
#[case("not-a-url", "It's not a GitHub repo link")]
#[tokio::test(flavor = "multi_thread")]
async fn link_repo_rejects_bad_links_without_side_effects(
    harness: Harness,
    #[case] link: &str,
    #[case] expected_message: &str,
) {
    let (session, task_id) = seed_task(&harness);

    let err = harness
        .service
        .link_repo(Some(&session), LinkRepoPayload {
            task_id,
            link: link.to_owned(),
        })
        .await
        .map(|_| ())
        .expect_err("invalid link must fail validation");

    assert!(matches!(
        err,
        ActionError::Validation(TrackerDomainError::EmptyRepoLink
            | TrackerDomainError::InvalidRepoLink(_))
    ));
    assert_eq!(err.to_string(), expected_message);
    assert!(harness.repository.repo_link(task_id).is_none());
    assert!(harness.mailer.sent().is_empty());
    assert!(harness.view_cache.invalidations().is_empty());
}

mockall::mock! {
    pub TestMailer {}

    #[async_trait]
    impl Mailer for TestMailer {
        async fn send(&self, message: &EmailMessage) -> MailerResult<DeliveryReceipt>;
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn toggle_done_hands_rendered_email_to_the_mail_collaborator() {
    let repository = InMemoryTrackerRepository::new();
    let view_cache = InMemoryViewCache::new();

    let mut mailer = MockTestMailer::new();
    mailer
        .expect_send()
        .withf(|message: &EmailMessage| {
            message.to == "alice@example.com"
                && message.subject == "Task Marked as DONE"
                && message.html_body.contains("Ship the report")
        })
        .times(1)
        .returning(|message| {
            Ok(DeliveryReceipt {
                accepted_recipients: vec![message.to.clone()],
            })
        });

    let service = TrackerActionService::new(
        Arc::new(repository.clone()),
        Arc::new(mailer),
        Arc::new(view_cache),
        Arc::new(DefaultClock),
    )
    .expect("notification templates should compile");

    let author = Author::new(UserId::new(), "alice@example.com");
    let session = Session::new(author.id(), author.username());
    repository.seed_author(author.clone());
    let task = Task::new(
        NewTask {
            title: "Ship the report".to_owned(),
            description: None,
            due: None,
            author_id: author.id(),
        },
        &DefaultClock,
    );
    let task_id = task.id();
    repository.seed_task(task);

    let outcome = service
        .toggle_done(Some(&session), ToggleDonePayload {
            id: task_id,
            done: true,
        })
        .await
        .expect("toggle should succeed");
    assert!(outcome.done);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mailer_without_credentials_surfaces_as_generic_failure() {
    let harness = harness_with(RecordingMailer::without_credentials());
    let (session, task_id) = seed_task(&harness);

    let err = harness
        .service
        .toggle_done(Some(&session), ToggleDonePayload {
            id: task_id,
            done: true,
        })
        .await
        .expect_err("missing credentials must surface as generic failure");

    assert_eq!(err.to_string(), "Error occurred while toggling the done state!");
    assert!(matches!(err, ActionError::OperationFailed { .. }));
    if let ActionError::OperationFailed { cause, .. } = err {
        assert!(matches!(
            cause,
            crate::tracker::services::StepFailure::Mail(MailerError::MissingCredentials)
        ));
    }
}
