//! `PostgreSQL` repository implementation for tracker persistence.

use super::{
    models::{AuthorRow, NewCommentRow, NewTaskRow, RepoLinkRow, TaskRow},
    schema::{authors, comments, repo_links, tasks},
};
use crate::tracker::domain::{
    Author, Comment, CommentWithContext, PersistedTaskData, RepoLink, Task, TaskId,
    TaskWithAuthor, UserId,
};
use crate::tracker::ports::{TrackerRepository, TrackerRepositoryError, TrackerRepositoryResult};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by tracker adapters.
pub type TrackerPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed tracker repository.
#[derive(Debug, Clone)]
pub struct PostgresTrackerRepository {
    pool: TrackerPgPool,
}

impl PostgresTrackerRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TrackerPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TrackerRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TrackerRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TrackerRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TrackerRepositoryError::persistence)?
    }
}

#[async_trait]
impl TrackerRepository for PostgresTrackerRepository {
    async fn create_task(&self, task: &Task) -> TrackerRepositoryResult<()> {
        let author_id = task.author_id();
        let new_row = to_new_task_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TrackerRepositoryError::AuthorNotFound(author_id)
                    }
                    _ => TrackerRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn set_task_done(
        &self,
        id: TaskId,
        done: bool,
    ) -> TrackerRepositoryResult<TaskWithAuthor> {
        self.run_blocking(move |connection| {
            let row = diesel::update(tasks::table.find(id.into_inner()))
                .set(tasks::done.eq(done))
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TrackerRepositoryError::persistence)?
                .ok_or(TrackerRepositoryError::TaskNotFound(id))?;
            join_author(connection, row)
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> TrackerRepositoryResult<TaskWithAuthor> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TrackerRepositoryError::persistence)?
                .ok_or(TrackerRepositoryError::TaskNotFound(id))?;
            let snapshot = join_author(connection, row)?;

            // Comments and the repo link cascade via the foreign keys.
            diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TrackerRepositoryError::persistence)?;
            Ok(snapshot)
        })
        .await
    }

    async fn create_comment(
        &self,
        comment: &Comment,
    ) -> TrackerRepositoryResult<CommentWithContext> {
        let task_id = comment.task_id();
        let new_row = to_new_comment_row(comment);
        let created = comment.clone();

        self.run_blocking(move |connection| {
            diesel::insert_into(comments::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TrackerRepositoryError::TaskNotFound(task_id)
                    }
                    _ => TrackerRepositoryError::persistence(err),
                })?;

            let row = tasks::table
                .find(task_id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TrackerRepositoryError::persistence)?
                .ok_or(TrackerRepositoryError::TaskNotFound(task_id))?;
            let context = join_author(connection, row)?;

            Ok(CommentWithContext {
                comment: created,
                task: context.task,
                author: context.author,
            })
        })
        .await
    }

    async fn upsert_repo_link(&self, link: &RepoLink) -> TrackerRepositoryResult<RepoLink> {
        let task_id = link.task_id();
        let row = to_repo_link_row(link);

        self.run_blocking(move |connection| {
            let stored = diesel::insert_into(repo_links::table)
                .values(&row)
                .on_conflict(repo_links::task_id)
                .do_update()
                .set((
                    repo_links::owner.eq(&row.owner),
                    repo_links::repo_name.eq(&row.repo_name),
                    repo_links::full_name.eq(&row.full_name),
                ))
                .get_result::<RepoLinkRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TrackerRepositoryError::TaskNotFound(task_id)
                    }
                    _ => TrackerRepositoryError::persistence(err),
                })?;
            Ok(row_to_repo_link(stored))
        })
        .await
    }

    async fn find_task_with_author(
        &self,
        id: TaskId,
    ) -> TrackerRepositoryResult<Option<TaskWithAuthor>> {
        self.run_blocking(move |connection| {
            let found = tasks::table
                .inner_join(authors::table)
                .filter(tasks::id.eq(id.into_inner()))
                .select((TaskRow::as_select(), AuthorRow::as_select()))
                .first::<(TaskRow, AuthorRow)>(connection)
                .optional()
                .map_err(TrackerRepositoryError::persistence)?;
            Ok(found.map(|(task_row, author_row)| TaskWithAuthor {
                task: row_to_task(task_row),
                author: row_to_author(author_row),
            }))
        })
        .await
    }
}

fn join_author(
    connection: &mut PgConnection,
    row: TaskRow,
) -> TrackerRepositoryResult<TaskWithAuthor> {
    let author_id = UserId::from_uuid(row.author_id);
    let author_row = authors::table
        .find(row.author_id)
        .select(AuthorRow::as_select())
        .first::<AuthorRow>(connection)
        .optional()
        .map_err(TrackerRepositoryError::persistence)?
        .ok_or(TrackerRepositoryError::AuthorNotFound(author_id))?;
    Ok(TaskWithAuthor {
        task: row_to_task(row),
        author: row_to_author(author_row),
    })
}

fn to_new_task_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        due: task.due(),
        done: task.done(),
        author_id: task.author_id().into_inner(),
        created_at: task.created_at(),
    }
}

fn to_new_comment_row(comment: &Comment) -> NewCommentRow {
    NewCommentRow {
        id: comment.id().into_inner(),
        task_id: comment.task_id().into_inner(),
        sender_id: comment.sender_id().into_inner(),
        text: comment.text().to_owned(),
        created_at: comment.created_at(),
    }
}

fn to_repo_link_row(link: &RepoLink) -> RepoLinkRow {
    RepoLinkRow {
        task_id: link.task_id().into_inner(),
        owner: link.owner().to_owned(),
        repo_name: link.repo_name().to_owned(),
        full_name: link.full_name().to_owned(),
    }
}

fn row_to_task(row: TaskRow) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        title: row.title,
        description: row.description,
        due: row.due,
        done: row.done,
        author_id: UserId::from_uuid(row.author_id),
        created_at: row.created_at,
    })
}

fn row_to_author(row: AuthorRow) -> Author {
    Author::new(UserId::from_uuid(row.id), row.username)
}

fn row_to_repo_link(row: RepoLinkRow) -> RepoLink {
    RepoLink::from_persisted(
        TaskId::from_uuid(row.task_id),
        row.owner,
        row.repo_name,
        row.full_name,
    )
}
