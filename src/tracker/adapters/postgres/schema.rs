//! Diesel schema for tracker persistence.
//!
//! `comments.task_id` and `repo_links.task_id` carry `ON DELETE CASCADE`
//! in the migrations, so deleting a task removes its comments and
//! repository link at the database layer.

diesel::table! {
    /// Externally managed author records.
    authors (id) {
        /// Author identifier.
        id -> Uuid,
        /// Username, used as the notification recipient address.
        #[max_length = 255]
        username -> Varchar,
    }
}

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Optional due timestamp.
        due -> Nullable<Timestamptz>,
        /// Done flag.
        done -> Bool,
        /// Owning author.
        author_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comment records attached to tasks.
    comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Commented task.
        task_id -> Uuid,
        /// Comment sender.
        sender_id -> Uuid,
        /// Comment text.
        text -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Repository links, one per task.
    repo_links (task_id) {
        /// Linked task identifier, also the primary key.
        task_id -> Uuid,
        /// Repository owner segment.
        #[max_length = 255]
        owner -> Varchar,
        /// Repository name segment.
        #[max_length = 255]
        repo_name -> Varchar,
        /// Combined `owner/repo` name.
        #[max_length = 511]
        full_name -> Varchar,
    }
}

diesel::joinable!(tasks -> authors (author_id));
diesel::joinable!(comments -> tasks (task_id));
diesel::joinable!(repo_links -> tasks (task_id));

diesel::allow_tables_to_appear_in_same_query!(authors, tasks, comments, repo_links);
