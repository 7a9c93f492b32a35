//! Diesel schema for task workflow persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Client the task is performed for.
        client_id -> Uuid,
        /// Optional assignee.
        assigned_to -> Nullable<Uuid>,
        /// Optional creator reference.
        created_by -> Nullable<Uuid>,
        /// Task title.
        #[max_length = 200]
        title -> Varchar,
        /// Optional long-form description.
        description -> Nullable<Text>,
        /// Scheduling priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Optional scheduled start.
        start_date -> Nullable<Date>,
        /// Optional scheduled deadline.
        due_date -> Nullable<Date>,
        /// Current status reference.
        status_id -> Uuid,
        /// Completion percentage, 0–100.
        completion_percentage -> Int2,
        /// Set exactly while the task sits in the terminal status.
        completed_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Latest mutation timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Status catalog; `name` carries a unique index.
    statuses (id) {
        /// Status identifier.
        id -> Uuid,
        /// Status name, unique.
        #[max_length = 100]
        name -> Varchar,
    }
}

diesel::table! {
    /// Append-only status transition history.
    task_status_history (id) {
        /// History record identifier.
        id -> Uuid,
        /// The task that moved.
        task_id -> Uuid,
        /// The user who requested the transition.
        changed_by -> Uuid,
        /// Status held before the transition.
        from_status_id -> Uuid,
        /// Status held after the transition.
        to_status_id -> Uuid,
        /// Optional free-text note.
        note -> Nullable<Text>,
        /// When the transition was applied.
        changed_at -> Timestamptz,
    }
}

diesel::joinable!(task_status_history -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, statuses, task_status_history);
