//! Diesel schema for audit trail persistence.

diesel::table! {
    /// Append-only audit entries for every mutating operation.
    audit_log (id) {
        /// Entry identifier.
        id -> Uuid,
        /// The user who performed the action.
        user_id -> Uuid,
        /// The task the action concerned, when task-scoped.
        task_id -> Nullable<Uuid>,
        /// Action tag, e.g. `TASK_STATUS_CHANGED`.
        #[max_length = 50]
        action -> Varchar,
        /// Free-text detail.
        detail -> Text,
        /// When the entry was recorded.
        created_at -> Timestamptz,
    }
}
