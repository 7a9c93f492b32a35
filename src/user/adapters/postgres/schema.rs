//! Diesel schema for user administration persistence.

diesel::table! {
    /// User records; provisioning happens outside this crate.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Login / display name.
        #[max_length = 100]
        username -> Varchar,
        /// Role reference.
        role_id -> Uuid,
        /// Whether the user may be assigned work.
        is_active -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Role catalogue, seeded externally.
    roles (id) {
        /// Role identifier.
        id -> Uuid,
        /// Role name.
        #[max_length = 50]
        name -> Varchar,
    }
}
