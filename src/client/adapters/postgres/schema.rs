//! Diesel schema for client directory persistence.

diesel::table! {
    /// Client records.
    clients (id) {
        /// Client identifier.
        id -> Uuid,
        /// Client name.
        #[max_length = 150]
        name -> Varchar,
        /// Optional company name.
        #[max_length = 150]
        company -> Nullable<Varchar>,
        /// Optional phone number.
        #[max_length = 50]
        phone -> Nullable<Varchar>,
        /// Optional email address.
        #[max_length = 150]
        email -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
