//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        #[max_length = 255]
        id -> Varchar,
        /// Owner of the task.
        #[max_length = 255]
        user_id -> Varchar,
        /// Task title.
        #[max_length = 200]
        title -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Task lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Latest mutation timestamp.
        updated_at -> Nullable<Timestamptz>,
        /// Completion timestamp.
        completed_at -> Nullable<Timestamptz>,
    }
}
