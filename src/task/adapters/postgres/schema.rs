//! Diesel schema for task and evidence persistence.

diesel::table! {
    /// Compliance tasks, each owned by one organization.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning organization.
        organization_id -> Uuid,
        /// Control the task addresses.
        control_id -> Uuid,
        /// Task name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Task category.
        #[max_length = 50]
        category -> Varchar,
        /// Task status.
        #[max_length = 50]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Evidence items; rows cascade when their task is deleted.
    evidence (id) {
        /// Evidence identifier.
        id -> Uuid,
        /// Owning task.
        task_id -> Uuid,
        /// Evidence type.
        #[max_length = 50]
        evidence_type -> Varchar,
        /// Optional note.
        note -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(evidence -> tasks (task_id));

diesel::allow_tables_to_appear_in_same_query!(tasks, evidence);
