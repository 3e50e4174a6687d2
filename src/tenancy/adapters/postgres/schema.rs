//! Diesel schema for tenant reference data.

diesel::table! {
    /// Tenant roots.
    organizations (id) {
        /// Organization identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Compliance frameworks, unique per organization and name.
    frameworks (id) {
        /// Framework identifier.
        id -> Uuid,
        /// Owning organization.
        organization_id -> Uuid,
        /// Framework name.
        #[max_length = 255]
        name -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Controls, unique per framework and code.
    controls (id) {
        /// Control identifier.
        id -> Uuid,
        /// Owning framework.
        framework_id -> Uuid,
        /// Control code such as `AC-01`.
        #[max_length = 64]
        code -> Varchar,
        /// Human-readable title.
        #[max_length = 255]
        title -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(frameworks -> organizations (organization_id));
diesel::joinable!(controls -> frameworks (framework_id));

diesel::allow_tables_to_appear_in_same_query!(organizations, frameworks, controls);
