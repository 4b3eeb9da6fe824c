//! Diesel table definitions. Must match `backend/migrations`.

diesel::table! {
    /// Users referenced by registros.
    users (id) {
        id -> Uuid,
        display_name -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registro documents.
    ///
    /// `user_id` is a plain reference without a foreign key so that a
    /// registro may outlive its owner.
    registros (id) {
        id -> Uuid,
        user_id -> Nullable<Uuid>,
        /// Client-supplied fields as a JSON object.
        fields -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, registros);
