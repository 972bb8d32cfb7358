//! Diesel table definitions.
//!
//! Must match `migrations/`; regenerate with `diesel print-schema` after a
//! migration changes.

diesel::table! {
    /// Idea authors.
    users (id) {
        id -> Uuid,
        display_name -> Varchar,
        /// Back-references to authored ideas in pitch order.
        idea_ids -> Array<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    ideas (id) {
        id -> Uuid,
        name -> Text,
        description -> Text,
        pitch -> Text,
        category -> Text,
        cover_image -> Text,
        /// Owner; cascades on user deletion.
        user_id -> Uuid,
        /// Set of users who liked the idea.
        likes -> Array<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(ideas -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(ideas, users);
