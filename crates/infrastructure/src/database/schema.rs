// Database schema for the blog application
diesel::table! {
    users (id) {
        id -> Integer,
        username -> Text,          // unique across all accounts
        email -> Text,             // unique across all accounts
        image_file -> Text,        // avatar filename under the static area
        password_hash -> Text,     // bcrypt output, never the plaintext
    }
}

diesel::table! {
    posts (id) {
        id -> Integer,
        title -> Text,
        content -> Text,
        date_posted -> Timestamp,  // creation instant (UTC), never rewritten
        user_id -> Integer,        // author
    }
}

diesel::joinable!(posts -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, posts);
