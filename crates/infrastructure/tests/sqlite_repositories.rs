use chrono::{TimeZone, Utc};
use domain::{DomainError, Post, PostRepository, User, UserRepository};
use infrastructure::{Database, SqlitePostRepository, SqliteUserRepository};

fn open_database(dir: &tempfile::TempDir) -> Database {
    let path = dir.path().join("blog.db");
    std::fs::File::create(&path).unwrap();
    let database = Database::new(path.to_str().unwrap());
    database.ensure_schema();
    database
}

fn user(username: &str, email: &str) -> User {
    User::new(username.to_string(), email.to_string(), "hash".to_string())
}

fn dated_post(title: &str, day: u32, author_id: i32) -> Post {
    let mut post = Post::new(title.to_string(), format!("content of {title}"), author_id);
    post.date_posted = Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap();
    post
}

#[tokio::test]
async fn save_assigns_ids_and_roundtrips_users() {
    let dir = tempfile::tempdir().unwrap();
    let database = open_database(&dir);
    let users = SqliteUserRepository::new(database.get_pool().clone());

    let alice = users.save(&user("alice", "a@x.com")).await.unwrap();
    assert_eq!(alice.id, Some(1));
    assert_eq!(alice.image_file, "default.jpg");

    let by_name = users.find_by_username("alice").await.unwrap().unwrap();
    assert_eq!(by_name, alice);
    let by_email = users.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(by_email, alice);
    assert!(users.find_by_username("ghost").await.unwrap().is_none());
}

#[tokio::test]
async fn unique_constraints_surface_the_offending_field() {
    let dir = tempfile::tempdir().unwrap();
    let database = open_database(&dir);
    let users = SqliteUserRepository::new(database.get_pool().clone());

    users.save(&user("alice", "a@x.com")).await.unwrap();

    let err = users
        .save(&user("alice", "other@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { field: "username" }));

    let err = users.save(&user("other", "a@x.com")).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict { field: "email" }));

    // A failed insert must not leave a partial row behind.
    assert!(users.find_by_email("other@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn update_collisions_map_like_inserts() {
    let dir = tempfile::tempdir().unwrap();
    let database = open_database(&dir);
    let users = SqliteUserRepository::new(database.get_pool().clone());

    let alice = users.save(&user("alice", "a@x.com")).await.unwrap();
    users.save(&user("bob", "b@x.com")).await.unwrap();

    // Rewriting one's own values is a no-op collision-wise.
    let unchanged = users.update(&alice).await.unwrap();
    assert_eq!(unchanged, alice);

    let mut renamed = alice.clone();
    renamed.email = "b@x.com".to_string();
    let err = users.update(&renamed).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict { field: "email" }));
}

#[tokio::test]
async fn feeds_are_newest_first_and_paged() {
    let dir = tempfile::tempdir().unwrap();
    let database = open_database(&dir);
    let users = SqliteUserRepository::new(database.get_pool().clone());
    let posts = SqlitePostRepository::new(database.get_pool().clone());

    let alice = users.save(&user("alice", "a@x.com")).await.unwrap();
    let alice_id = alice.id.unwrap();
    for day in 1..=7 {
        posts
            .save(&dated_post(&format!("t{day}"), day, alice_id))
            .await
            .unwrap();
    }

    let first = posts.list(1, 5).await.unwrap();
    let titles: Vec<_> = first.items.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["t7", "t6", "t5", "t4", "t3"]);
    assert_eq!(first.total, 7);
    assert!(first.has_next());

    let second = posts.list(2, 5).await.unwrap();
    let titles: Vec<_> = second.items.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["t2", "t1"]);
    assert!(!second.has_next());
}

#[tokio::test]
async fn author_feed_only_lists_that_author() {
    let dir = tempfile::tempdir().unwrap();
    let database = open_database(&dir);
    let users = SqliteUserRepository::new(database.get_pool().clone());
    let posts = SqlitePostRepository::new(database.get_pool().clone());

    let alice = users.save(&user("alice", "a@x.com")).await.unwrap();
    let bob = users.save(&user("bob", "b@x.com")).await.unwrap();
    posts
        .save(&dated_post("from-alice", 1, alice.id.unwrap()))
        .await
        .unwrap();
    posts
        .save(&dated_post("from-bob", 2, bob.id.unwrap()))
        .await
        .unwrap();

    let page = posts
        .list_by_author(alice.id.unwrap(), 1, 5)
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].title, "from-alice");
}

#[tokio::test]
async fn update_edits_text_but_never_date_posted() {
    let dir = tempfile::tempdir().unwrap();
    let database = open_database(&dir);
    let users = SqliteUserRepository::new(database.get_pool().clone());
    let posts = SqlitePostRepository::new(database.get_pool().clone());

    let alice = users.save(&user("alice", "a@x.com")).await.unwrap();
    let saved = posts
        .save(&dated_post("T1", 1, alice.id.unwrap()))
        .await
        .unwrap();

    let mut edited = saved.clone();
    edited.title = "T2".to_string();
    edited.content = "C2".to_string();
    // Even a tampered timestamp on the way in must not reach the row.
    edited.date_posted = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();

    let updated = posts.update(&edited).await.unwrap();
    assert_eq!(updated.title, "T2");
    assert_eq!(updated.content, "C2");
    assert_eq!(updated.date_posted, saved.date_posted);
}

#[tokio::test]
async fn delete_removes_the_post() {
    let dir = tempfile::tempdir().unwrap();
    let database = open_database(&dir);
    let users = SqliteUserRepository::new(database.get_pool().clone());
    let posts = SqlitePostRepository::new(database.get_pool().clone());

    let alice = users.save(&user("alice", "a@x.com")).await.unwrap();
    let saved = posts
        .save(&dated_post("T1", 1, alice.id.unwrap()))
        .await
        .unwrap();

    posts.delete(saved.id.unwrap()).await.unwrap();
    assert!(posts.find_by_id(saved.id.unwrap()).await.unwrap().is_none());
}
