use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use domain::{DomainError, Page, Post, PostRepository};

use crate::database::{posts, SqlitePool};

// Database model - separate from domain entity
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct PostModel {
    id: i32,
    title: String,
    content: String,
    date_posted: NaiveDateTime,
    user_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = posts)]
struct NewPostModel {
    title: String,
    content: String,
    date_posted: NaiveDateTime,
    user_id: i32,
}

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Some(model.id),
            title: model.title,
            content: model.content,
            date_posted: model.date_posted.and_utc(),
            author_id: model.user_id,
        }
    }
}

impl From<&Post> for NewPostModel {
    fn from(post: &Post) -> Self {
        NewPostModel {
            title: post.title.clone(),
            content: post.content.clone(),
            date_posted: post.date_posted.naive_utc(),
            user_id: post.author_id,
        }
    }
}

pub struct SqlitePostRepository {
    pool: SqlitePool,
}

impl SqlitePostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn page_window(page: u32, per_page: u32) -> (i64, i64) {
    let limit = per_page as i64;
    let offset = page.saturating_sub(1) as i64 * limit;
    (limit, offset)
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        let result = tokio::task::spawn_blocking(move || {
            posts::table
                .filter(posts::id.eq(id))
                .select(PostModel::as_select())
                .first::<PostModel>(&mut conn)
                .optional()
        })
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(result.map(|model| model.into()))
    }

    async fn list(&self, page: u32, per_page: u32) -> Result<Page<Post>, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        let (limit, offset) = page_window(page, per_page);

        let (models, total) = tokio::task::spawn_blocking(
            move || -> Result<(Vec<PostModel>, i64), diesel::result::Error> {
                let total: i64 = posts::table.count().get_result(&mut conn)?;
                let models = posts::table
                    .order(posts::date_posted.desc())
                    .limit(limit)
                    .offset(offset)
                    .select(PostModel::as_select())
                    .load::<PostModel>(&mut conn)?;
                Ok((models, total))
            },
        )
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(Page {
            items: models.into_iter().map(Into::into).collect(),
            page,
            per_page,
            total: total as u64,
        })
    }

    async fn list_by_author(
        &self,
        author_id: i32,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Post>, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        let (limit, offset) = page_window(page, per_page);

        let (models, total) = tokio::task::spawn_blocking(
            move || -> Result<(Vec<PostModel>, i64), diesel::result::Error> {
                let total: i64 = posts::table
                    .filter(posts::user_id.eq(author_id))
                    .count()
                    .get_result(&mut conn)?;
                let models = posts::table
                    .filter(posts::user_id.eq(author_id))
                    .order(posts::date_posted.desc())
                    .limit(limit)
                    .offset(offset)
                    .select(PostModel::as_select())
                    .load::<PostModel>(&mut conn)?;
                Ok((models, total))
            },
        )
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(Page {
            items: models.into_iter().map(Into::into).collect(),
            page,
            per_page,
            total: total as u64,
        })
    }

    async fn save(&self, post: &Post) -> Result<Post, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        let new_post = NewPostModel::from(post);

        let result = tokio::task::spawn_blocking(move || {
            conn.immediate_transaction(|conn| {
                diesel::insert_into(posts::table)
                    .values(&new_post)
                    .execute(conn)?;

                // SQLite doesn't support RETURNING, so we insert and then fetch
                posts::table
                    .order(posts::id.desc())
                    .select(PostModel::as_select())
                    .first::<PostModel>(conn)
            })
        })
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(result.into())
    }

    async fn update(&self, post: &Post) -> Result<Post, DomainError> {
        let post_id = post
            .id
            .ok_or_else(|| DomainError::Repository("post has no persisted id".to_string()))?;

        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        let title = post.title.clone();
        let content = post.content.clone();

        let result = tokio::task::spawn_blocking(move || {
            conn.immediate_transaction(|conn| {
                // Only title and content are editable; date_posted stays.
                diesel::update(posts::table.filter(posts::id.eq(post_id)))
                    .set((posts::title.eq(title), posts::content.eq(content)))
                    .execute(conn)?;

                posts::table
                    .filter(posts::id.eq(post_id))
                    .select(PostModel::as_select())
                    .first::<PostModel>(conn)
            })
        })
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(result.into())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        tokio::task::spawn_blocking(move || {
            diesel::delete(posts::table.filter(posts::id.eq(id))).execute(&mut conn)
        })
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }
}
