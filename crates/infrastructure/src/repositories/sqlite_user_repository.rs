use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use domain::{DomainError, User, UserRepository};

use crate::database::{users, SqlitePool};

// Database model - separate from domain entity
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct UserModel {
    id: i32,
    username: String,
    email: String,
    image_file: String,
    password_hash: String,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
struct NewUserModel {
    username: String,
    email: String,
    image_file: String,
    password_hash: String,
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Some(model.id),
            username: model.username,
            email: model.email,
            image_file: model.image_file,
            password_hash: model.password_hash,
        }
    }
}

impl From<&User> for NewUserModel {
    fn from(user: &User) -> Self {
        NewUserModel {
            username: user.username.clone(),
            email: user.email.clone(),
            image_file: user.image_file.clone(),
            password_hash: user.password_hash.clone(),
        }
    }
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// SQLite reports which constraint fired in the error message, e.g.
// "UNIQUE constraint failed: users.username".
fn map_write_error(error: diesel::result::Error) -> DomainError {
    if let diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &error {
        if info.message().contains("users.username") {
            return DomainError::Conflict { field: "username" };
        }
        if info.message().contains("users.email") {
            return DomainError::Conflict { field: "email" };
        }
    }
    DomainError::Repository(error.to_string())
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        let result = tokio::task::spawn_blocking(move || {
            users::table
                .filter(users::id.eq(id))
                .select(UserModel::as_select())
                .first::<UserModel>(&mut conn)
                .optional()
        })
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(result.map(|model| model.into()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        let username = username.to_string();
        let result = tokio::task::spawn_blocking(move || {
            users::table
                .filter(users::username.eq(username))
                .select(UserModel::as_select())
                .first::<UserModel>(&mut conn)
                .optional()
        })
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(result.map(|model| model.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        let email = email.to_string();
        let result = tokio::task::spawn_blocking(move || {
            users::table
                .filter(users::email.eq(email))
                .select(UserModel::as_select())
                .first::<UserModel>(&mut conn)
                .optional()
        })
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(result.map(|model| model.into()))
    }

    async fn save(&self, user: &User) -> Result<User, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        let new_user = NewUserModel::from(user);

        let result = tokio::task::spawn_blocking(move || {
            conn.immediate_transaction(|conn| {
                diesel::insert_into(users::table)
                    .values(&new_user)
                    .execute(conn)?;

                // SQLite doesn't support RETURNING, so we insert and then fetch
                users::table
                    .order(users::id.desc())
                    .select(UserModel::as_select())
                    .first::<UserModel>(conn)
            })
        })
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?
        .map_err(map_write_error)?;

        Ok(result.into())
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let user_id = user
            .id
            .ok_or_else(|| DomainError::Repository("user has no persisted id".to_string()))?;

        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        let username = user.username.clone();
        let email = user.email.clone();
        let image_file = user.image_file.clone();
        let password_hash = user.password_hash.clone();

        let result = tokio::task::spawn_blocking(move || {
            conn.immediate_transaction(|conn| {
                diesel::update(users::table.filter(users::id.eq(user_id)))
                    .set((
                        users::username.eq(username),
                        users::email.eq(email),
                        users::image_file.eq(image_file),
                        users::password_hash.eq(password_hash),
                    ))
                    .execute(conn)?;

                // Fetch the updated user
                users::table
                    .filter(users::id.eq(user_id))
                    .select(UserModel::as_select())
                    .first::<UserModel>(conn)
            })
        })
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?
        .map_err(map_write_error)?;

        Ok(result.into())
    }
}
