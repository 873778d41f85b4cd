//! Postgres implementation of [`AccountStore`] and [`NoteStore`].
//!
//! Each operation is a single statement. Owner scoping happens in the `WHERE`
//! clause of every note query.

use async_trait::async_trait;
use sqlx::PgPool;
use store::{Account, AccountStore, NewAccount, NewNote, Note, NotePatch, NoteStore, StoreError};
use uuid::Uuid;

const EMAIL_CONSTRAINT: &str = "accounts_email_key";
const USERNAME_CONSTRAINT: &str = "accounts_username_key";
const OWNER_CONSTRAINT: &str = "notes_user_id_fkey";

/// Store backed by a shared [`PgPool`].
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map constraint violations onto the store's error vocabulary.
fn store_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.constraint() {
            Some(EMAIL_CONSTRAINT) => return StoreError::DuplicateEmail,
            Some(USERNAME_CONSTRAINT) => return StoreError::DuplicateUsername,
            Some(OWNER_CONSTRAINT) => return StoreError::MissingOwner,
            _ => {}
        }
    }
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl AccountStore for PgStore {
    async fn insert_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        sqlx::query_as(
            "INSERT INTO accounts (id, username, email, password_hash) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        sqlx::query_as("SELECT * FROM accounts WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)
    }

    async fn find_account_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        sqlx::query_as("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)
    }
}

#[async_trait]
impl NoteStore for PgStore {
    async fn insert_note(&self, owner: Uuid, note: NewNote) -> Result<Note, StoreError> {
        sqlx::query_as(
            "INSERT INTO notes (id, user_id, title, content) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(&note.title)
        .bind(&note.content)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)
    }

    async fn list_notes(&self, owner: Uuid) -> Result<Vec<Note>, StoreError> {
        sqlx::query_as("SELECT * FROM notes WHERE user_id = $1 ORDER BY created_at DESC, id DESC")
            .bind(owner)
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)
    }

    async fn update_note(
        &self,
        owner: Uuid,
        id: Uuid,
        patch: NotePatch,
    ) -> Result<Option<Note>, StoreError> {
        if patch.is_empty() {
            return sqlx::query_as("SELECT * FROM notes WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(owner)
                .fetch_optional(&self.pool)
                .await
                .map_err(store_error);
        }

        sqlx::query_as(
            "UPDATE notes SET
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                favorite = COALESCE($5, favorite),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING *",
        )
        .bind(id)
        .bind(owner)
        .bind(patch.title)
        .bind(patch.content)
        .bind(patch.favorite)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)
    }

    async fn delete_note(&self, owner: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(result.rows_affected() > 0)
    }
}
