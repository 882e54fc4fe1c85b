//! Postgres-backed record repository.
//!
//! Users and companies are persisted as JSONB documents, one row per record,
//! with the fields the lookups need (email, invite credential) addressed
//! through JSON operators. Saves are whole-document upserts — per-row
//! atomicity is the only consistency boundary, matching the repository
//! contract.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::instrument;

use hireboard_core::{CompanyId, EmailAddress, UserId};
use hireboard_membership::{Company, InviteToken, User};

use crate::repository::{Repository, StoreError};

/// Postgres document store for `User` and `Company` records.
///
/// `Send + Sync`; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct PostgresRepository {
    pool: Arc<PgPool>,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Connect with a small default pool.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self::new(pool))
    }

    /// Create the document tables if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id UUID PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                doc JSONB NOT NULL
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_users_table", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS companies (
                id UUID PRIMARY KEY,
                doc JSONB NOT NULL
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_companies_table", e))?;

        Ok(())
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    #[instrument(skip(self), fields(user_id = %id), err)]
    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let row = sqlx::query("SELECT doc FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_user", e))?;

        row.map(|r| decode(&r, "user")).transpose()
    }

    #[instrument(skip(self, email), err)]
    async fn find_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>, StoreError> {
        let row = sqlx::query("SELECT doc FROM users WHERE email = $1")
            .bind(email.as_str())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_user_by_email", e))?;

        row.map(|r| decode(&r, "user")).transpose()
    }

    #[instrument(skip(self, token), err)]
    async fn find_user_by_live_token(
        &self,
        token: &InviteToken,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, StoreError> {
        // Expiry is part of the lookup predicate: expired credentials are
        // indistinguishable from unknown tokens.
        let row = sqlx::query(
            r#"
            SELECT doc FROM users
            WHERE doc->>'invite_token' = $1
              AND doc->>'invite_expires' IS NOT NULL
              AND (doc->>'invite_expires')::timestamptz > $2
            "#,
        )
        .bind(token.as_str())
        .bind(now)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_user_by_live_token", e))?;

        row.map(|r| decode(&r, "user")).transpose()
    }

    #[instrument(skip(self), fields(company_id = %id), err)]
    async fn find_company(&self, id: CompanyId) -> Result<Option<Company>, StoreError> {
        let row = sqlx::query("SELECT doc FROM companies WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_company", e))?;

        row.map(|r| decode(&r, "company")).transpose()
    }

    #[instrument(skip(self, token), err)]
    async fn find_company_by_invite_token(
        &self,
        token: &InviteToken,
    ) -> Result<Option<Company>, StoreError> {
        let needle = serde_json::json!([{ "token": token, "accepted": false }]);
        let row = sqlx::query("SELECT doc FROM companies WHERE doc->'invites' @> $1 LIMIT 1")
            .bind(needle)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_company_by_invite_token", e))?;

        row.map(|r| decode(&r, "company")).transpose()
    }

    #[instrument(skip(self, user), fields(user_id = %user.id()), err)]
    async fn save_user(&self, user: &User) -> Result<(), StoreError> {
        let doc = encode(user, "user")?;
        sqlx::query(
            r#"
            INSERT INTO users (id, email, doc)
            VALUES ($1, $2, $3)
            ON CONFLICT (id)
            DO UPDATE SET email = EXCLUDED.email, doc = EXCLUDED.doc
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.email().as_str())
        .bind(doc)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("save_user", e))?;

        Ok(())
    }

    #[instrument(skip(self, company), fields(company_id = %company.id()), err)]
    async fn save_company(&self, company: &Company) -> Result<(), StoreError> {
        let doc = encode(company, "company")?;
        sqlx::query(
            r#"
            INSERT INTO companies (id, doc)
            VALUES ($1, $2)
            ON CONFLICT (id)
            DO UPDATE SET doc = EXCLUDED.doc
            "#,
        )
        .bind(company.id().as_uuid())
        .bind(doc)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("save_company", e))?;

        Ok(())
    }
}

fn encode<T: serde::Serialize>(record: &T, what: &str) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(record)
        .map_err(|e| StoreError::backend(format!("failed to encode {what} doc: {e}")))
}

fn decode<T: serde::de::DeserializeOwned>(row: &PgRow, what: &str) -> Result<T, StoreError> {
    let doc: serde_json::Value = row
        .try_get("doc")
        .map_err(|e| StoreError::backend(format!("failed to read {what} doc: {e}")))?;
    serde_json::from_value(doc)
        .map_err(|e| StoreError::backend(format!("failed to decode {what} doc: {e}")))
}

/// Map SQLx errors to `StoreError`, tagging the failed operation.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => StoreError::backend(format!(
            "database error in {}: {}",
            operation,
            db_err.message()
        )),
        sqlx::Error::PoolClosed => {
            StoreError::backend(format!("connection pool closed in {operation}"))
        }
        _ => StoreError::backend(format!("sqlx error in {operation}: {err}")),
    }
}
