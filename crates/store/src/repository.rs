//! Record repository abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use hireboard_core::{CompanyId, EmailAddress, UserId};
use hireboard_membership::{Company, InviteToken, User};

/// Infrastructure failure of the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),

    #[error("store connection failed: {0}")]
    Connection(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Keyed record repository with point lookups and atomic per-record saves.
///
/// Lookups return `Ok(None)` for "no such record"; `Err` is reserved for
/// backend failures. Saves are upserts: the whole record replaces whatever
/// was stored under its id (last write wins, per-document atomicity only).
#[async_trait]
pub trait Repository: Send + Sync {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>, StoreError>;

    /// Resolve the user holding `token` as a live (unexpired) credential.
    ///
    /// Expiry is enforced here, at lookup time: a matching but expired token
    /// resolves to `None`, indistinguishable from an unknown token.
    async fn find_user_by_live_token(
        &self,
        token: &InviteToken,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, StoreError>;

    async fn find_company(&self, id: CompanyId) -> Result<Option<Company>, StoreError>;

    /// Resolve the company holding the pending (not accepted) invite that
    /// carries `token`.
    ///
    /// Keyed by the token, not the invitee: a user invited by several
    /// companies holds only the latest credential, and redemption must
    /// resolve the company that issued that exact token.
    async fn find_company_by_invite_token(
        &self,
        token: &InviteToken,
    ) -> Result<Option<Company>, StoreError>;

    async fn save_user(&self, user: &User) -> Result<(), StoreError>;

    async fn save_company(&self, company: &Company) -> Result<(), StoreError>;
}
