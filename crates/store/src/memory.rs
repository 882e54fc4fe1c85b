//! In-memory repository for tests/dev.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use hireboard_core::{CompanyId, EmailAddress, UserId};
use hireboard_membership::{Company, InviteToken, User};

use crate::repository::{Repository, StoreError};

/// In-memory record store backed by `RwLock<HashMap>`s.
///
/// Email and live-token lookups scan the user map; fine at test scale.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    users: RwLock<HashMap<UserId, User>>,
    companies: RwLock<HashMap<CompanyId, Company>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user directly (test setup). Panics on a poisoned lock — a
    /// silently dropped seed would only hide the earlier panic.
    pub fn insert_user(&self, user: User) {
        let mut map = self.users.write().expect("users lock poisoned");
        map.insert(user.id(), user);
    }

    /// Seed a company directly (test setup). Panics on a poisoned lock.
    pub fn insert_company(&self, company: Company) {
        let mut map = self.companies.write().expect("companies lock poisoned");
        map.insert(company.id(), company);
    }
}

fn poisoned() -> StoreError {
    StoreError::backend("lock poisoned")
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let map = self.users.read().map_err(|_| poisoned())?;
        Ok(map.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>, StoreError> {
        let map = self.users.read().map_err(|_| poisoned())?;
        Ok(map.values().find(|u| u.email() == email).cloned())
    }

    async fn find_user_by_live_token(
        &self,
        token: &InviteToken,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, StoreError> {
        let map = self.users.read().map_err(|_| poisoned())?;
        Ok(map
            .values()
            .find(|u| u.credential_matches(token, now))
            .cloned())
    }

    async fn find_company(&self, id: CompanyId) -> Result<Option<Company>, StoreError> {
        let map = self.companies.read().map_err(|_| poisoned())?;
        Ok(map.get(&id).cloned())
    }

    async fn find_company_by_invite_token(
        &self,
        token: &InviteToken,
    ) -> Result<Option<Company>, StoreError> {
        let map = self.companies.read().map_err(|_| poisoned())?;
        Ok(map
            .values()
            .find(|c| c.invites().iter().any(|i| !i.accepted && i.token == *token))
            .cloned())
    }

    async fn save_user(&self, user: &User) -> Result<(), StoreError> {
        let mut map = self.users.write().map_err(|_| poisoned())?;
        map.insert(user.id(), user.clone());
        Ok(())
    }

    async fn save_company(&self, company: &Company) -> Result<(), StoreError> {
        let mut map = self.companies.write().map_err(|_| poisoned())?;
        map.insert(company.id(), company.clone());
        Ok(())
    }
}
