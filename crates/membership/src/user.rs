//! User record: identity plus the denormalized invite credential.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hireboard_core::{CompanyId, EmailAddress, UserId};

use crate::invite::{CredentialState, Invitation, InviteToken};

/// Denormalized snapshot of the company a user is currently acting as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveCompany {
    pub id: CompanyId,
    pub name: String,
    pub display_name: String,
}

/// A registered user.
///
/// `invite_token`/`invite_expires` hold the redemption credential copied from
/// the issuing company's invitation. They are set iff a pending invite was
/// issued to this email and not yet redeemed; redemption clears both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: EmailAddress,
    first_name: String,
    last_name: String,
    companies: Vec<CompanyId>,
    active_company: Option<ActiveCompany>,
    invite_token: Option<InviteToken>,
    invite_expires: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(
        id: UserId,
        email: EmailAddress,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            email,
            first_name: first_name.into(),
            last_name: last_name.into(),
            companies: Vec::new(),
            active_company: None,
            invite_token: None,
            invite_expires: None,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn companies(&self) -> &[CompanyId] {
        &self.companies
    }

    pub fn active_company(&self) -> Option<&ActiveCompany> {
        self.active_company.as_ref()
    }

    pub fn invite_token(&self) -> Option<&InviteToken> {
        self.invite_token.as_ref()
    }

    pub fn invite_expires(&self) -> Option<DateTime<Utc>> {
        self.invite_expires
    }

    /// Copy the credential of a freshly issued invitation onto this record.
    /// Overwrites any previous credential (re-invite after expiry).
    pub fn set_invite_credential(&mut self, invitation: &Invitation) {
        self.invite_token = Some(invitation.token.clone());
        self.invite_expires = Some(invitation.expires_at);
    }

    /// Clear the credential. Makes the token single-use once persisted.
    pub fn clear_invite_credential(&mut self) {
        self.invite_token = None;
        self.invite_expires = None;
    }

    pub fn credential_state(&self, now: DateTime<Utc>) -> CredentialState {
        match (&self.invite_token, self.invite_expires) {
            (Some(_), Some(expires)) if now < expires => CredentialState::Issued,
            (Some(_), _) => CredentialState::Expired,
            _ => CredentialState::Absent,
        }
    }

    /// Whether `token` would redeem right now.
    pub fn credential_matches(&self, token: &InviteToken, now: DateTime<Utc>) -> bool {
        self.invite_token.as_ref() == Some(token)
            && self.credential_state(now) == CredentialState::Issued
    }

    /// Record membership of a company (redeemed-credential path).
    pub fn add_company(&mut self, company_id: CompanyId) {
        if !self.companies.contains(&company_id) {
            self.companies.push(company_id);
        }
    }
}
