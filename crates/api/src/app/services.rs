//! Service layer: the invite and redemption operations over the repository.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use hireboard_core::{CompanyId, EmailAddress};
use hireboard_membership::{
    AcceptMode, Company, Invitation, InviteToken, MembershipConflict, MembershipError, User,
};
use hireboard_notify::{InviteEmail, NotifyQueue};
use hireboard_store::Repository;

use crate::context::RequestContext;

/// Shared application services handed to every handler.
pub struct AppServices {
    repo: Arc<dyn Repository>,
    notify: NotifyQueue,
    accept_mode: AcceptMode,
}

impl AppServices {
    pub fn new(repo: Arc<dyn Repository>, notify: NotifyQueue) -> Self {
        Self {
            repo,
            notify,
            accept_mode: AcceptMode::default(),
        }
    }

    pub fn with_accept_mode(mut self, accept_mode: AcceptMode) -> Self {
        self.accept_mode = accept_mode;
        self
    }

    /// Invite the registered user behind `email` into the company.
    ///
    /// Rejections (unregistered email, duplicate membership or invite) leave
    /// the store untouched. On success the company invite list and the user's
    /// credential are persisted before the notification is enqueued, so a
    /// persisted invite is always redeemable even if the email never leaves.
    #[instrument(skip(self, ctx), fields(company_id = %company_id, email = %email), err)]
    pub async fn invite_member(
        &self,
        company_id: CompanyId,
        email: &EmailAddress,
        ctx: &RequestContext,
    ) -> Result<Company, MembershipError> {
        let mut user = self
            .repo
            .find_user_by_email(email)
            .await
            .map_err(MembershipError::lookup)?
            .ok_or_else(|| MembershipError::invalid_user(email.to_string()))?;

        let mut company = self
            .repo
            .find_company(company_id)
            .await
            .map_err(MembershipError::lookup)?
            .ok_or_else(|| MembershipError::lookup(format!("company {company_id} not found")))?;

        let invitation = Invitation::issue(user.id(), Utc::now());
        company
            .add_invite(invitation.clone())
            .map_err(|conflict| match conflict {
                MembershipConflict::AlreadyMember => MembershipError::AlreadyMember {
                    email: email.to_string(),
                },
                MembershipConflict::AlreadyInvited => MembershipError::AlreadyInvited {
                    email: email.to_string(),
                },
            })?;
        user.set_invite_credential(&invitation);

        // Company first: it owns the invite list the duplicate guard reads.
        self.repo
            .save_company(&company)
            .await
            .map_err(MembershipError::persist)?;
        self.repo
            .save_user(&user)
            .await
            .map_err(MembershipError::persist)?;

        let accept_url = ctx.redemption_url(&invitation.token);
        self.notify
            .enqueue(InviteEmail::invitation(&company, &user, &accept_url));

        info!(user_id = %user.id(), "membership invite issued");
        Ok(company)
    }

    /// Redeem an invite token.
    ///
    /// The credential must match a user record and still be live; expiry and
    /// "no such token" are indistinguishable to the caller. Clearing the
    /// credential is what makes the token single-use, so the user record is
    /// always saved, whatever the accept mode.
    #[instrument(skip(self, token), err)]
    pub async fn accept_invite(&self, token: &InviteToken) -> Result<User, MembershipError> {
        let mut user = self
            .repo
            .find_user_by_live_token(token, Utc::now())
            .await
            .map_err(MembershipError::lookup)?
            .ok_or(MembershipError::ExpiredToken)?;

        user.clear_invite_credential();

        if self.accept_mode == AcceptMode::PromoteMembership {
            // Resolve the issuing company by the redeemed token. A lookup by
            // invitee would be ambiguous: a user invited by two companies
            // holds only the latest credential, and must not be promoted
            // into a company whose token was never redeemed.
            let company = self
                .repo
                .find_company_by_invite_token(token)
                .await
                .map_err(MembershipError::lookup)?;
            if let Some(mut company) = company {
                if company.promote_invitee(user.id()).is_ok() {
                    self.repo
                        .save_company(&company)
                        .await
                        .map_err(MembershipError::persist)?;
                    user.add_company(company.id());
                }
            }
        }

        self.repo
            .save_user(&user)
            .await
            .map_err(MembershipError::persist)?;

        info!(user_id = %user.id(), "membership invite redeemed");
        Ok(user)
    }
}
