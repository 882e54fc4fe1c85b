//! Company record: member set and ordered invite list.

use serde::{Deserialize, Serialize};

use hireboard_core::{CompanyId, DomainError, UserId};

use crate::invite::Invitation;

/// Why a new invitation was refused. Membership takes precedence when a user
/// somehow appears in both places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipConflict {
    AlreadyMember,
    AlreadyInvited,
}

/// A company that users can be invited into.
///
/// Invariant: a user id appears in at most one of `members` and `invites`.
/// `members` is conceptually a set; the mutators keep it duplicate-free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    id: CompanyId,
    name: String,
    display_name: String,
    members: Vec<UserId>,
    invites: Vec<Invitation>,
}

impl Company {
    pub fn new(id: CompanyId, name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            display_name: display_name.into(),
            members: Vec::new(),
            invites: Vec::new(),
        }
    }

    pub fn id(&self) -> CompanyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn members(&self) -> &[UserId] {
        &self.members
    }

    pub fn invites(&self) -> &[Invitation] {
        &self.invites
    }

    pub fn is_member(&self, user_id: UserId) -> bool {
        self.members.contains(&user_id)
    }

    /// The not-yet-accepted invitation for `user_id`, if one exists.
    pub fn pending_invite(&self, user_id: UserId) -> Option<&Invitation> {
        self.invites
            .iter()
            .find(|i| i.user_id == user_id && !i.accepted)
    }

    /// Seed a member directly (company-creation flows, tests).
    pub fn add_member(&mut self, user_id: UserId) {
        if !self.members.contains(&user_id) {
            self.members.push(user_id);
        }
    }

    /// Append a freshly issued invitation, enforcing the duplicate guard.
    pub fn add_invite(&mut self, invitation: Invitation) -> Result<(), MembershipConflict> {
        if self.is_member(invitation.user_id) {
            return Err(MembershipConflict::AlreadyMember);
        }
        if self.pending_invite(invitation.user_id).is_some() {
            return Err(MembershipConflict::AlreadyInvited);
        }

        self.invites.push(invitation);
        Ok(())
    }

    /// Promote a pending invitee to member (redeemed-credential path).
    ///
    /// Removes the invitation entry and adds the user to `members`, keeping
    /// the one-of-{members, invites} invariant intact.
    pub fn promote_invitee(&mut self, user_id: UserId) -> Result<(), DomainError> {
        let idx = self
            .invites
            .iter()
            .position(|i| i.user_id == user_id && !i.accepted)
            .ok_or(DomainError::NotFound)?;

        self.invites.remove(idx);
        self.add_member(user_id);
        Ok(())
    }
}
