//! Invitation lifecycle error taxonomy.

use thiserror::Error;

/// Failures of the invite/redeem operations.
///
/// The `Display` text of the user-correctable variants is the human-readable
/// message carried in the response envelope, so it is part of the contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// The target email does not belong to a registered user. Terminal — no
    /// invite is created for unregistered addresses.
    #[error("{email} is not a registered user.")]
    InvalidUser { email: String },

    /// The target user is already a member of the company.
    #[error("{email} has already joined.")]
    AlreadyMember { email: String },

    /// The target user already holds a pending invite for the company.
    #[error("{email} has already received an invite.")]
    AlreadyInvited { email: String },

    /// The redemption credential is unknown or past its expiry. The two cases
    /// are deliberately indistinguishable to the caller.
    #[error("This invite token is invalid or has expired.")]
    ExpiredToken,

    /// The record store failed during a lookup. Retriable by the caller.
    #[error("store lookup failed: {0}")]
    Lookup(String),

    /// The record store failed during a save. Retriable by the caller; no
    /// partial state is guaranteed committed.
    #[error("store persist failed: {0}")]
    Persist(String),
}

impl MembershipError {
    pub fn invalid_user(email: impl Into<String>) -> Self {
        Self::InvalidUser { email: email.into() }
    }

    pub fn lookup(err: impl core::fmt::Display) -> Self {
        Self::Lookup(err.to_string())
    }

    pub fn persist(err: impl core::fmt::Display) -> Self {
        Self::Persist(err.to_string())
    }

    /// Machine-readable code for the `{data, errors}` envelope. Callers
    /// branch on this, not on the HTTP status.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidUser { .. } => "INVALID_USER",
            Self::AlreadyMember { .. } | Self::AlreadyInvited { .. } => "USER_ALREADY_ADDED",
            Self::ExpiredToken => "EXPIRED_INVITE_TOKEN",
            Self::Lookup(_) | Self::Persist(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Infrastructure failures surface as HTTP 500 and are safe to retry.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Lookup(_) | Self::Persist(_))
    }
}
