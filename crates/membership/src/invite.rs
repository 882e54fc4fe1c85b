//! Invitation records and the opaque acceptance credential.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use hireboard_core::UserId;

/// How long a freshly minted invite credential stays redeemable.
pub fn invite_ttl() -> Duration {
    Duration::hours(1)
}

/// Opaque random credential proving possession of an invitation.
///
/// Equality is the only supported operation; the content carries no
/// structure. Generated tokens are 32 bytes of OS randomness,
/// base64url-encoded without padding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InviteToken(String);

impl InviteToken {
    pub const ENTROPY_BYTES: usize = 32;

    /// Mint a fresh cryptographically random token.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let bytes: [u8; Self::ENTROPY_BYTES] = rand::Rng::random(&mut rng);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Wrap a token received on the wire (e.g. from a redemption link).
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for InviteToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A pending (or accepted) invitation embedded in `Company.invites`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    pub user_id: UserId,
    pub accepted: bool,
    pub date_sent: DateTime<Utc>,
    pub token: InviteToken,
    pub expires_at: DateTime<Utc>,
}

impl Invitation {
    /// Issue a new invitation for `user_id`: fresh token, expiry now + TTL.
    pub fn issue(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            accepted: false,
            date_sent: now,
            token: InviteToken::generate(),
            expires_at: now + invite_ttl(),
        }
    }

    /// The token is invalid at or after the expiry instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Observable state of a user's denormalized invite credential.
///
/// `Absent` covers both "redeemed" and "never issued" — redemption clears the
/// credential fields, so the two are indistinguishable from the record alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialState {
    Issued,
    Expired,
    Absent,
}
