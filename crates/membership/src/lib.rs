//! `hireboard-membership` — company-membership invitation lifecycle.
//!
//! The records here (`Company`, `User`, `Invitation`) carry the state and
//! invariants of inviting a registered user into a company: duplicate-invite
//! guards, time-bounded credential minting, and single-use redemption. The
//! crate is pure domain; persistence and notification live elsewhere.

pub mod company;
pub mod error;
pub mod invite;
pub mod user;

pub use company::{Company, MembershipConflict};
pub use error::MembershipError;
pub use invite::{invite_ttl, CredentialState, Invitation, InviteToken};
pub use user::{ActiveCompany, User};

/// What a successful redemption does beyond clearing the credential.
///
/// The historical behavior only clears the token fields on the user record,
/// leaving `Company.invites`/`Company.members` untouched. `PromoteMembership`
/// is the corrected lifecycle: acceptance moves the user into the member set
/// and records the company on the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcceptMode {
    #[default]
    ClearTokenOnly,
    PromoteMembership,
}
