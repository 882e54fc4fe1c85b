//! Invite email message building.

use hireboard_membership::{Company, User};

/// A rendered, ready-to-send invite message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl InviteEmail {
    /// Render the company-membership invitation for `user`, pointing at the
    /// redemption link. Plain text; layout is the mail provider's problem.
    pub fn invitation(company: &Company, user: &User, accept_url: &str) -> Self {
        let subject = format!("You've been invited to join {}", company.display_name());
        let body = format!(
            "Hi {first_name},\n\
             \n\
             {company} has invited you to join their team.\n\
             \n\
             Accept the invitation here:\n\
             {accept_url}\n\
             \n\
             The link is valid for one hour. If you weren't expecting this\n\
             invite you can safely ignore this email.\n\
             \n\
             Thanks,\n\
             Hireboard\n",
            first_name = user.first_name(),
            company = company.display_name(),
        );

        Self {
            to: user.email().to_string(),
            subject,
            body,
        }
    }
}
