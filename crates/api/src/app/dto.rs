//! Wire shapes: the `{data, errors}` envelope and record projections.
//!
//! Every response body is the envelope; success carries an empty `errors`
//! array, failure carries an empty `data` array. The invite token is never
//! serialized onto the wire — it travels only inside the emailed link.

use serde::Deserialize;
use serde_json::{json, Value};

use hireboard_membership::{Company, User};

#[derive(Debug, Deserialize)]
pub struct InviteMemberRequest {
    pub email: String,
}

pub fn envelope(data: Value) -> Value {
    json!({ "data": data, "errors": [] })
}

pub fn error_envelope(code: &str, message: impl Into<String>) -> Value {
    json!({
        "data": [],
        "errors": [{ "error": code, "message": message.into() }],
    })
}

pub fn company_to_json(company: &Company) -> Value {
    json!({
        "id": company.id().to_string(),
        "name": company.name(),
        "display_name": company.display_name(),
        "members": company
            .members()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
        "invites": company
            .invites()
            .iter()
            .map(|invite| json!({
                "user_id": invite.user_id.to_string(),
                "accepted": invite.accepted,
                "date_sent": invite.date_sent.to_rfc3339(),
                "expires_at": invite.expires_at.to_rfc3339(),
            }))
            .collect::<Vec<_>>(),
    })
}

pub fn user_to_json(user: &User) -> Value {
    json!({
        "id": user.id().to_string(),
        "email": user.email().to_string(),
        "first_name": user.first_name(),
        "last_name": user.last_name(),
        "companies": user
            .companies()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
        "active_company": user.active_company().map(|active| json!({
            "id": active.id.to_string(),
            "name": active.name,
            "display_name": active.display_name,
        })),
        "invite_pending": user.invite_token().is_some(),
    })
}
