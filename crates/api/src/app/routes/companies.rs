//! Company endpoints.

use std::sync::Arc;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Extension, Json, Router};
use serde_json::json;

use hireboard_core::{CompanyId, EmailAddress};
use hireboard_membership::MembershipError;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::RequestContext;

pub fn router() -> Router {
    Router::new().route("/:id/invite", post(invite_member))
}

/// POST /companies/:id/invite
///
/// A malformed email cannot belong to a registered user, so it gets the
/// same `INVALID_USER` rejection as an unknown one.
async fn invite_member(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::InviteMemberRequest>,
) -> Response {
    let company_id: CompanyId = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return errors::response(StatusCode::BAD_REQUEST, "INVALID_ID", "invalid company id")
        }
    };

    let email = match EmailAddress::parse(&body.email) {
        Ok(email) => email,
        Err(_) => {
            let submitted = body.email.trim().to_ascii_lowercase();
            return errors::membership_error_response(MembershipError::invalid_user(submitted));
        }
    };

    match services.invite_member(company_id, &email, &ctx).await {
        Ok(company) => Json(dto::envelope(json!({
            "company": dto::company_to_json(&company),
        })))
        .into_response(),
        Err(err) => errors::membership_error_response(err),
    }
}
