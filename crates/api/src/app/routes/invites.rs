//! Invite redemption endpoints.

use std::sync::Arc;

use axum::extract::Path;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;

use hireboard_membership::InviteToken;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    // GET serves the emailed link; POST serves programmatic clients.
    Router::new().route("/:token/accept", get(accept_invite).post(accept_invite))
}

/// GET|POST /invite/:token/accept
async fn accept_invite(
    Extension(services): Extension<Arc<AppServices>>,
    Path(token): Path<String>,
) -> Response {
    let token = InviteToken::from_raw(token);

    match services.accept_invite(&token).await {
        Ok(user) => Json(dto::envelope(json!({
            "user": dto::user_to_json(&user),
        })))
        .into_response(),
        Err(err) => errors::membership_error_response(err),
    }
}
