//! Mapping of lifecycle failures onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use hireboard_membership::MembershipError;

use crate::app::dto;

/// Translate a lifecycle failure into the `{data, errors}` envelope.
///
/// Domain rejections ride on 200 — callers branch on the `error` code, not
/// the status. An expired or unknown token gets 401; infrastructure failures
/// get 500 with the detail logged rather than echoed.
pub fn membership_error_response(err: MembershipError) -> Response {
    if err.is_infrastructure() {
        error!(error = %err, "invitation operation failed");
        return response(
            StatusCode::INTERNAL_SERVER_ERROR,
            err.code(),
            "There was an internal error. Please try again.",
        );
    }

    let status = match err {
        MembershipError::ExpiredToken => StatusCode::UNAUTHORIZED,
        _ => StatusCode::OK,
    };
    response(status, err.code(), err.to_string())
}

pub fn response(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    (status, Json(dto::error_envelope(code, message))).into_response()
}
