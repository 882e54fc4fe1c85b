//! Request-context injection.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::context::RequestContext;

/// State for [`inject_request_context`]: the host to advertise in invite
/// links when the request carries no usable `Host` header.
#[derive(Debug, Clone)]
pub struct ContextConfig {
    pub fallback_host: String,
}

/// Build a [`RequestContext`] from the inbound request and stash it in the
/// request extensions for handlers to extract.
pub async fn inject_request_context(
    State(config): State<ContextConfig>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .unwrap_or(config.fallback_host);

    request.extensions_mut().insert(RequestContext::new(host));
    next.run(request).await
}
