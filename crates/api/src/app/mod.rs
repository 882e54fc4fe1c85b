//! Application assembly: routes, services, and the response envelope.

use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::Extension;
use axum::Router;

use crate::middleware::{inject_request_context, ContextConfig};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Assemble the router with all routes and shared state wired in.
///
/// `fallback_host` is advertised in invite links when a request arrives
/// without a `Host` header.
pub fn build_app(services: Arc<AppServices>, fallback_host: String) -> Router {
    let context = ContextConfig { fallback_host };

    routes::router()
        .layer(Extension(services))
        .layer(from_fn_with_state(context, inject_request_context))
}
