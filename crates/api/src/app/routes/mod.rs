//! Route table, one module per resource.

use axum::Router;

pub mod companies;
pub mod invites;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .merge(system::router())
        .nest("/companies", companies::router())
        .nest("/invite", invites::router())
}
