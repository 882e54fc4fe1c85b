use std::sync::Arc;

use hireboard_api::app::AppServices;
use hireboard_membership::AcceptMode;
use hireboard_notify::{LogNotifier, NotifyQueue};
use hireboard_store::{InMemoryRepository, PostgresRepository, Repository};

#[tokio::main]
async fn main() {
    hireboard_observability::init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let public_host = std::env::var("PUBLIC_HOST").unwrap_or_else(|_| {
        tracing::warn!("PUBLIC_HOST not set; invite links will fall back to localhost");
        "localhost:8080".to_string()
    });

    let repo: Arc<dyn Repository> = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let store = PostgresRepository::connect(&url)
                .await
                .expect("failed to connect to DATABASE_URL");
            store
                .ensure_schema()
                .await
                .expect("failed to prepare store schema");
            Arc::new(store)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using volatile in-memory store");
            Arc::new(InMemoryRepository::new())
        }
    };

    let accept_mode = if std::env::var_os("INVITE_ACCEPT_PROMOTES").is_some() {
        AcceptMode::PromoteMembership
    } else {
        AcceptMode::default()
    };

    let notify = NotifyQueue::spawn(Arc::new(LogNotifier));
    let services = Arc::new(AppServices::new(repo, notify).with_accept_mode(accept_mode));
    let app = hireboard_api::app::build_app(services, public_host);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("failed to bind listener");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
