use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;

use hireboard_api::app::AppServices;
use hireboard_core::{CompanyId, EmailAddress, UserId};
use hireboard_membership::{AcceptMode, Company, User};
use hireboard_notify::{NotifyQueue, RecordingNotifier};
use hireboard_store::{InMemoryRepository, Repository};

struct TestServer {
    base_url: String,
    repo: Arc<InMemoryRepository>,
    notifier: Arc<RecordingNotifier>,
    company_id: CompanyId,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Spawn the prod router over a seeded in-memory store on an ephemeral
    /// port. Seeds one company ("Acme") and one registered user
    /// (jane@acme.com) and keeps handles to the store and the recording
    /// notifier for assertions.
    async fn spawn(accept_mode: AcceptMode) -> Self {
        let repo = Arc::new(InMemoryRepository::new());
        repo.insert_user(User::new(
            UserId::new(),
            EmailAddress::parse("jane@acme.com").unwrap(),
            "Jane",
            "Doe",
        ));
        let company = Company::new(CompanyId::new(), "acme", "Acme");
        let company_id = company.id();
        repo.insert_company(company);

        let notifier = Arc::new(RecordingNotifier::new());
        let services = Arc::new(
            AppServices::new(repo.clone(), NotifyQueue::spawn(notifier.clone()))
                .with_accept_mode(accept_mode),
        );
        let app = hireboard_api::app::build_app(services, "localhost".to_string());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            repo,
            notifier,
            company_id,
            handle,
        }
    }

    async fn invite(&self, client: &reqwest::Client, email: &str) -> reqwest::Response {
        client
            .post(format!(
                "{}/companies/{}/invite",
                self.base_url, self.company_id
            ))
            .json(&json!({ "email": email }))
            .send()
            .await
            .unwrap()
    }

    /// Invite tokens travel only inside the emailed link, so tests read
    /// them back from the stored user record.
    async fn stored_token(&self, email: &str) -> String {
        let user = self
            .repo
            .find_user_by_email(&EmailAddress::parse(email).unwrap())
            .await
            .unwrap()
            .expect("user not stored");
        user.invite_token().expect("no credential stored").to_string()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn sent_email_eventually(srv: &TestServer) -> hireboard_notify::InviteEmail {
    // Delivery is fire-and-forget on a background task; poll briefly.
    for _ in 0..100 {
        let sent = srv.notifier.sent();
        if let Some(email) = sent.into_iter().next() {
            return email;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    panic!("invite email was not delivered within timeout");
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn(AcceptMode::default()).await;

    let res = reqwest::get(format!("{}/health", srv.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn invite_records_the_invitation_and_emails_the_link() {
    let srv = TestServer::spawn(AcceptMode::default()).await;
    let client = reqwest::Client::new();

    let res = srv.invite(&client, "jane@acme.com").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();

    assert!(body["errors"].as_array().unwrap().is_empty());
    let invites = body["data"]["company"]["invites"].as_array().unwrap();
    assert_eq!(invites.len(), 1);
    assert_eq!(invites[0]["accepted"], json!(false));

    let token = srv.stored_token("jane@acme.com").await;
    let email = sent_email_eventually(&srv).await;
    assert_eq!(email.to, "jane@acme.com");
    // The server saw Host: 127.0.0.1:<port>, a local-dev host, so the link
    // is plain http at that address.
    assert!(email.body.contains(&format!(
        "{}/invite/{}/accept",
        srv.base_url, token
    )));
}

#[tokio::test]
async fn duplicate_invite_reports_user_already_added() {
    let srv = TestServer::spawn(AcceptMode::default()).await;
    let client = reqwest::Client::new();

    assert_eq!(
        srv.invite(&client, "jane@acme.com").await.status(),
        StatusCode::OK
    );

    let res = srv.invite(&client, "jane@acme.com").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["errors"][0]["error"], json!("USER_ALREADY_ADDED"));
    assert_eq!(
        body["errors"][0]["message"],
        json!("jane@acme.com has already received an invite.")
    );
}

#[tokio::test]
async fn inviting_an_existing_member_uses_the_joined_message() {
    let srv = TestServer::spawn(AcceptMode::default()).await;
    let client = reqwest::Client::new();

    let user = srv
        .repo
        .find_user_by_email(&EmailAddress::parse("jane@acme.com").unwrap())
        .await
        .unwrap()
        .unwrap();
    let mut company = srv.repo.find_company(srv.company_id).await.unwrap().unwrap();
    company.add_member(user.id());
    srv.repo.save_company(&company).await.unwrap();

    let res = srv.invite(&client, "jane@acme.com").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["errors"][0]["error"], json!("USER_ALREADY_ADDED"));
    assert_eq!(
        body["errors"][0]["message"],
        json!("jane@acme.com has already joined.")
    );
}

#[tokio::test]
async fn unregistered_email_is_invalid_user() {
    let srv = TestServer::spawn(AcceptMode::default()).await;
    let client = reqwest::Client::new();

    let res = srv.invite(&client, "ghost@nowhere.com").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["errors"][0]["error"], json!("INVALID_USER"));
    assert_eq!(
        body["errors"][0]["message"],
        json!("ghost@nowhere.com is not a registered user.")
    );
}

#[tokio::test]
async fn malformed_company_id_is_a_bad_request() {
    let srv = TestServer::spawn(AcceptMode::default()).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/companies/not-a-uuid/invite", srv.base_url))
        .json(&json!({ "email": "jane@acme.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["errors"][0]["error"], json!("INVALID_ID"));
}

#[tokio::test]
async fn accept_is_single_use() {
    let srv = TestServer::spawn(AcceptMode::default()).await;
    let client = reqwest::Client::new();

    srv.invite(&client, "jane@acme.com").await;
    let token = srv.stored_token("jane@acme.com").await;

    // First redemption clears the credential.
    let res = client
        .get(format!("{}/invite/{}/accept", srv.base_url, token))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"]["user"]["invite_pending"], json!(false));

    // Second redemption of the same token is refused.
    let res = client
        .get(format!("{}/invite/{}/accept", srv.base_url, token))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["errors"][0]["error"], json!("EXPIRED_INVITE_TOKEN"));
    assert_eq!(
        body["errors"][0]["message"],
        json!("This invite token is invalid or has expired.")
    );
}

#[tokio::test]
async fn unknown_token_is_refused_like_an_expired_one() {
    let srv = TestServer::spawn(AcceptMode::default()).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/invite/no-such-token/accept", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["errors"][0]["error"], json!("EXPIRED_INVITE_TOKEN"));
}

#[tokio::test]
async fn promote_mode_reports_membership_after_acceptance() {
    let srv = TestServer::spawn(AcceptMode::PromoteMembership).await;
    let client = reqwest::Client::new();

    srv.invite(&client, "jane@acme.com").await;
    let token = srv.stored_token("jane@acme.com").await;

    let res = client
        .get(format!("{}/invite/{}/accept", srv.base_url, token))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let companies = body["data"]["user"]["companies"].as_array().unwrap();
    assert_eq!(companies[0], json!(srv.company_id.to_string()));

    let company = srv.repo.find_company(srv.company_id).await.unwrap().unwrap();
    assert_eq!(company.members().len(), 1);
    assert!(company.invites().is_empty());
}
