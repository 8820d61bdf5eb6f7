#![allow(dead_code)]

use std::sync::Arc;

use aliasly_api::config::ServerConfig;
use aliasly_api::router::build_app_router;
use aliasly_api::state::AppState;
use aliasly_core::store::Store;
use aliasly_db::MemoryStore;
use aliasly_service::testing::{RecordingMailer, RecordingProvider};
use aliasly_service::{EmailService, ServiceConfig, UserService};
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const ALIAS_DOMAIN: &str = "alias.test";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// The production router over an in-memory store, plus handles on the
/// recording collaborators for assertions.
pub struct TestApp {
    pub router: Router,
    pub provider: Arc<RecordingProvider>,
    pub mailer: Arc<RecordingMailer>,
}

impl TestApp {
    /// A fresh handle on the router for one `oneshot` request.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Token carried by the most recent verification mail.
    pub fn last_token(&self) -> String {
        self.mailer
            .sent()
            .last()
            .and_then(|m| m.verification_token())
            .expect("no verification mail was sent")
    }
}

pub fn build_test_app() -> TestApp {
    let config = test_config();
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let provider = Arc::new(RecordingProvider::new());
    let mailer = Arc::new(RecordingMailer::new());
    let service_config = ServiceConfig {
        alias_domain: ALIAS_DOMAIN.to_string(),
        base_url: "http://localhost:3000".to_string(),
    };

    let state = AppState {
        config: Arc::new(config.clone()),
        store: Arc::clone(&store),
        users: UserService::new(Arc::clone(&store)),
        emails: EmailService::new(store, provider.clone(), mailer.clone(), service_config),
    };

    TestApp {
        router: build_app_router(state, &config),
        provider,
        mailer,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a user through the API and return its ID.
pub async fn create_user(t: &TestApp, username: &str, email: &str) -> String {
    let response = post_json(
        t.app(),
        "/api/v1/users",
        serde_json::json!({"username": username, "email": email, "password": "s3cret-pass"}),
    )
    .await;
    body_json(response).await["id"].as_str().unwrap().to_string()
}

/// Register and verify an address for `user_id`; returns the email ID.
pub async fn verified_email(t: &TestApp, user_id: &str, address: &str) -> String {
    let response = post_json(
        t.app(),
        "/api/v1/emails",
        serde_json::json!({"user_id": user_id, "email_address": address}),
    )
    .await;
    let email_id = body_json(response).await["id"].as_str().unwrap().to_string();
    let token = t.last_token();
    post_json(t.app(), "/api/v1/emails/verify", serde_json::json!({"token": token})).await;
    email_id
}
