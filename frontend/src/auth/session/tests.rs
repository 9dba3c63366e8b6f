use super::*;
use crate::api::TracklyticsApi;
use crate::error::ApiError;
use crate::request::{HttpMethod, MockHttpClient};
use crate::web::{KeyValueStore, MemoryStorage};
use serde_json::json;
use std::sync::Arc;

// =========================================================
// Shared Mock Components
// =========================================================

const ME_URL: &str = "http://backend.test/api/auth/me";

struct TestContext {
    storage: Arc<MemoryStorage>,
    client: Arc<MockHttpClient>,
    session: AuthSession,
}

impl TestContext {
    fn new() -> Self {
        let storage = Arc::new(MemoryStorage::new());
        let client = Arc::new(MockHttpClient::new());
        let credentials = CredentialStore::new(storage.clone());
        let api = TracklyticsApi::new("http://backend.test", credentials.clone(), client.clone());
        Self {
            storage,
            client,
            session: AuthSession::new(credentials, api),
        }
    }

    fn with_token(token: &str) -> Self {
        let ctx = Self::new();
        ctx.storage.set("jwt_token", token);
        ctx
    }

    fn accept_me(&self, name: &str) {
        self.client.mock_response(
            ME_URL,
            200,
            json!({ "displayName": name, "hasData": false, "email": "ada@example.com" }),
        );
    }

    fn reject_me(&self, status: u16) {
        self.client
            .mock_response(ME_URL, status, json!({ "message": "invalid token" }));
    }

    fn stored_token(&self) -> Option<String> {
        self.storage.get("jwt_token")
    }
}

// =========================================================
// Resolution
// =========================================================

#[tokio::test]
async fn absent_credential_resolves_without_request() {
    let ctx = TestContext::new();

    let status = ctx.session.resolve().await;

    assert_eq!(status, AuthStatus::Unauthenticated);
    assert!(status.is_resolved());
    assert!(ctx.client.recorded().is_empty());
}

#[tokio::test]
async fn valid_credential_resolves_to_user() {
    let ctx = TestContext::with_token("abc123");
    ctx.accept_me("Ada");

    let status = ctx.session.resolve().await;

    assert_eq!(status.user().and_then(|u| u.display_name.as_deref()), Some("Ada"));
    assert_eq!(ctx.stored_token().as_deref(), Some("abc123"));

    let (method, url, headers, _) = &ctx.client.recorded()[0];
    assert_eq!(*method, HttpMethod::Get);
    assert_eq!(url, ME_URL);
    assert_eq!(headers.get("Authorization").map(String::as_str), Some("Bearer abc123"));
}

#[tokio::test]
async fn rejected_credential_is_discarded() {
    for status in [401, 403, 500] {
        let ctx = TestContext::with_token("stale");
        ctx.reject_me(status);

        assert_eq!(ctx.session.resolve().await, AuthStatus::Unauthenticated);
        assert_eq!(ctx.stored_token(), None, "status {}", status);
    }
}

#[tokio::test]
async fn network_failure_also_discards_credential() {
    let ctx = TestContext::with_token("abc123");
    ctx.client.mock_network_failure(ME_URL);

    let err = ctx.session.verify().await.unwrap_err();

    assert!(matches!(err, AuthError::Verification(ApiError::Network(_))));
    assert_eq!(ctx.stored_token(), None);
}

// =========================================================
// Login / Logout
// =========================================================

#[tokio::test]
async fn login_saves_token_then_verifies() {
    let ctx = TestContext::new();
    ctx.accept_me("Ada");

    let user = ctx.session.login("abc123").await.unwrap();

    assert_eq!(user.greeting_name(), "Ada");
    assert_eq!(ctx.stored_token().as_deref(), Some("abc123"));
    assert_eq!(ctx.client.requested_urls(), vec![ME_URL.to_string()]);
}

#[tokio::test]
async fn login_is_idempotent() {
    let ctx = TestContext::new();
    ctx.accept_me("Ada");

    let first = ctx.session.login("abc123").await.unwrap();
    let second = ctx.session.login("abc123").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(ctx.stored_token().as_deref(), Some("abc123"));
}

#[tokio::test]
async fn login_replaces_previous_credential() {
    let ctx = TestContext::with_token("old");
    ctx.accept_me("Ada");

    ctx.session.login("new").await.unwrap();

    let (_, _, headers, _) = &ctx.client.recorded()[0];
    assert_eq!(headers.get("Authorization").map(String::as_str), Some("Bearer new"));
    assert_eq!(ctx.stored_token().as_deref(), Some("new"));
}

#[tokio::test]
async fn failed_login_leaves_store_empty() {
    let ctx = TestContext::new();
    ctx.reject_me(401);

    let err = ctx.session.login("garbage").await.unwrap_err();

    assert_eq!(
        err,
        AuthError::Verification(ApiError::Status {
            status: 401,
            message: Some("invalid token".to_string())
        })
    );
    assert_eq!(ctx.stored_token(), None);
}

#[tokio::test]
async fn empty_token_login_is_missing_credential() {
    let ctx = TestContext::new();

    let err = ctx.session.login("").await.unwrap_err();

    assert_eq!(err, AuthError::MissingCredential);
    assert!(ctx.client.recorded().is_empty());
}

#[tokio::test]
async fn logout_always_yields_unauthenticated() {
    // 已认证
    let ctx = TestContext::new();
    ctx.accept_me("Ada");
    ctx.session.login("abc123").await.unwrap();
    assert_eq!(ctx.session.logout(), AuthStatus::Unauthenticated);
    assert_eq!(ctx.stored_token(), None);

    // 从未登录
    let ctx = TestContext::new();
    assert_eq!(ctx.session.logout(), AuthStatus::Unauthenticated);
    assert_eq!(ctx.stored_token(), None);

    // 登出后再次校验不会发请求
    assert_eq!(ctx.session.resolve().await, AuthStatus::Unauthenticated);
    assert!(ctx.client.recorded().is_empty());
}
