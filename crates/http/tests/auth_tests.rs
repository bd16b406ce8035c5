//! Integration tests for the auth service

use serde_json::json;
use std::sync::Arc;
use todo_http::{
    ApiClient, ApiConfig, AuthService, ClientError, CredentialStore, MemoryCredentialStore,
    RecordingNavigator, SignInRequest, SignUpRequest,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(server: &MockServer, store: &MemoryCredentialStore) -> (AuthService, RecordingNavigator) {
    let navigator = RecordingNavigator::new();
    let client = ApiClient::builder()
        .config(ApiConfig::new(server.uri()).unwrap())
        .credential_store(Arc::new(store.clone()))
        .navigator(Arc::new(navigator.clone()))
        .build()
        .unwrap();
    (AuthService::new(client), navigator)
}

#[tokio::test]
async fn test_sign_in_stores_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signin"))
        .and(body_json(json!({"email": "ada@example.com", "password": "hunter22"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "abc123",
            "token_type": "bearer",
            "user": {"id": "u1", "email": "ada@example.com", "name": "Ada"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryCredentialStore::new();
    let (auth, _) = service(&server, &store);

    let response = auth
        .sign_in(&SignInRequest {
            email: "ada@example.com".into(),
            password: "hunter22".into(),
        })
        .await
        .unwrap();

    assert_eq!(response.user.unwrap().name.as_deref(), Some("Ada"));
    assert_eq!(store.get_token().as_deref(), Some("abc123"));
    assert!(auth.is_authenticated());
}

#[tokio::test]
async fn test_sign_up_stores_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"access_token": "new-token"})))
        .mount(&server)
        .await;

    let store = MemoryCredentialStore::new();
    let (auth, _) = service(&server, &store);

    auth.sign_up(&SignUpRequest {
        email: "grace@example.com".into(),
        password: "correct horse".into(),
        name: Some("Grace".into()),
    })
    .await
    .unwrap();

    assert_eq!(store.get_token().as_deref(), Some("new-token"));
}

#[tokio::test]
async fn test_failed_sign_in_keeps_store_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signin"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid credentials"))
        .mount(&server)
        .await;

    let store = MemoryCredentialStore::new();
    let (auth, navigator) = service(&server, &store);

    let result = auth
        .sign_in(&SignInRequest {
            email: "ada@example.com".into(),
            password: "wrong".into(),
        })
        .await;

    assert!(matches!(result, Err(ClientError::BadRequest(_))));
    assert!(!auth.is_authenticated());
    assert_eq!(navigator.count(), 0);
}

#[tokio::test]
async fn test_session_without_token_skips_request() {
    let server = MockServer::start().await;
    let store = MemoryCredentialStore::new();
    let (auth, _) = service(&server, &store);

    assert_eq!(auth.session().await.unwrap(), None);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_session_returns_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "u1", "email": "ada@example.com"})),
        )
        .mount(&server)
        .await;

    let store = MemoryCredentialStore::with_token("abc123");
    let (auth, _) = service(&server, &store);

    let user = auth.session().await.unwrap().unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(user.name, None);
}

#[tokio::test]
async fn test_expired_session_logs_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let store = MemoryCredentialStore::with_token("stale");
    let (auth, navigator) = service(&server, &store);

    assert_eq!(auth.session().await.unwrap(), None);
    assert!(!auth.is_authenticated());
    assert_eq!(navigator.count(), 1);
}

#[tokio::test]
async fn test_sign_out_is_local() {
    let server = MockServer::start().await;
    let store = MemoryCredentialStore::with_token("abc123");
    let (auth, navigator) = service(&server, &store);

    auth.sign_out().unwrap();

    assert_eq!(store.get_token(), None);
    assert_eq!(navigator.count(), 0);
    assert!(server.received_requests().await.unwrap().is_empty());
}
