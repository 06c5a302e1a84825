// End-to-end login flow over the reqwest transport

use mockito::{Matcher, Server};
use serde_json::json;
use sfs_client::{AuthClient, ClientError, Credentials, HttpTransport, Session, SessionStore};
use std::sync::Arc;

fn create_client(base_url: &str) -> (AuthClient, Arc<SessionStore>) {
    let transport = HttpTransport::with_base_url(base_url, 5).unwrap();
    let store = Arc::new(SessionStore::new());
    (AuthClient::new(Arc::new(transport), store.clone()), store)
}

#[tokio::test]
async fn test_login_success() {
    let mut server = Server::new_async().await;
    let (client, store) = create_client(&server.url());

    let mock = server
        .mock("POST", "/user/login")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "tokenType": "permanent",
            "username": "alice",
            "password": "secret"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"session": {"UserId": 42, "token": "abc123"}}).to_string())
        .create_async()
        .await;

    let result = client.login(&Credentials::new("alice", "secret")).await;

    mock.assert_async().await;
    assert!(result.is_ok());
    assert_eq!(store.get(), Some(Session::new(42, "abc123")));
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let mut server = Server::new_async().await;
    let (client, store) = create_client(&server.url());

    let mock = server
        .mock("POST", "/user/login")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(json!({"error": "invalid credentials"}).to_string())
        .create_async()
        .await;

    let result = client.login(&Credentials::new("alice", "secret")).await;

    mock.assert_async().await;
    assert_eq!(
        result,
        Err(ClientError::Service {
            status: 401,
            message: Some("invalid credentials".to_string())
        })
    );
    assert!(store.get().is_none());
}

#[tokio::test]
async fn test_full_session_lifecycle() {
    let mut server = Server::new_async().await;
    let (client, store) = create_client(&server.url());

    let login = server
        .mock("POST", "/user/login")
        .with_status(200)
        .with_body(
            json!({
                "success": "User logged in",
                "session": {"UserId": 7, "token": "tok-7"}
            })
            .to_string(),
        )
        .create_async()
        .await;
    let validate = server
        .mock("POST", "/user/session/validate")
        .match_header("x-stretchfs-token", "tok-7")
        .with_status(200)
        .with_body(json!({"success": "Session Valid"}).to_string())
        .create_async()
        .await;
    let logout = server
        .mock("POST", "/user/logout")
        .match_header("x-stretchfs-token", "tok-7")
        .with_status(200)
        .with_body(json!({"success": "User logged out"}).to_string())
        .create_async()
        .await;

    client.login(&Credentials::new("test", "test")).await.unwrap();
    client.validate_session().await.unwrap();
    client.logout().await.unwrap();

    login.assert_async().await;
    validate.assert_async().await;
    logout.assert_async().await;
    assert!(store.get().is_none());
}

#[tokio::test]
async fn test_expired_session_is_cleared() {
    let mut server = Server::new_async().await;
    let (client, store) = create_client(&server.url());
    store.set(7, "stale").unwrap();

    let mock = server
        .mock("POST", "/user/session/validate")
        .with_status(401)
        .with_body(json!({"error": "Invalid session"}).to_string())
        .create_async()
        .await;

    let result = client.validate_session().await;

    mock.assert_async().await;
    assert!(result.unwrap_err().is_unauthorized());
    assert!(store.get().is_none());
}

#[tokio::test]
async fn test_ping() {
    let mut server = Server::new_async().await;
    let (client, _store) = create_client(&server.url());

    let mock = server
        .mock("POST", "/ping")
        .with_status(200)
        .with_body(json!({"pong": "pong"}).to_string())
        .create_async()
        .await;

    assert!(client.ping().await.is_ok());
    mock.assert_async().await;
}
