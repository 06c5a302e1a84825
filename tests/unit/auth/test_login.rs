// Unit tests for the login exchange

use crate::common::{create_test_client, login_success_body};
use serde_json::json;
use sfs_client::{ClientError, Credentials, Method, Session, TransportError};

#[tokio::test]
async fn test_login_success_stores_session() {
    let (client, transport, store) = create_test_client();
    transport.push_json(200, json!({"session": {"UserId": 42, "token": "abc123"}}));

    let result = client.login(&Credentials::new("alice", "secret")).await;

    assert!(result.is_ok());
    assert_eq!(store.get(), Some(Session::new(42, "abc123")));
    assert_eq!(client.session(), Some(Session::new(42, "abc123")));
}

#[tokio::test]
async fn test_login_request_shape() {
    let (client, transport, _store) = create_test_client();
    transport.push_json(200, login_success_body(42, "abc123"));

    client.login(&Credentials::new("alice", "secret")).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].path, "/user/login");
    assert_eq!(requests[0].header("Content-Type"), Some("application/json"));
    assert!(requests[0].header("X-StretchFS-Token").is_none());
    assert_eq!(
        std::str::from_utf8(&requests[0].body).unwrap(),
        r#"{"tokenType":"permanent","username":"alice","password":"secret"}"#
    );
}

#[tokio::test]
async fn test_login_empty_credentials_are_sent() {
    let (client, transport, store) = create_test_client();
    transport.push_json(200, login_success_body(1, "t"));

    client.login(&Credentials::new("", "")).await.unwrap();

    assert_eq!(
        transport.request_json(0),
        json!({"tokenType": "permanent", "username": "", "password": ""})
    );
    assert_eq!(store.get(), Some(Session::new(1, "t")));
}

#[tokio::test]
async fn test_login_unauthorized_is_service_error() {
    let (client, transport, store) = create_test_client();
    transport.push_json(401, json!({"error": "invalid credentials"}));

    let result = client.login(&Credentials::new("alice", "secret")).await;

    assert_eq!(
        result,
        Err(ClientError::Service {
            status: 401,
            message: Some("invalid credentials".to_string())
        })
    );
    assert_eq!(result.unwrap_err().status_code(), Some(401));
    assert!(store.get().is_none());
}

#[tokio::test]
async fn test_login_service_error_keeps_previous_session() {
    let (client, transport, store) = create_test_client();
    store.set(7, "previous").unwrap();
    transport.push_json(500, json!({"error": "database down"}));

    let result = client.login(&Credentials::new("alice", "secret")).await;

    assert!(matches!(result, Err(ClientError::Service { status: 500, .. })));
    assert_eq!(store.get(), Some(Session::new(7, "previous")));
}

#[tokio::test]
async fn test_login_error_body_with_ok_status_is_service_error() {
    let (client, transport, store) = create_test_client();
    transport.push_json(200, json!({"error": "No user found"}));

    let result = client.login(&Credentials::new("mallory", "guess")).await;

    assert_eq!(
        result,
        Err(ClientError::Service {
            status: 200,
            message: Some("No user found".to_string())
        })
    );
    assert!(store.get().is_none());
}

#[tokio::test]
async fn test_login_transport_failure() {
    let (client, transport, store) = create_test_client();
    store.set(7, "previous").unwrap();
    transport.push_error(TransportError::Connect("connection refused".to_string()));

    let result = client.login(&Credentials::new("alice", "secret")).await;

    assert!(matches!(
        result,
        Err(ClientError::Transport(TransportError::Connect(_)))
    ));
    assert_eq!(store.get(), Some(Session::new(7, "previous")));
}

#[tokio::test]
async fn test_login_timeout() {
    let (client, transport, store) = create_test_client();
    transport.push_error(TransportError::Timeout(5));

    let result = client.login(&Credentials::new("alice", "secret")).await;

    assert_eq!(
        result,
        Err(ClientError::Transport(TransportError::Timeout(5)))
    );
    assert!(store.get().is_none());
}

#[tokio::test]
async fn test_login_missing_session_is_malformed() {
    let (client, transport, store) = create_test_client();
    store.set(7, "previous").unwrap();
    transport.push_json(200, json!({"success": "User logged in"}));

    let result = client.login(&Credentials::new("alice", "secret")).await;

    assert!(matches!(result, Err(ClientError::MalformedResponse(_))));
    assert_eq!(store.get(), Some(Session::new(7, "previous")));
}

#[tokio::test]
async fn test_login_malformed_shapes() {
    let bodies = vec![
        json!({"session": {"token": "abc123"}}),
        json!({"session": {"UserId": 42}}),
        json!({"session": {"UserId": "42", "token": "abc123"}}),
        json!({"session": {"UserId": 42.5, "token": "abc123"}}),
        json!({"session": {"UserId": 42, "token": 123}}),
        json!({"session": {"UserId": 42, "token": ""}}),
        json!({"session": "abc123"}),
        json!({"session": null}),
        json!([1, 2, 3]),
    ];

    for body in bodies {
        let (client, transport, store) = create_test_client();
        transport.push_json(200, body.clone());

        let result = client.login(&Credentials::new("alice", "secret")).await;

        assert!(
            matches!(result, Err(ClientError::MalformedResponse(_))),
            "expected MalformedResponse for {}, got {:?}",
            body,
            result
        );
        assert!(store.get().is_none());
    }
}

#[tokio::test]
async fn test_login_non_json_body_is_malformed() {
    let (client, transport, store) = create_test_client();
    transport.push_raw(200, "<html>welcome</html>");

    let result = client.login(&Credentials::new("alice", "secret")).await;

    assert!(matches!(result, Err(ClientError::MalformedResponse(_))));
    assert!(store.get().is_none());
}

#[tokio::test]
async fn test_second_login_overwrites_session() {
    let (client, transport, store) = create_test_client();
    transport.push_json(200, login_success_body(1, "first-token"));
    transport.push_json(200, login_success_body(2, "second-token"));

    client.login(&Credentials::new("alice", "secret")).await.unwrap();
    client.login(&Credentials::new("bob", "hunter2")).await.unwrap();

    assert_eq!(store.get(), Some(Session::new(2, "second-token")));
    assert_eq!(transport.request_json(1)["username"], "bob");
}

#[tokio::test]
async fn test_failed_relogin_keeps_first_session() {
    let (client, transport, store) = create_test_client();
    transport.push_json(200, login_success_body(1, "first-token"));
    transport.push_json(401, json!({"error": "invalid credentials"}));

    client.login(&Credentials::new("alice", "secret")).await.unwrap();
    let result = client.login(&Credentials::new("alice", "wrong")).await;

    assert!(result.is_err());
    assert_eq!(store.get(), Some(Session::new(1, "first-token")));
}

#[tokio::test]
async fn test_login_large_user_id() {
    let (client, transport, store) = create_test_client();
    transport.push_json(200, login_success_body(i64::MAX, "big"));

    client.login(&Credentials::new("alice", "secret")).await.unwrap();

    assert_eq!(store.get().unwrap().user_id, i64::MAX);
}
