//! Integration tests for the backend client

use kitebot_frontend_common::api::types::{FeedbackRequest, LoginRequest, RegisterRequest};
use kitebot_frontend_common::{ApiClient, ApiConfig, ClientError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn wrong_login() -> LoginRequest {
    LoginRequest {
        email: "nobody@example.com".into(),
        password: "wrong".into(),
    }
}

fn client_for(server: &MockServer) -> ApiClient {
    let config = ApiConfig::new(format!("{}/api/", server.uri())).unwrap();
    ApiClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_login_posts_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"email": "bob@example.com", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "Giriş başarılı.",
            "username": "bob",
            "key": "K1",
            "expiry": "2025-06-01 00:00:00"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(client.base_url().ends_with("/api"));

    let response = client
        .login(&LoginRequest {
            email: "bob@example.com".into(),
            password: "hunter2".into(),
        })
        .await
        .unwrap();

    assert!(response.is_success());
    assert_eq!(response.key.as_deref(), Some("K1"));
    assert_eq!(response.username.as_deref(), Some("bob"));
}

#[tokio::test]
async fn test_register_sends_username() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/register"))
        .and(body_json(json!({
            "email": "carol@example.com",
            "password": "pw",
            "username": "carol"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": "success",
            "message": "Kayıt başarılı!",
            "username": "carol",
            "key": "AB12-CD34-EF56-7890",
            "expiry": "2025-06-04 12:00:00"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client_for(&mock_server)
        .register(&RegisterRequest {
            email: "carol@example.com".into(),
            password: "pw".into(),
            username: "carol".into(),
        })
        .await
        .unwrap();

    assert_eq!(response.key.as_deref(), Some("AB12-CD34-EF56-7890"));
}

#[tokio::test]
async fn test_error_status_keeps_server_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": "error",
            "message": "E-posta veya şifre hatalı."
        })))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .login(&wrong_login())
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, ClientError::Rejected { status: 401, .. }));
    assert_eq!(err.server_message(), Some("E-posta veya şifre hatalı."));
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_ok_status_with_failure_body_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/submit_feedback"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "fail", "message": "too short"})),
        )
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .submit_feedback(&FeedbackRequest {
            key: "K1".into(),
            kind: "bug".into(),
            content: "x".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Rejected { status: 200, .. }));
    assert_eq!(err.server_message(), Some("too short"));
}

#[tokio::test]
async fn test_non_json_body_is_a_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .login(&wrong_login())
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.server_message(), None);
}

#[tokio::test]
async fn test_unreachable_backend() {
    // Reserve a port, then free it so nothing is listening there
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let config = ApiConfig::new(format!("http://127.0.0.1:{port}/api")).unwrap();
    let client = ApiClient::new(&config).unwrap();

    let err = client
        .login(&wrong_login())
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_check_key_reports_remaining_days() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/check_key"))
        .and(body_json(json!({"key": "K1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "Key geçerli ve aktif.",
            "username": "bob",
            "remaining_days": 2
        })))
        .mount(&mock_server)
        .await;

    let response = client_for(&mock_server).check_key("K1").await.unwrap();
    assert_eq!(response.remaining_days, Some(2));
}
