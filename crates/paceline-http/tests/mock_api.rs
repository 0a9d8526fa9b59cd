//! Mock server tests for the paceline HTTP client.
//!
//! These tests use wiremock to stand in for the running-analysis backend and
//! check the client's token handling without network access.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use paceline_core::error::{DecodeError, InvalidInputError};
use paceline_core::model::{
    BandData, BindRequest, ExerciseQuery, ExportFormat, GeneratePlan, NewExercise, PlanStatus,
    PlanType, RegisterRequest, TreadmillData, UserUpdate, VerificationChannel, VideoAngle,
};
use paceline_core::{
    ApiUrl, BearerToken, Credentials, Error, KeyValueStore, MemoryStore, Session, TOKEN_KEY,
};
use paceline_http::ApiClient;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create an API URL from a mock server.
fn mock_api_url(server: &MockServer) -> ApiUrl {
    ApiUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

/// A client whose session is backed by `store`, counting login redirects.
fn client_with(server: &MockServer, store: MemoryStore) -> (ApiClient, Arc<AtomicUsize>) {
    let redirects = Arc::new(AtomicUsize::new(0));
    let counter = redirects.clone();

    let session = Session::restore(store).unwrap();
    let client = ApiClient::builder(mock_api_url(server))
        .session(session)
        .redirect(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .build()
        .unwrap();

    (client, redirects)
}

// ============================================================================
// Token Handling Tests
// ============================================================================

#[tokio::test]
async fn test_bearer_header_matches_stored_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "username": "runner"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::with_token("abc"));
    let user = client.auth().me().await.unwrap();

    assert_eq!(user.username.as_deref(), Some("runner"));
    assert_eq!(client.session().user_info(), Some(user));
}

#[tokio::test]
async fn test_no_token_at_startup_sends_no_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "heartRate": {"avg": 0, "max": 0, "min": 0, "data": []},
            "pace": {"avg": 0, "max": 0, "min": 0, "data": []},
            "calories": {"avg": 0, "max": 0, "min": 0, "data": []},
            "dates": []
        })))
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::new());
    assert!(!client.session().is_logged_in());

    let stats = client.exercise().statistics(None).await.unwrap();
    assert!(stats.dates.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
    assert_eq!(
        requests[0].headers.get("content-type").unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn test_unauthorized_tears_down_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Could not validate credentials"
        })))
        .mount(&server)
        .await;

    let store = MemoryStore::with_token("stale");
    let (client, redirects) = client_with(&server, store.clone());
    assert!(client.session().is_logged_in());

    let err = client.auth().me().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.status(), Some(401));
    assert!(!client.session().is_logged_in());
    assert!(client.session().token().is_none());
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(redirects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_each_unauthorized_response_redirects_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/video/list"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (client, redirects) = client_with(&server, MemoryStore::with_token("stale"));

    assert!(client.video().list(None).await.is_err());
    assert!(client.video().list(None).await.is_err());

    assert_eq!(redirects.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_success_body_passes_through_unmodified() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/custom"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"a": 1})))
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::new());
    let value: Value = client.get(&["api", "custom"], &()).await.unwrap();

    assert_eq!(value, json!({"a": 1}));
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/custom"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::new());
    let value: Value = client.delete(&["api", "custom"]).await.unwrap();

    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn test_error_detail_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/exercise/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "detail": "record not found"
        })))
        .mount(&server)
        .await;

    let (client, redirects) = client_with(&server, MemoryStore::with_token("abc"));
    let err = client.exercise().get("missing").await.unwrap_err();

    match err {
        Error::Http(e) => {
            assert_eq!(e.status, 404);
            assert_eq!(e.message.as_deref(), Some("record not found"));
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }
    // Only 401 ends the session.
    assert!(client.session().is_logged_in());
    assert_eq!(redirects.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_error_without_detail_reads_request_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/training-plan/list"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::with_token("abc"));
    let err = client.plan().list(None).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "HTTP 500: request failed");
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/exercise"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::new());
    let err = client
        .exercise()
        .list(&ExerciseQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode(DecodeError::Response { .. })));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Bind then drop a listener so the port is closed.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let api = ApiUrl::new(format!("http://127.0.0.1:{}", port)).unwrap();

    let client = ApiClient::new(api, Session::ephemeral()).unwrap();
    let err = client.plan().list(None).await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn test_truncated_error_body_has_no_detail() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;
        // Announce a longer body than is sent, then hang up.
        socket
            .write_all(
                b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 100\r\n\r\n{\"detail\"",
            )
            .await
            .unwrap();
    });

    let api = ApiUrl::new(format!("http://127.0.0.1:{}", port)).unwrap();
    let client = ApiClient::new(api, Session::ephemeral()).unwrap();
    let err = client.plan().list(None).await.unwrap_err();

    match err {
        Error::Http(e) => {
            assert_eq!(e.status, 500);
            assert_eq!(e.message, None);
        }
        other => panic!("expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_sends_bearer_header() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/video/v1"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::with_token("abc"));
    let value: Value = client.delete(&["api", "video", "v1"]).await.unwrap();

    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn test_path_ids_are_percent_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/training-plan/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "a/b"})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::new());
    let plan = client.plan().get("a/b").await.unwrap();

    assert_eq!(plan.id, "a/b");
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_login_persists_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"phone": "123", "password": "abc"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "T"
        })))
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let (client, _) = client_with(&server, store.clone());

    let token = client
        .auth()
        .login(&Credentials::phone("123", "abc"))
        .await
        .unwrap();

    assert_eq!(token.access_token, "T");
    assert_eq!(token.token_type, "bearer");
    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("T"));
    assert!(client.session().is_logged_in());
}

#[tokio::test]
async fn test_login_failure_leaves_session_logged_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Incorrect phone/email or password"
        })))
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let (client, _) = client_with(&server, store.clone());

    let err = client
        .auth()
        .login(&Credentials::email("a@b.co", "wrong"))
        .await
        .unwrap_err();

    match err {
        Error::Unauthorized { message } => {
            assert_eq!(message.as_deref(), Some("Incorrect phone/email or password"));
        }
        other => panic!("expected unauthorized, got {:?}", other),
    }
    assert!(!client.session().is_logged_in());
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_wechat_login_sends_openid_only() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"wechat_openid": "o-123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "W",
            "token_type": "bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::new());
    client.auth().login(&Credentials::wechat("o-123")).await.unwrap();

    assert_eq!(client.session().token().unwrap().as_str(), "W");
}

#[tokio::test]
async fn test_register_and_login() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(json!({
            "username": "runner",
            "phone": "13800138000",
            "password": "secret1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "u1",
            "username": "runner",
            "phone": "13800138000",
            "is_active": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"phone": "13800138000", "password": "secret1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::new());
    let request = RegisterRequest {
        username: Some("runner".to_string()),
        phone: Some("13800138000".to_string()),
        password: "secret1".to_string(),
        ..RegisterRequest::default()
    };

    let (user, token) = client.auth().register_and_login(&request).await.unwrap();

    assert_eq!(user.id.as_deref(), Some("u1"));
    assert_eq!(token.access_token, "fresh");
    assert_eq!(client.session().user_info(), Some(user));
}

#[tokio::test]
async fn test_register_validates_before_sending() {
    let server = MockServer::start().await;
    let (client, _) = client_with(&server, MemoryStore::new());

    let request = RegisterRequest {
        email: Some("runner@example.com".to_string()),
        password: "123".to_string(),
        ..RegisterRequest::default()
    };
    let err = client.auth().register(&request).await.unwrap_err();

    assert!(matches!(
        err,
        Error::InvalidInput(InvalidInputError::Field { field: "password", .. })
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_verification_code_uses_query_string() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/send-verification-code"))
        .and(query_param("email", "runner@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "verification code sent",
            "code": "123456"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::with_token("abc"));
    let response = client
        .auth()
        .send_verification_code(&VerificationChannel::Email(
            "runner@example.com".to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.code.as_deref(), Some("123456"));
}

#[tokio::test]
async fn test_logout_is_local() {
    let server = MockServer::start().await;

    let store = MemoryStore::with_token("abc");
    let (client, redirects) = client_with(&server, store.clone());

    client.auth().logout().unwrap();

    assert!(!client.session().is_logged_in());
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(redirects.load(Ordering::SeqCst), 0);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_me_puts_changed_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer abc"))
        .and(body_json(json!({"username": "pacer", "gender": "female"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "username": "pacer",
            "gender": "female"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::with_token("abc"));
    let user = client
        .auth()
        .update_me(&UserUpdate {
            username: Some("pacer".to_string()),
            gender: Some("female".to_string()),
            ..UserUpdate::default()
        })
        .await
        .unwrap();

    assert_eq!(user.username.as_deref(), Some("pacer"));
    assert_eq!(client.session().user_info(), Some(user));
}

#[tokio::test]
async fn test_update_me_rejects_empty_update() {
    let server = MockServer::start().await;
    let (client, _) = client_with(&server, MemoryStore::with_token("abc"));

    let err = client
        .auth()
        .update_me(&UserUpdate::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_bind_posts_contact_details() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/bind"))
        .and(header("authorization", "Bearer abc"))
        .and(body_json(json!({
            "email": "runner@example.com",
            "verification_code": "123456"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "phone": "13800138000",
            "email": "runner@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::with_token("abc"));
    let user = client
        .auth()
        .bind(&BindRequest {
            email: Some("runner@example.com".to_string()),
            verification_code: Some("123456".to_string()),
            ..BindRequest::default()
        })
        .await
        .unwrap();

    assert_eq!(user.email.as_deref(), Some("runner@example.com"));
    assert_eq!(
        client.session().user_info().unwrap().email.as_deref(),
        Some("runner@example.com")
    );
}

// ============================================================================
// Exercise and Plan Tests
// ============================================================================

#[tokio::test]
async fn test_list_exercise_with_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/exercise"))
        .and(query_param("userId", "user001"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "e1",
                "userId": "user001",
                "timestamp": "2024-06-01T08:30:00",
                "bandData": {"heartRate": 150, "pace": 5.5}
            },
            {
                "id": "e2",
                "userId": "user001",
                "timestamp": "2024-05-31T08:30:00",
                "treadmillData": {"speed": 10.0, "distance": 5.0}
            }
        ])))
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::new());
    let records = client
        .exercise()
        .list(&ExerciseQuery {
            user_id: Some("user001".to_string()),
            limit: Some(2),
            skip: None,
        })
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    let band = records[0].data.band_data.as_ref().unwrap();
    assert_eq!(band.heart_rate, Some(150));
}

#[tokio::test]
async fn test_create_exercise_posts_record() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/exercise"))
        .and(body_json(json!({
            "userId": "user001",
            "bandData": {"heartRate": 150},
            "treadmillData": {"distance": 5.0}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "e9",
            "userId": "user001",
            "timestamp": "2024-06-04T07:30:12.123456",
            "bandData": {"heartRate": 150},
            "treadmillData": {"distance": 5.0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::with_token("abc"));
    let record = client
        .exercise()
        .create(&NewExercise {
            user_id: Some("user001".to_string()),
            band_data: Some(BandData {
                heart_rate: Some(150),
                ..BandData::default()
            }),
            treadmill_data: Some(TreadmillData {
                distance: Some(5.0),
                ..TreadmillData::default()
            }),
            ..NewExercise::default()
        })
        .await
        .unwrap();

    assert_eq!(record.id.as_deref(), Some("e9"));
    assert!(record.timestamp.is_some());
    assert_eq!(record.data.treadmill_data.unwrap().distance, Some(5.0));
}

#[tokio::test]
async fn test_create_exercise_rejects_empty_record() {
    let server = MockServer::start().await;
    let (client, _) = client_with(&server, MemoryStore::with_token("abc"));

    let err = client
        .exercise()
        .create(&NewExercise::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::InvalidInput(InvalidInputError::Other { .. })
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_exercise_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/exercise/e1"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "e1",
            "userId": "user001",
            "timestamp": "2024-06-01T08:30:00",
            "basicInfo": {"age": 30, "weight": 62.5}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::with_token("abc"));
    let record = client.exercise().get("e1").await.unwrap();

    assert_eq!(record.id.as_deref(), Some("e1"));
    assert_eq!(record.data.user_id.as_deref(), Some("user001"));
    assert_eq!(record.data.basic_info.unwrap().weight, Some(62.5));
}

#[tokio::test]
async fn test_generate_plan_sends_query_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/training-plan/generate"))
        .and(header("authorization", "Bearer abc"))
        .and(query_param("plan_type", "long"))
        .and(query_param("goal", "improve_endurance"))
        .and(query_param("days", "60"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "plan generated",
            "plan_id": "p1",
            "plan": {"title": "Endurance block", "duration": 12}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::with_token("abc"));
    let generated = client
        .plan()
        .generate(&GeneratePlan {
            plan_type: PlanType::Long,
            goal: "improve_endurance".to_string(),
            days: 60,
        })
        .await
        .unwrap();

    assert_eq!(generated.plan_id, "p1");
    assert_eq!(generated.plan["title"], "Endurance block");
}

#[tokio::test]
async fn test_list_plans_by_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/training-plan/list"))
        .and(query_param("status_filter", "active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "plans": [{"id": "p1", "status": "active", "duration": 4}]
        })))
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::with_token("abc"));
    let list = client.plan().list(Some(PlanStatus::Active)).await.unwrap();

    assert_eq!(list.plans.len(), 1);
    assert_eq!(list.plans[0].status, Some(PlanStatus::Active));
}

// ============================================================================
// Upload Tests
// ============================================================================

fn video_file(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"\x00\x00\x00\x18ftypmp42").unwrap();
    path
}

#[tokio::test]
async fn test_upload_sends_multipart_with_angle() {
    let server = MockServer::start().await;
    let dir = tempfile::TempDir::new().unwrap();
    let file = video_file(&dir, "run.mp4");

    Mock::given(method("POST"))
        .and(path("/api/video/upload"))
        .and(header("authorization", "Bearer abc"))
        .and(query_param("angle", "side"))
        .and(body_string_contains("name=\"file\"; filename=\"run.mp4\""))
        .and(body_string_contains("name=\"angle\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "uploaded",
            "video_id": "v1",
            "filename": "u1_side_20240601_083000.mp4",
            "angle": "side",
            "file_size": 12
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::with_token("abc"));
    let upload = client
        .video()
        .upload(&file, VideoAngle::Side)
        .await
        .unwrap();

    assert_eq!(upload.video_id, "v1");
    assert_eq!(upload.file_size, 12);

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0].headers.get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().starts_with("multipart/form-data"));
}

#[tokio::test]
async fn test_upload_malformed_json_is_upload_decode_error() {
    let server = MockServer::start().await;
    let dir = tempfile::TempDir::new().unwrap();
    let file = video_file(&dir, "run.webm");

    Mock::given(method("POST"))
        .and(path("/api/video/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"video_id\": "))
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::with_token("abc"));
    let err = client
        .video()
        .upload(&file, VideoAngle::Front)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode(DecodeError::Upload { .. })));
    assert!(err.status().is_none());
}

#[tokio::test]
async fn test_upload_unauthorized_tears_down_session() {
    let server = MockServer::start().await;
    let dir = tempfile::TempDir::new().unwrap();
    let file = video_file(&dir, "run.mov");

    Mock::given(method("POST"))
        .and(path("/api/video/upload"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let store = MemoryStore::with_token("stale");
    let (client, redirects) = client_with(&server, store.clone());
    let err = client
        .video()
        .upload(&file, VideoAngle::Back)
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(redirects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_upload_rejects_unsupported_file_locally() {
    let server = MockServer::start().await;
    let dir = tempfile::TempDir::new().unwrap();
    let file = video_file(&dir, "run.gif");

    let (client, _) = client_with(&server, MemoryStore::with_token("abc"));
    let err = client
        .video()
        .upload(&file, VideoAngle::Front)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::InvalidInput(InvalidInputError::Video { .. })
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_analyze_video() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/video/v1/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "analysis complete",
            "analysis_result": {"score": 85, "posture": "upright"}
        })))
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::with_token("abc"));
    let analysis = client.video().analyze("v1").await.unwrap();

    assert_eq!(analysis.analysis_result["score"], 85);
}

#[tokio::test]
async fn test_preview_returns_video_bytes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/video/v1/preview"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-disposition", "attachment; filename=u1_side.mp4")
                .set_body_raw(b"\x00\x00\x00\x18ftypmp42".to_vec(), "video/mp4"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::with_token("abc"));
    let video = client.video().preview("v1").await.unwrap();

    assert_eq!(video.filename, "u1_side.mp4");
    assert_eq!(video.content_type.as_deref(), Some("video/mp4"));
    assert_eq!(video.bytes, b"\x00\x00\x00\x18ftypmp42");

    let dir = tempfile::TempDir::new().unwrap();
    let saved = video.save_to(dir.path()).await.unwrap();
    assert_eq!(saved, dir.path().join("u1_side.mp4"));
}

#[tokio::test]
async fn test_preview_without_disposition_uses_default_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/video/v2/preview"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"data".to_vec(), "video/mp4"))
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::with_token("abc"));
    let video = client.video().preview("v2").await.unwrap();

    assert_eq!(video.filename, "video.mp4");
    assert_eq!(video.bytes, b"data");
}

// ============================================================================
// Export Tests
// ============================================================================

#[tokio::test]
async fn test_export_returns_raw_bytes() {
    let server = MockServer::start().await;

    // Deliberately not valid JSON: the client must not try to parse it.
    Mock::given(method("GET"))
        .and(path("/api/export/json"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"[{\"id\": ".to_vec(), "application/json"),
        )
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::with_token("abc"));
    let payload = client
        .export()
        .download(ExportFormat::Json, None)
        .await
        .unwrap();

    assert_eq!(payload.bytes, b"[{\"id\": ");
    assert_eq!(payload.filename, "running_data.json");
    assert_eq!(payload.format, ExportFormat::Json);
}

#[tokio::test]
async fn test_export_uses_content_disposition_filename() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/export/csv"))
        .and(query_param("userId", "user001"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-disposition", "attachment; filename=running_data_user001.csv")
                .set_body_raw(b"id,timestamp\n".to_vec(), "text/csv"),
        )
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::with_token("abc"));
    let payload = client
        .export()
        .download(ExportFormat::Csv, Some("user001"))
        .await
        .unwrap();

    assert_eq!(payload.filename, "running_data_user001.csv");
    assert_eq!(payload.content_type.as_deref(), Some("text/csv"));

    let dir = tempfile::TempDir::new().unwrap();
    let saved = payload.save_to(dir.path()).await.unwrap();
    assert_eq!(std::fs::read(saved).unwrap(), b"id,timestamp\n");
}

#[tokio::test]
async fn test_export_error_carries_no_detail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/export/pdf"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "detail": "PDF export unavailable"
        })))
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::with_token("abc"));
    let err = client
        .export()
        .download(ExportFormat::Pdf, None)
        .await
        .unwrap_err();

    match err {
        Error::Http(e) => {
            assert_eq!(e.status, 500);
            assert_eq!(e.message, None);
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_export_unauthorized_tears_down_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/export/csv"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let store = MemoryStore::with_token("stale");
    let (client, redirects) = client_with(&server, store.clone());
    let err = client
        .export()
        .download(ExportFormat::Csv, None)
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!client.session().is_logged_in());
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(redirects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_login_after_teardown_restores_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/video/list"))
        .and(header("authorization", "Bearer renewed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"videos": []})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_with(&server, MemoryStore::new());
    client.session().login(BearerToken::new("renewed")).unwrap();

    let list = client.video().list(None).await.unwrap();
    assert!(list.videos.is_empty());
}
