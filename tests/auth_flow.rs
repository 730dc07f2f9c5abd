use authrelay::api::download::save_stream;
use authrelay::api::{ApiClient, Gateway};
use authrelay::error::AuthRelayError;
use authrelay::models::{AuthResponse, SessionKey};
use authrelay::session::{FilesystemCookieStore, KeyValueStore, SessionContext};
use authrelay::ui::{NavigationEvent, RecordingNavigator};
use serde_json::json;
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(
    server: &MockServer,
    temp_dir: &TempDir,
) -> (Gateway, Arc<SessionContext>, Arc<dyn KeyValueStore>, Arc<RecordingNavigator>) {
    let store: Arc<dyn KeyValueStore> =
        Arc::new(FilesystemCookieStore::new(temp_dir.path().join("cookies.json")));
    let session = Arc::new(SessionContext::with_default_expiry(store.clone()).unwrap());
    let navigator = Arc::new(RecordingNavigator::new());
    let client = ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap();
    let gateway = Gateway::new(client, session.clone(), navigator.clone())
        .with_download_dir(temp_dir.path().join("downloads"));
    (gateway, session, store, navigator)
}

#[tokio::test]
async fn test_login_does_not_persist_until_caller_does() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"Username": "alice", "Password": "secret"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"accessToken": "A1", "refreshToken": "R1"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/profile"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "alice"})))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let (gateway, session, store, _) = gateway(&server, &temp_dir);

    let response = gateway.authenticate("alice", "secret").await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(store.get("access_token").unwrap(), None);

    let auth: AuthResponse = response.json().unwrap();
    session.establish("alice", "admin", auth).unwrap();
    assert_eq!(store.get("is_loggedin").unwrap(), Some("true".to_string()));

    let profile = gateway.get("/profile").await.unwrap();
    assert_eq!(profile.body["name"], "alice");
}

#[tokio::test]
async fn test_login_failure_is_returned_raw() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "bad creds"})))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let (gateway, session, _, navigator) = gateway(&server, &temp_dir);

    let response = gateway.authenticate("alice", "wrong").await.unwrap();
    assert_eq!(response.status, 401);
    assert_eq!(response.body["message"], "bad creds");
    assert!(!session.is_logged_in());
    assert!(navigator.events().is_empty());
}

#[tokio::test]
async fn test_logout_clears_all_keys_and_reloads() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let (gateway, session, store, navigator) = gateway(&server, &temp_dir);
    session
        .establish(
            "alice",
            "admin",
            AuthResponse {
                access_token: "A1".to_string(),
                refresh_token: "R1".to_string(),
            },
        )
        .unwrap();

    gateway.logout().unwrap();

    for key in SessionKey::ALL {
        assert_eq!(store.get(key.as_str()).unwrap(), None);
    }
    assert_eq!(navigator.events(), vec![NavigationEvent::Reload]);
}

#[tokio::test]
async fn test_auto_login_follows_flag_only() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let (gateway, _, store, navigator) = gateway(&server, &temp_dir);

    assert!(!gateway.auto_login());
    assert!(navigator.events().is_empty());

    // Flag without tokens still redirects
    store
        .set("is_loggedin", "true", chrono::Duration::days(30))
        .unwrap();
    let session = Arc::new(SessionContext::with_default_expiry(store).unwrap());
    let navigator = Arc::new(RecordingNavigator::new());
    let client = ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap();
    let gateway = Gateway::new(client, session, navigator.clone());

    assert!(gateway.auto_login());
    assert_eq!(
        navigator.events(),
        vec![NavigationEvent::Redirect("/dashboard".to_string())]
    );
}

#[tokio::test]
async fn test_download_saves_blob_without_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reports/export"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-disposition", "attachment; filename=\"report.xlsx\"")
                .set_body_bytes(vec![0x50, 0x4b, 0x03, 0x04]),
        )
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let (gateway, session, _, _) = gateway(&server, &temp_dir);
    session
        .establish(
            "alice",
            "admin",
            AuthResponse {
                access_token: "A1".to_string(),
                refresh_token: "R1".to_string(),
            },
        )
        .unwrap();

    let file = gateway
        .download("/reports/export", Some(json!({"year": 2024})))
        .await
        .unwrap();

    assert_eq!(file.bytes, 4);
    assert_eq!(file.path, temp_dir.path().join("downloads").join("report.xlsx"));
    assert_eq!(fs::read(&file.path).unwrap(), vec![0x50, 0x4b, 0x03, 0x04]);

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_download_without_disposition_gets_generated_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reports/export"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let (gateway, _, _, _) = gateway(&server, &temp_dir);

    let file = gateway.download("/reports/export", None).await.unwrap();
    let name = file.path.file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.starts_with("download-"));
    assert!(name.ends_with(".xlsx"));
}

#[tokio::test]
async fn test_download_failure_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reports/export"))
        .respond_with(ResponseTemplate::new(500).set_body_string("export failed"))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let (gateway, _, _, _) = gateway(&server, &temp_dir);

    let err = gateway.download("/reports/export", None).await.unwrap_err();
    assert!(matches!(err, AuthRelayError::RequestFailed { status: 500, .. }));
    assert_eq!(err.body().unwrap(), "export failed");
}

#[tokio::test]
async fn test_interrupted_stream_leaves_no_file() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("report.xlsx");
    let chunks: Vec<authrelay::Result<Vec<u8>>> = vec![
        Ok(vec![1, 2, 3]),
        Err(AuthRelayError::Other("connection reset".to_string())),
    ];

    let result = save_stream(futures::stream::iter(chunks), &target).await;

    assert!(result.is_err());
    assert!(!target.exists());
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_complete_stream_is_moved_into_place() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("report.xlsx");
    let chunks: Vec<authrelay::Result<Vec<u8>>> = vec![Ok(vec![1, 2]), Ok(vec![3])];

    let written = save_stream(futures::stream::iter(chunks), &target).await.unwrap();

    assert_eq!(written, 3);
    assert_eq!(fs::read(&target).unwrap(), vec![1, 2, 3]);
    assert!(!temp_dir.path().join("report.xlsx.part").exists());
}
