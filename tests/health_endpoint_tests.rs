use axum::http::StatusCode;
use axum_test::TestServer;
use studybuddy_bot::services::health::HealthService;
use studybuddy_bot::store::RecordStore;
use tempfile::TempDir;

fn test_server(store: RecordStore) -> TestServer {
    let service = HealthService::new(store);
    TestServer::new(service.router).expect("Failed to create test server")
}

#[tokio::test]
async fn liveness_routes_return_status_text() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::load(dir.path().join("user_data.json"));
    store.get_or_create(1, "Alice");
    store.get_or_create(2, "Bob");
    let server = test_server(store);

    for route in ["/", "/health", "/ping"] {
        let response = server.get(route).await;
        assert_eq!(response.status_code(), StatusCode::OK, "route {route}");
        let body = response.text();
        assert!(body.starts_with("OK - StudyBuddy"), "route {route}: {body}");
        assert!(body.contains("2 users"), "route {route}: {body}");
    }
}

#[tokio::test]
async fn wakeup_returns_distinct_confirmation() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::load(dir.path().join("user_data.json"));
    let server = test_server(store);

    let response = server.get("/wakeup").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "Awake! StudyBuddy is running.");
}

#[tokio::test]
async fn empty_store_probes_still_succeed() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::load(dir.path().join("user_data.json"));
    let server = test_server(store);

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("0 users"));
}
