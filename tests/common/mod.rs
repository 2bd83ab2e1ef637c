use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestRequest, TestServer};
use tempfile::TempDir;

use projman::api::{self, AppState};
use projman::config::ServerConfig;
use projman::db::Database;

pub const API_KEY: &str = "test-key";

/// Spin up the production router over a fresh store in a temp directory.
///
/// The `TempDir` is returned alongside the server so the backing file
/// outlives the test.
pub fn test_server() -> (TestServer, TempDir) {
    let dir = TempDir::new().expect("create temp dir");
    let db_path = dir.path().join("projects.db");
    let db = Database::open(&db_path).expect("open store");
    db.migrate().expect("apply schema");

    let config = ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        api_key: API_KEY.into(),
        db_path,
    };
    let state = AppState {
        db,
        config: Arc::new(config),
    };
    let server = TestServer::new(api::router(state)).expect("start test server");
    (server, dir)
}

/// Attach the API key every authenticated request needs.
pub fn authed(request: TestRequest) -> TestRequest {
    request.add_header(
        HeaderName::from_static("x-api-key"),
        HeaderValue::from_static(API_KEY),
    )
}
