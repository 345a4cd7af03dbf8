//! Test helper functions: fake summary backend, logging, CLI runner

use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::json;
use std::path::Path;
use std::process::{Output, Stdio};
use std::sync::Once;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::process::Command;

static INIT_LOGGER: Once = Once::new();

/// Initialize test logging (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("tenant_dashboard=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Summary with two day buckets and one record lacking createdAt
pub fn sample_payload() -> serde_json::Value {
    json!({
        "totalCount": 4,
        "latest": [
            {"schoolId": "SCH-004", "schoolName": "Riverside", "createdAt": "2025-07-01T09:00:00 IST"},
            {"schoolId": "SCH-003", "createdAt": "2025-06-22T11:00:00 IST"}
        ],
        "all": [
            {"schoolId": "SCH-001", "createdAt": "2025-06-22T10:00:00 IST"},
            {"schoolId": "SCH-002", "createdAt": "2025-06-22T11:00:00 IST"},
            {"schoolId": "SCH-003", "createdAt": "2025-07-01T09:00:00 IST"},
            {"schoolId": "SCH-004"}
        ]
    })
}

/// Start a backend on an ephemeral port and return its base URL
pub async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Backend answering `/list` with `payload`
pub async fn spawn_summary_backend(payload: serde_json::Value) -> String {
    let router = Router::new().route(
        "/list",
        get(move || {
            let payload = payload.clone();
            async move { Json(payload) }
        }),
    );
    spawn_backend(router).await
}

/// Backend whose `/list` always fails with 500
pub async fn spawn_failing_backend() -> String {
    let router = Router::new().route(
        "/list",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database down") }),
    );
    spawn_backend(router).await
}

/// Run the CLI binary in `dir` with JSON logs on stderr
///
/// `dir` doubles as HOME so no user config is picked up.
pub async fn run_cli(dir: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tenant-dashboard"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir)
        .env("RUST_LOG", "tenant_dashboard=info")
        .env("TENANT_DASHBOARD_LOG_FORMAT", "json")
        .env_remove("TENANT_DASHBOARD_BACKEND_URL")
        .env_remove("TENANT_DASHBOARD_GRANULARITY")
        .env_remove("TENANT_DASHBOARD_LOG_LEVEL")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start tenant-dashboard");

    let mut pipe = child.stdin.take().unwrap();
    pipe.write_all(stdin.as_bytes()).await.unwrap();
    drop(pipe);

    tokio::time::timeout(Duration::from_secs(30), child.wait_with_output())
        .await
        .expect("tenant-dashboard did not exit")
        .unwrap()
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
