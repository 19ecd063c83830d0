use std::io::Write;
use std::net::TcpListener;
use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use tempfile::NamedTempFile;
use tokio::time::sleep;

/// Find an available port
fn get_available_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

/// Create a minimal valid config
fn minimal_config(port: u16) -> String {
    format!(
        r#"
[server]
host = "127.0.0.1"
port = {}
"#,
        port
    )
}

/// Spawn the server and return a handle
async fn spawn_server(config_path: &std::path::Path) -> tokio::process::Child {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_ticketdesk"))
        .env("TICKETDESK_CONFIG", config_path)
        .env("RUST_LOG", "error") // Quiet logs during tests
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn server")
}

/// Wait for server to be ready
async fn wait_for_server(port: u16, max_attempts: u32) -> bool {
    let client = Client::new();
    for _ in 0..max_attempts {
        if client
            .get(format!("http://127.0.0.1:{}/health", port))
            .send()
            .await
            .is_ok()
        {
            return true;
        }
        sleep(Duration::from_millis(50)).await;
    }
    false
}

/// Start a server on a free port; the config file must outlive the server.
async fn start_test_server() -> (u16, tokio::process::Child, NamedTempFile) {
    let port = get_available_port();

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(minimal_config(port).as_bytes())
        .unwrap();
    temp_file.flush().unwrap();

    let server = spawn_server(temp_file.path()).await;

    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );

    (port, server, temp_file)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (port, mut server, _config) = start_test_server().await;

    let response = Client::new()
        .get(format!("http://127.0.0.1:{}/health", port))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let json: Value = response.json().await.unwrap();
    assert_eq!(json["status"], "ok");

    server.kill().await.ok();
}

#[tokio::test]
async fn test_ticket_round_trip_over_tcp() {
    let (port, mut server, _config) = start_test_server().await;
    let client = Client::new();
    let base = format!("http://127.0.0.1:{}", port);

    let created: Value = client
        .post(format!("{}/tickets/", base))
        .json(&json!({
            "title": "Printer jam",
            "description": "Printer on 3rd floor is jammed",
            "priority": "low"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created["id"], 1);

    let updated = client
        .put(format!("{}/tickets/1?status=closed", base))
        .send()
        .await
        .unwrap();
    assert_eq!(updated.status(), 200);
    let updated: Value = updated.json().await.unwrap();
    assert_eq!(updated["status"], "closed");

    let deleted = client
        .delete(format!("{}/tickets/1", base))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), 200);

    let missing = client
        .get(format!("{}/tickets/1", base))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 404);

    server.kill().await.ok();
}

#[tokio::test]
async fn test_invalid_config_fails_startup() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[server]\nport = 0\n")
        .unwrap();
    temp_file.flush().unwrap();

    let mut server = spawn_server(temp_file.path()).await;
    let status = tokio::time::timeout(Duration::from_secs(10), server.wait())
        .await
    .expect("Server did not exit")
    .expect("Failed to wait for server");

    assert!(!status.success());
}
