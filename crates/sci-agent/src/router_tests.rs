// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::config::AgentConfig;
use sci_core::{FakeClock, SessionId};
use sci_http::HttpClient;
use sci_wire::AgentDispatchRequest;

async fn spawn(agent: Arc<Agent<FakeClock>>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(agent);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn config(dir: &std::path::Path) -> AgentConfig {
    AgentConfig::load_or_init(
        dir.to_path_buf(),
        "nick".into(),
        0,
        "http://js".into(),
        std::path::PathBuf::from("sci-runner"),
    )
    .unwrap()
}

#[tokio::test]
async fn dispatch_returns_started_when_idle() {
    let dir = tempfile::tempdir().unwrap();
    let agent = Arc::new(Agent::new(config(dir.path()), HttpClient::new("http://js"), FakeClock::new()));
    let base = spawn(agent).await;

    let body = AgentDispatchRequest { session_id: SessionId::new() };
    let resp = reqwest::Client::new().post(format!("{base}/dispatch")).json(&body).send().await.unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn second_dispatch_while_busy_returns_412() {
    let dir = tempfile::tempdir().unwrap();
    let agent = Arc::new(Agent::new(config(dir.path()), HttpClient::new("http://js"), FakeClock::new()));
    let base = spawn(agent).await;

    let client = reqwest::Client::new();
    let body = AgentDispatchRequest { session_id: SessionId::new() };
    let first = client.post(format!("{base}/dispatch")).json(&body).send().await.unwrap();
    assert_eq!(first.status(), 200);
    let body2 = AgentDispatchRequest { session_id: SessionId::new() };
    let second = client.post(format!("{base}/dispatch")).json(&body2).send().await.unwrap();
    assert_eq!(second.status(), 412);
}