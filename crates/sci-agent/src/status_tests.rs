// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::config::AgentConfig;
use sci_core::FakeClock;
use sci_http::HttpClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn agent(server: &MockServer) -> Agent<FakeClock> {
    let dir = tempfile::tempdir().unwrap();
    let config = AgentConfig::load_or_init(
        dir.path().to_path_buf(),
        "nick".into(),
        9000,
        server.uri(),
        std::path::PathBuf::from("sci-runner"),
    )
    .unwrap();
    Agent::new(config, HttpClient::new(server.uri()), FakeClock::new())
}

#[tokio::test]
async fn register_marks_the_agent_registered() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/agent/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status":"ok"})))
        .mount(&server)
        .await;

    let agent = agent(&server).await;
    register(&agent).await.unwrap();
    assert!(agent.is_registered());
    assert_eq!(agent.seconds_since_status(), 0);
}

#[tokio::test]
async fn failed_ping_clears_registration() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/agent/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status":"ok"})))
        .mount(&server)
        .await;

    let agent = agent(&server).await;
    register(&agent).await.unwrap();
    agent.clock.advance(std::time::Duration::from_secs(61));

    assert!(ping(&agent).await.is_err());
}