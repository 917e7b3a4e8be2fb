// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::config::AgentConfig;
use sci_core::{FakeClock, SessionId};
use sci_http::HttpClient;

fn agent(dir: &std::path::Path) -> Agent<FakeClock> {
    let config = AgentConfig::load_or_init(
        dir.to_path_buf(),
        "nick".into(),
        9000,
        "http://js".into(),
        std::path::PathBuf::from("sci-runner"),
    )
    .unwrap();
    Agent::new(config, HttpClient::new("http://js"), FakeClock::new())
}

#[tokio::test]
async fn second_dispatch_while_busy_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let a = agent(dir.path());
    a.try_dispatch(SessionId::new()).await.unwrap();
    assert!(a.try_dispatch(SessionId::new()).await.is_err());
}

#[tokio::test]
async fn clearing_busy_allows_a_new_dispatch() {
    let dir = tempfile::tempdir().unwrap();
    let a = agent(dir.path());
    a.try_dispatch(SessionId::new()).await.unwrap();
    a.wait_for_dispatch().await;
    a.clear_busy();
    assert!(a.try_dispatch(SessionId::new()).await.is_ok());
}

#[tokio::test]
async fn status_age_tracks_the_fake_clock() {
    let dir = tempfile::tempdir().unwrap();
    let a = agent(dir.path());
    a.mark_status_sent();
    assert_eq!(a.seconds_since_status(), 0);
    a.clock.advance(std::time::Duration::from_secs(61));
    assert_eq!(a.seconds_since_status(), 61);
}