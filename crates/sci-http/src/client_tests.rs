// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn get_without_body_uses_get() {
    let server = MockServer::start().await;
    Mock::given(method("GET")).and(path("/ping")).respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true}))).mount(&server).await;

    let client = HttpClient::new(server.uri());
    let body: Option<&()> = None;
    let res = client.call_json("/ping", body).await.unwrap();
    assert_eq!(res, serde_json::json!({"ok": true}));
}

#[tokio::test]
async fn post_with_body_carries_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST")).and(path("/agent/register")).respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"}))).mount(&server).await;

    let client = HttpClient::new(server.uri());
    let res = client.call_json("/agent/register", Some(&serde_json::json!({"id": "A1"}))).await.unwrap();
    assert_eq!(res, serde_json::json!({"status": "ok"}));
}

#[tokio::test]
async fn non_2xx_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET")).and(path("/missing")).respond_with(ResponseTemplate::new(404)).mount(&server).await;

    let client = HttpClient::new(server.uri());
    let body: Option<&()> = None;
    let err = client.call_json("/missing", body).await.unwrap_err();
    assert!(matches!(err, TransportError::Status(StatusCode::NOT_FOUND)));
}