// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON/raw HTTP client, grounded on `sci.http_client.HttpClient`/`HttpRequest`:
//! POST when a body is given, GET otherwise; any status outside 200-299 is
//! an error; the response is always fully consumed before returning.

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;

#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("http status {0}")]
    Status(StatusCode),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// A client bound to one base URL (the job server, or the storage service).
/// Holds a shared `reqwest::Client` so connections are pooled across calls
/// instead of reopened per request.
#[derive(Clone)]
pub struct HttpClient {
    base_url: String,
    inner: reqwest::Client,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), inner: reqwest::Client::new() }
    }

    pub fn with_client(base_url: impl Into<String>, inner: reqwest::Client) -> Self {
        Self { base_url: base_url.into(), inner }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// POST `body` (or GET if `body` is `None`) and parse the response as JSON.
    pub async fn call_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, TransportError> {
        let method = if body.is_some() { Method::POST } else { Method::GET };
        let mut req = self.inner.request(method, self.url(path));
        if let Some(b) = body {
            req = req.json(b);
        }
        let resp = req.send().await?;
        check_status(&resp)?;
        Ok(resp.json::<Value>().await?)
    }

    /// Issue a GET with no body, ignoring the response body.
    pub async fn call_empty(&self, path: &str, method: Method) -> Result<(), TransportError> {
        let resp = self.inner.request(method, self.url(path)).send().await?;
        check_status(&resp)
    }

    /// PUT raw bytes and parse the response as JSON (artifact / logfile upload).
    pub async fn put_bytes(&self, path: &str, body: Vec<u8>) -> Result<Value, TransportError> {
        let resp = self.inner.put(self.url(path)).body(body).send().await?;
        check_status(&resp)?;
        Ok(resp.json::<Value>().await?)
    }

    /// GET raw bytes (artifact / log download).
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, TransportError> {
        let resp = self.inner.get(self.url(path)).send().await?;
        check_status(&resp)?;
        Ok(resp.bytes().await?.to_vec())
    }

    /// POST a raw JSON-encoded string body (structured log events, which
    /// are already-serialized `Event` values).
    pub async fn post_raw_json(&self, path: &str, body: String) -> Result<(), TransportError> {
        let resp = self
            .inner
            .post(self.url(path))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;
        check_status(&resp)
    }
}

fn check_status(resp: &reqwest::Response) -> Result<(), TransportError> {
    let status = resp.status();
    if !(200..300).contains(&status.as_u16()) {
        return Err(TransportError::Status(status));
    }
    Ok(())
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
