// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The agent's HTTP surface: a single `axum` route backed by `Agent`'s
//! single-slot queue. Shared state reaches handlers through axum's `State`
//! extractor rather than the teacher's hand-threaded `Arc<Mutex<..>>`.

use crate::agent::Agent;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use sci_core::Clock;
use sci_wire::AgentDispatchRequest;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

pub fn router<C: Clock + 'static>(agent: Arc<Agent<C>>) -> Router {
    Router::new().route("/dispatch", post(dispatch::<C>)).with_state(agent)
}

async fn dispatch<C: Clock + 'static>(
    State(agent): State<Arc<Agent<C>>>,
    Json(body): Json<AgentDispatchRequest>,
) -> Response {
    match agent.try_dispatch(body.session_id).await {
        Ok(()) => {
            info!("dispatch accepted");
            (StatusCode::OK, Json(json!({"status": "started"}))).into_response()
        }
        Err(_) => (StatusCode::PRECONDITION_FAILED, Json(json!({"error": "Busy"}))).into_response(),
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
