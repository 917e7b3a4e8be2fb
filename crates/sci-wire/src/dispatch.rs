// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire DTOs for the job server's agent-facing API (`/agent/...`).

use sci_core::{BuildId, SessionId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Body of `POST /dispatch`: the job server notifying an agent that a
/// session is ready for it to run. Deliberately thin — the agent fetches
/// the rest via `GET /agent/session/<id>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDispatchRequest {
    pub session_id: SessionId,
}

/// Body of `POST /agent/dispatch` (job-server-facing): a recipe engine
/// asking the job server to create and schedule a new fan-out sub-session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchDescriptor {
    pub build_id: BuildId,
    pub job_server: String,
    #[serde(default)]
    pub labels: Vec<String>,
    /// Parent session id, when this is a fan-out sub-session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<SessionId>,
    pub run_info: RunInfo,
}

/// Identifies which entry point to run and with what arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInfo {
    /// Name of the step function to run, or absent to run `main`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_fun: Option<String>,
    pub step_name: String,
    #[serde(default)]
    pub args: Vec<Value>,
    #[serde(default)]
    pub kwargs: serde_json::Map<String, Value>,
    /// Serialized parent `Environment`, carried across the fan-out boundary
    /// so the child inherits non-read-only values and the build identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Value>,
}

/// Response of `POST /agent/dispatch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchResponse {
    pub session_id: SessionId,
}

/// Response of `GET /agent/session/<session_id>`: everything the
/// bootstrap needs to construct an Environment and locate a recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Name of the compiled-in recipe to run (see the recipe registry).
    pub recipe: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, Value>,
    pub build_uuid: BuildId,
    pub build_name: String,
    pub ss_url: String,
    pub run_info: RunInfo,
}

/// Response of `GET /agent/result/<session_id>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResult {
    pub result: String,
    #[serde(default)]
    pub output: Option<Value>,
}

/// Body of `POST /agent/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub id: String,
    pub nick: String,
    pub port: u16,
    pub labels: Vec<String>,
}

/// Body of `POST /agent/available/<node_id>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailableRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

/// Body of `POST /agent/busy/<node_id>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusyRequest {
    pub session_id: SessionId,
}

/// Response of storage `PUT /f/<build_uuid>/<path>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoragePutResponse {
    pub status: String,
    #[serde(default)]
    pub url: String,
}
