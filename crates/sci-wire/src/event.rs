// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured log events streamed to the job server at `/slog/<session_id>`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One structured log record. Serializes as `{"type": "...", "params":
/// {...}}`, with `params` omitted entirely for variants that carry no
/// fields (mirrors `LogItem.serialize`'s `if self.params: d['params'] = ...`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params")]
pub enum Event {
    #[serde(rename = "job-begun")]
    JobBegun,

    #[serde(rename = "job-done")]
    JobDone,

    #[serde(rename = "job-error")]
    JobError { what: String },

    #[serde(rename = "step-begun")]
    StepBegun { name: String, args: Vec<Value>, kwargs: serde_json::Map<String, Value> },

    #[serde(rename = "step-done")]
    StepDone { name: String, time_ms: u64 },

    #[serde(rename = "step-join-begun")]
    StepJoinBegun { name: String, time_ms: u64 },

    #[serde(rename = "step-join-done")]
    StepJoinDone { name: String, time_ms: u64 },

    #[serde(rename = "async-joined")]
    AsyncJoined { session_no: String, time_ms: u64 },

    #[serde(rename = "set-description")]
    SetDescription { description: String },

    #[serde(rename = "set-build-id")]
    SetBuildId { build_id: String },

    #[serde(rename = "artifact-added")]
    ArtifactAdded {
        filename: String,
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

impl Event {
    /// Event name for log spans, matching the wire `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Event::JobBegun => "job-begun",
            Event::JobDone => "job-done",
            Event::JobError { .. } => "job-error",
            Event::StepBegun { .. } => "step-begun",
            Event::StepDone { .. } => "step-done",
            Event::StepJoinBegun { .. } => "step-join-begun",
            Event::StepJoinDone { .. } => "step-join-done",
            Event::AsyncJoined { .. } => "async-joined",
            Event::SetDescription { .. } => "set-description",
            Event::SetBuildId { .. } => "set-build-id",
            Event::ArtifactAdded { .. } => "artifact-added",
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
