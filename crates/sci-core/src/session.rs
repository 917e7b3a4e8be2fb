// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session data model. Filesystem I/O lives in `sci-storage`; this module
//! only describes the shape that gets persisted as `config.json`.

use crate::ids::SessionId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Created,
    Running,
    Finished,
}

crate::simple_display! {
    SessionState {
        Created => "created",
        Running => "running",
        Finished => "finished",
    }
}

/// One execution of a recipe (or a single async step) on one agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub path: PathBuf,
    pub workspace: PathBuf,
    pub logfile: PathBuf,
    pub state: SessionState,
    pub created_ms: u64,
    pub ended_ms: Option<u64>,
    pub return_code: Option<i32>,
    pub return_value: Option<serde_json::Value>,
}

impl Session {
    /// Build the in-memory record for a brand new session rooted at `root`.
    /// Does not touch the filesystem; see `sci_storage::session_store`.
    pub fn new(root: &std::path::Path, id: SessionId, created_ms: u64) -> Self {
        let path = root.join("sessions").join(id.as_str());
        let workspace = path.join("workspace");
        let logfile = path.join("output.log");
        Self {
            id,
            path,
            workspace,
            logfile,
            state: SessionState::Created,
            created_ms,
            ended_ms: None,
            return_code: None,
            return_value: None,
        }
    }
}
