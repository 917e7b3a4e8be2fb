// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fan-out job handles, grounded on `sci.build.AsyncJob`.

use sci_core::SessionId;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsyncJobState {
    Prepared,
    Running,
    Done,
}

/// One dispatched sub-session, owned by the step that spawned it. Lives in
/// `Engine::async_jobs` and is joined either explicitly (`AsyncHandle::await`
/// called by the step body) or implicitly when the owning step completes.
pub struct AsyncJob {
    pub state: AsyncJobState,
    pub session_id: Option<SessionId>,
    pub ts_start_ms: u64,
    pub output: Option<Value>,
}

impl AsyncJob {
    pub fn prepared(ts_start_ms: u64) -> Self {
        Self { state: AsyncJobState::Prepared, session_id: None, ts_start_ms, output: None }
    }
}

/// Opaque handle to an in-flight fan-out job, indexing into
/// `Engine::async_jobs`. Returned to a step body so it may `await` the
/// child explicitly instead of waiting for the implicit post-step join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsyncHandle(pub usize);
