// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Executor task: supervises one `sci-runner` subprocess per dispatched
//! session, grounded on `sci.agent.web`'s executor thread.

use crate::agent::Agent;
use sci_core::Clock;
use sci_storage::{Artifacts, SessionStore};
use sci_wire::{AvailableRequest, BusyRequest, SessionInfo};
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{error, info, warn};

#[derive(thiserror::Error, Debug)]
pub enum ExecutorError {
    #[error(transparent)]
    Transport(#[from] sci_http::TransportError),
    #[error(transparent)]
    Session(#[from] sci_storage::SessionError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run the executor loop forever: wait for a dispatch, run it, report back.
pub async fn run<C: Clock + 'static>(agent: Arc<Agent<C>>, store: SessionStore) {
    if let Err(e) = send_available(&agent, None, None, None, None).await {
        warn!(error = %e, "initial send_available failed");
    }

    loop {
        let session_id = agent.wait_for_dispatch().await;
        if let Err(e) = run_session(&agent, &store, session_id).await {
            error!(error = %e, session_id = %session_id, "session execution failed");
        }
        agent.clear_busy();
    }
}

async fn run_session<C: Clock>(
    agent: &Agent<C>,
    store: &SessionStore,
    session_id: sci_core::SessionId,
) -> Result<(), ExecutorError> {
    let info_body = agent.job_server.call_json::<()>(&format!("/agent/session/{session_id}"), None).await?;
    let info: SessionInfo = serde_json::from_value(info_body)?;

    let session = store.create(session_id, &agent.clock)?;

    let logfile = std::fs::File::create(&session.logfile)?;
    let stderr_file = logfile.try_clone()?;

    let mut child = Command::new(&agent.config.runner_path)
        .arg(&agent.config.job_server)
        .arg(session_id.to_string())
        .current_dir(&agent.config.root)
        .stdin(Stdio::piped())
        .stdout(Stdio::from(logfile))
        .stderr(Stdio::from(stderr_file))
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        let payload = serde_json::to_vec(&info)?;
        stdin.write_all(&payload).await?;
        stdin.shutdown().await?;
    }

    send_busy(agent, session_id).await?;
    let status = child.wait().await?;

    let mut session = store.load(&session_id)?;
    let (result, return_code) = match status.code() {
        Some(0) => ("success", 0),
        Some(code) => ("error", code),
        None => ("error", -1),
    };
    store.mark_finished(&mut session, return_code, session.return_value.clone(), &agent.clock)?;

    let log_url = upload_logfile(&info, &session).await;

    send_available(agent, Some(session_id), Some(result), session.return_value.clone(), log_url).await?;
    info!(session_id = %session_id, result, "session finished");
    Ok(())
}

async fn upload_logfile(info: &SessionInfo, session: &sci_core::Session) -> Option<String> {
    let artifacts = Artifacts::new(info.ss_url.clone(), info.build_uuid, session.workspace.clone());
    let remote = format!("{}.log", session.id);
    // `session.logfile` is absolute (it lives next to, not inside, the
    // workspace dir); joining an absolute path onto `Artifacts`'s workspace
    // root replaces it entirely, per `PathBuf::join`, so this still reads
    // the right file.
    match artifacts.add(&session.logfile, Some(&remote)).await {
        Ok((_artifact, url)) => Some(url),
        Err(e) => {
            warn!(error = %e, "logfile upload failed");
            None
        }
    }
}

async fn send_available<C: Clock>(
    agent: &Agent<C>,
    session_id: Option<sci_core::SessionId>,
    result: Option<&str>,
    output: Option<serde_json::Value>,
    log_file: Option<String>,
) -> Result<(), sci_http::TransportError> {
    let req = AvailableRequest { session_id, result: result.map(str::to_string), output, log_file };
    agent.job_server.call_json(&format!("/agent/available/{}", agent.config.node_id), Some(&req)).await?;
    agent.mark_status_sent();
    Ok(())
}

async fn send_busy<C: Clock>(agent: &Agent<C>, session_id: sci_core::SessionId) -> Result<(), sci_http::TransportError> {
    let req = BusyRequest { session_id };
    agent.job_server.call_json(&format!("/agent/busy/{}", agent.config.node_id), Some(&req)).await?;
    agent.mark_status_sent();
    Ok(())
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
