// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-session bootstrap, grounded on the original's `run_job` entry point
//! (§4.H): load the Session, resolve the recipe, build the Environment,
//! invoke the Recipe Engine, and persist the final result.

use sci_core::{Clock, Environment, JOB_KEY_ENV_VAR, RESERVED_ENV_NAMES, SessionId};
use sci_http::HttpClient;
use sci_recipe::{Engine, RecipeError, RecipeRegistry};
use sci_storage::{Artifacts, SessionStore};
use sci_wire::SessionInfo;
use serde_json::Value;

#[derive(thiserror::Error, Debug)]
pub enum BootstrapError {
    #[error("malformed session descriptor: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Session(#[from] sci_storage::SessionError),
    #[error(transparent)]
    Recipe(#[from] RecipeError),
    #[error(transparent)]
    Env(#[from] sci_core::EnvError),
}

/// Run one session to completion and persist the outcome: `return_value`
/// and `return_code = 0` on success, `state = finished` either way, and a
/// non-zero `return_code` on any uncaught failure so the agent's executor
/// classifies the run as an error (§4.H step 7).
///
/// Returns the process exit code.
pub async fn run<C: Clock>(
    job_server: &str,
    session_id: SessionId,
    stdin_payload: &str,
    store: &SessionStore,
    registry: &RecipeRegistry,
    clock: C,
) -> i32 {
    match execute(job_server, session_id, stdin_payload, store, registry, clock.clone()).await {
        Ok(value) => {
            if let Err(e) = persist(store, &session_id, 0, Some(value), &clock) {
                tracing::error!(error = %e, "failed to persist successful session result");
                return 1;
            }
            0
        }
        Err(e) => {
            tracing::error!(error = %e, "session execution failed");
            if let Err(e) = persist(store, &session_id, 1, None, &clock) {
                tracing::error!(error = %e, "failed to persist failed session result");
            }
            1
        }
    }
}

fn persist<C: Clock>(
    store: &SessionStore,
    session_id: &SessionId,
    return_code: i32,
    return_value: Option<Value>,
    clock: &C,
) -> Result<(), BootstrapError> {
    let mut session = store.load(session_id)?;
    store.mark_finished(&mut session, return_code, return_value, clock)?;
    Ok(())
}

/// Load the session, resolve the recipe, build the Environment, and run
/// the Recipe Engine to completion, returning its result value.
async fn execute<C: Clock>(
    job_server: &str,
    session_id: SessionId,
    stdin_payload: &str,
    store: &SessionStore,
    registry: &RecipeRegistry,
    clock: C,
) -> Result<Value, BootstrapError> {
    let info: SessionInfo = serde_json::from_str(stdin_payload)?;

    let mut session = store.load(&session_id)?;
    store.mark_running(&mut session)?;

    let compiled = registry.compile(&info.recipe)?;
    let entry_point = info.run_info.step_fun.clone();
    let env = build_environment(&info, &clock)?;

    let http = HttpClient::new(job_server.to_string());
    let artifacts = Artifacts::new(info.ss_url.clone(), info.build_uuid, session.workspace.clone());

    let mut engine =
        Engine::new(env, session, artifacts, info.build_uuid, job_server.to_string(), http, compiled, entry_point, clock);
    let result = engine.start(info.run_info.args.clone(), info.run_info.kwargs.clone()).await?;
    Ok(result)
}

/// Build a fresh Environment from `info.parameters` plus the reserved
/// identifiers, or deserialize one carried over from a parent session
/// (`run_info.env`, set by `Engine::dispatch_async`).
fn build_environment(info: &SessionInfo, clock: &impl Clock) -> Result<Environment, BootstrapError> {
    if let Some(env_value) = &info.run_info.env {
        return Ok(Environment::deserialize(env_value)?);
    }

    let mut env = Environment::new();
    env.define(
        RESERVED_ENV_NAMES[0],
        "opaque build identifier shared by every session in this build's fan-out tree",
        true,
        "bootstrap",
        Some(Value::String(info.build_uuid.to_string())),
        true,
    )?;
    env.define(
        RESERVED_ENV_NAMES[1],
        "user-settable build label",
        false,
        "bootstrap",
        Some(Value::String(info.build_name.clone())),
        true,
    )?;
    env.define(
        RESERVED_ENV_NAMES[2],
        "build name",
        true,
        "bootstrap",
        Some(Value::String(info.build_name.clone())),
        true,
    )?;
    env.define(RESERVED_ENV_NAMES[3], "agent hostname", true, "bootstrap", Some(Value::String(hostname())), true)?;
    env.define(
        RESERVED_ENV_NAMES[4],
        "bootstrap timestamp",
        true,
        "bootstrap",
        Some(Value::String(format_datetime(clock.epoch_ms()))),
        true,
    )?;

    if let Ok(job_key) = std::env::var(JOB_KEY_ENV_VAR) {
        env.define(JOB_KEY_ENV_VAR, "inherited from the agent process", true, "process-env", Some(Value::String(job_key)), true)?;
    }

    for (name, value) in &info.parameters {
        env.define(name.clone(), "job parameter", false, "job-server", Some(value.clone()), true)?;
    }

    Ok(env)
}

/// Hostname with any trailing `.local` stripped (§6 reserved names).
fn hostname() -> String {
    let raw = gethostname::gethostname().to_string_lossy().into_owned();
    raw.strip_suffix(".local").map(str::to_string).unwrap_or(raw)
}

fn format_datetime(epoch_ms: u64) -> String {
    chrono::DateTime::from_timestamp_millis(epoch_ms as i64)
        .map(|dt| dt.format("%Y-%m-%d_%H-%M-%S").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "bootstrap_tests.rs"]
mod tests;
