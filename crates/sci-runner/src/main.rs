// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-session bootstrap subprocess, spawned once per dispatched session by
//! `sci-daemon`'s executor task as `sci-runner <job_server> <session_id>`,
//! CWD set to the agent's storage root. Grounded on `sci.agent.web.run_job`.

mod bootstrap;
mod recipes;

use sci_core::{SessionId, SystemClock};
use sci_storage::SessionStore;
use std::io::Read;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let mut args = std::env::args().skip(1);
    let (Some(job_server), Some(session_id_arg)) = (args.next(), args.next()) else {
        eprintln!("usage: sci-runner <job_server> <session_id>");
        return ExitCode::FAILURE;
    };
    let session_id = SessionId::from(session_id_arg);

    let mut stdin_payload = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut stdin_payload) {
        eprintln!("failed to read session descriptor from stdin: {e}");
        return ExitCode::FAILURE;
    }

    let store = match std::env::current_dir() {
        Ok(dir) => SessionStore::new(dir),
        Err(e) => {
            eprintln!("failed to resolve current directory: {e}");
            return ExitCode::FAILURE;
        }
    };
    let registry = recipes::registry();

    let code = bootstrap::run(&job_server, session_id, &stdin_payload, &store, &registry, SystemClock).await;
    if code == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
