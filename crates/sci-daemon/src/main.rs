// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent daemon binary: registers with a job server, then serves
//! `POST /dispatch` and supervises one `sci-runner` subprocess at a time.
//! Grounded on `sci.agent.web.main` and, for the `clap`-derived CLI shape,
//! the teacher's own `oj` binary.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use sci_agent::{router, Agent, AgentConfig};
use sci_core::SystemClock;
use sci_http::HttpClient;
use sci_storage::SessionStore;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sci-daemon", about = "Distributed CI executor agent")]
struct Cli {
    /// Base URL of the job server this agent registers with.
    job_server: Option<String>,

    #[arg(long, default_value_t = 8090)]
    port: u16,

    #[arg(long, default_value = "./agent-root")]
    path: PathBuf,

    #[arg(long, default_value = "agent")]
    nick: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Stop a running agent started from the same `--path`.
    Stop,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Stop) => stop(&cli.path),
        None => run(cli).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(job_server) = cli.job_server else {
        bail!("job_server URL is required unless running `stop`");
    };

    let runner_path = sibling_binary("sci-runner");
    let config = AgentConfig::load_or_init(cli.path.clone(), cli.nick, cli.port, job_server.clone(), runner_path)
        .context("failed to load agent config")?;

    if let Err(e) = write_pidfile(&config.root) {
        tracing::warn!(error = %e, "failed to write pidfile");
    }

    let agent = Arc::new(Agent::new(config, HttpClient::new(job_server), SystemClock));
    let store = SessionStore::new(agent.config.root.clone());

    tokio::spawn(sci_agent::status::run(agent.clone()));
    tokio::spawn(sci_agent::executor::run(agent.clone(), store));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", agent.config.port))
        .await
        .with_context(|| format!("failed to bind port {}", agent.config.port))?;

    tracing::info!(port = agent.config.port, node_id = %agent.config.node_id, "agent listening");
    axum::serve(listener, router(agent)).with_graceful_shutdown(shutdown_signal()).await.context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn sibling_binary(name: &str) -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|dir| dir.join(name)))
        .unwrap_or_else(|| PathBuf::from(name))
}

fn pidfile_path(root: &std::path::Path) -> PathBuf {
    root.join("agent.pid")
}

fn write_pidfile(root: &std::path::Path) -> std::io::Result<()> {
    std::fs::create_dir_all(root)?;
    std::fs::write(pidfile_path(root), std::process::id().to_string())
}

fn stop(path: &std::path::Path) -> anyhow::Result<()> {
    let pid = std::fs::read_to_string(pidfile_path(path))
        .with_context(|| format!("no running agent found at {}", path.display()))?
        .trim()
        .to_string();
    let status = std::process::Command::new("kill")
        .arg(&pid)
        .status()
        .with_context(|| format!("failed to signal pid {pid}"))?;
    if !status.success() {
        bail!("kill exited with {status}");
    }
    Ok(())
}
