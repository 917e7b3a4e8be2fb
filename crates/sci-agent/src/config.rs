// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent identity and configuration, grounded on `sci.agent.config`:
//! `node_id` is generated once and persisted to `config.ini` under the
//! agent's storage root, then reused across restarts.
//!
//! The corpus reaches for `toml`/`serde` for structured config everywhere
//! else, but the persisted format here is mandated as a single-section
//! `.ini` file (`[sci]` / `node_id = ...`) for compatibility with the
//! original deployment tooling, so this hand-rolls the handful of lines a
//! real ini crate would otherwise parse.

use sci_core::NodeId;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config.ini is missing the [sci] section")]
    MissingSection,
    #[error("config.ini's [sci] section is missing node_id")]
    MissingNodeId,
}

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub node_id: NodeId,
    pub nickname: String,
    pub port: u16,
    pub root: PathBuf,
    pub job_server: String,
    /// Path to the `sci-runner` binary, spawned once per session.
    pub runner_path: PathBuf,
}

impl AgentConfig {
    /// Load `node_id` from `root/config.ini`, generating and persisting one
    /// if the file doesn't exist yet.
    pub fn load_or_init(
        root: PathBuf,
        nickname: String,
        port: u16,
        job_server: String,
        runner_path: PathBuf,
    ) -> Result<Self, ConfigError> {
        std::fs::create_dir_all(&root)?;
        let path = config_path(&root);
        let node_id = match std::fs::read_to_string(&path) {
            Ok(contents) => parse_node_id(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let node_id = NodeId::generate();
                std::fs::write(&path, render_ini(&node_id))?;
                node_id
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { node_id, nickname, port, root, job_server, runner_path })
    }
}

fn config_path(root: &Path) -> PathBuf {
    root.join("config.ini")
}

fn render_ini(node_id: &NodeId) -> String {
    format!("[sci]\nnode_id = {}\n", node_id.as_str())
}

fn parse_node_id(contents: &str) -> Result<NodeId, ConfigError> {
    let mut in_section = false;
    for line in contents.lines() {
        let line = line.trim();
        if line.starts_with('[') {
            in_section = line.trim_start_matches('[').trim_end_matches(']') == "sci";
            continue;
        }
        if !in_section {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            if key.trim() == "node_id" {
                return Ok(NodeId(value.trim().to_string()));
            }
        }
    }
    if contents.contains("[sci]") {
        Err(ConfigError::MissingNodeId)
    } else {
        Err(ConfigError::MissingSection)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
