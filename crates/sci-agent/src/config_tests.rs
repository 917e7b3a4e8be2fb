// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn runner_path() -> PathBuf {
    PathBuf::from("sci-runner")
}

#[test]
fn first_run_generates_and_persists_a_node_id() {
    let dir = tempfile::tempdir().unwrap();
    let cfg =
        AgentConfig::load_or_init(dir.path().to_path_buf(), "nick".into(), 9000, "http://js".into(), runner_path())
            .unwrap();
    assert!(cfg.node_id.as_str().starts_with('A'));
    assert_eq!(cfg.node_id.as_str().len(), 41);

    let contents = std::fs::read_to_string(dir.path().join("config.ini")).unwrap();
    assert!(contents.contains(cfg.node_id.as_str()));
}

#[test]
fn second_run_reuses_the_persisted_node_id() {
    let dir = tempfile::tempdir().unwrap();
    let first =
        AgentConfig::load_or_init(dir.path().to_path_buf(), "nick".into(), 9000, "http://js".into(), runner_path())
            .unwrap();
    let second =
        AgentConfig::load_or_init(dir.path().to_path_buf(), "nick".into(), 9000, "http://js".into(), runner_path())
            .unwrap();
    assert_eq!(first.node_id, second.node_id);
}

#[test]
fn missing_section_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.ini"), "[other]\nkey = value\n").unwrap();
    let err =
        AgentConfig::load_or_init(dir.path().to_path_buf(), "nick".into(), 9000, "http://js".into(), runner_path())
            .unwrap_err();
    assert!(matches!(err, ConfigError::MissingSection));
}