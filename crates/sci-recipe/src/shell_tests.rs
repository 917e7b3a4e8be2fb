// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn successful_command_returns_ok() {
    let dir = tempfile::tempdir().unwrap();
    run(dir.path(), "true").await.unwrap();
}

#[tokio::test]
async fn failing_command_reports_its_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let err = run(dir.path(), "exit 7").await.unwrap_err();
    assert!(matches!(err, RecipeError::CommandFailed { code: 7, .. }));
}

#[tokio::test]
async fn runs_with_cwd_set_to_the_given_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("marker"), b"x").unwrap();
    run(dir.path(), "test -f marker").await.unwrap();
}