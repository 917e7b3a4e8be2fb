// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sci_core::SystemClock;

#[test]
fn create_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    let clock = SystemClock;
    let id = SessionId::new();

    let created = store.create(id, &clock).unwrap();
    assert!(created.workspace.is_dir());
    assert_eq!(created.state, SessionState::Created);

    let loaded = store.load(&id).unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.workspace, created.workspace);
}

#[test]
fn load_missing_session_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    let err = store.load(&SessionId::new());
    assert!(matches!(err, Err(SessionError::NotFound(_))));
}

#[test]
fn mark_finished_sets_outcome_fields() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    let clock = SystemClock;
    let mut session = store.create(SessionId::new(), &clock).unwrap();

    store.mark_finished(&mut session, 1, None, &clock).unwrap();
    assert_eq!(session.state, SessionState::Finished);
    assert_eq!(session.return_code, Some(1));

    let reloaded = store.load(&session.id).unwrap();
    assert_eq!(reloaded.return_code, Some(1));
}