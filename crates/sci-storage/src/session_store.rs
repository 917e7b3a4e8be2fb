// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk session persistence, grounded on `sci.session.Session`.

use sci_core::{Clock, Session, SessionId, SessionState};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("session {0} not found")]
    NotFound(SessionId),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed config.json: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Root directory under which `sessions/<id>/` trees live. Process-wide
/// configuration, set once at agent startup (`Session.set_root_path`).
#[derive(Clone)]
pub struct SessionStore {
    root: PathBuf,
}

impl SessionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn session_dir(&self, id: &SessionId) -> PathBuf {
        self.root.join("sessions").join(id.as_str())
    }

    /// Create the workspace directory and write the initial `config.json`.
    pub fn create(&self, id: SessionId, clock: &impl Clock) -> Result<Session, SessionError> {
        let session = Session::new(&self.root, id, clock.epoch_ms());
        fs::create_dir_all(&session.workspace)?;
        self.save(&session)?;
        Ok(session)
    }

    pub fn load(&self, id: &SessionId) -> Result<Session, SessionError> {
        let config_path = self.session_dir(id).join("config.json");
        let data = match fs::read_to_string(&config_path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(SessionError::NotFound(*id)),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&data)?)
    }

    /// Persist `session` atomically: write to a sibling temp file, then
    /// rename over `config.json` so a crash never leaves a half-written file.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        let config_path = session.path.join("config.json");
        let tmp_path = session.path.join("config.json.tmp");
        fs::write(&tmp_path, serde_json::to_vec(session)?)?;
        fs::rename(&tmp_path, &config_path)?;
        Ok(())
    }

    pub fn mark_running(&self, session: &mut Session) -> Result<(), SessionError> {
        session.state = SessionState::Running;
        self.save(session)
    }

    pub fn mark_finished(
        &self,
        session: &mut Session,
        return_code: i32,
        return_value: Option<serde_json::Value>,
        clock: &impl Clock,
    ) -> Result<(), SessionError> {
        session.state = SessionState::Finished;
        session.return_code = Some(return_code);
        session.return_value = return_value;
        session.ended_ms = Some(clock.epoch_ms());
        self.save(session)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
#[path = "session_store_tests.rs"]
mod tests;
