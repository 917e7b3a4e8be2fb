// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recipe engine error taxonomy.

#[derive(thiserror::Error, Debug)]
pub enum RecipeError {
    #[error("failed to replace template variable {0}")]
    UnresolvedTemplate(String),

    #[error("external command returned result code {code}: {command}")]
    CommandFailed { code: i32, command: String },

    #[error("couldn't locate entry point {0:?}")]
    EntryPointMissing(Option<String>),

    #[error("recipe {0:?} is not registered")]
    UnknownRecipe(String),

    #[error(transparent)]
    Env(#[from] sci_core::EnvError),

    #[error(transparent)]
    Transport(#[from] sci_http::TransportError),

    #[error(transparent)]
    Artifact(#[from] sci_storage::ArtifactError),

    #[error("job failed: {0}")]
    JobError(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}
