// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact upload/download and zip packaging, grounded on
//! `sci.artifacts.Artifacts`/`ArtifactsBase`.

use sci_core::BuildId;
use sci_http::HttpClient;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

#[derive(thiserror::Error, Debug)]
pub enum ArtifactError {
    #[error("failed to store {local} on storage server: {status}")]
    UploadRejected { local: String, status: String },
    #[error("transport error: {0}")]
    Transport(#[from] sci_http::TransportError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

/// A stored artifact, identified by its path relative to the build.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub remote_filename: String,
}

/// Uploads/downloads files for one build, scoped to a session's workspace.
pub struct Artifacts {
    client: HttpClient,
    build_uuid: BuildId,
    workspace: PathBuf,
}

impl Artifacts {
    pub fn new(storage_server: impl Into<String>, build_uuid: BuildId, workspace: PathBuf) -> Self {
        Self { client: HttpClient::new(storage_server), build_uuid, workspace }
    }

    /// Upload `local` (workspace-relative) to the storage service, returning
    /// the remote name actually used and the URL the server assigned.
    pub async fn add(
        &self,
        local: impl AsRef<Path>,
        remote: Option<&str>,
    ) -> Result<(Artifact, String), ArtifactError> {
        let local_path = self.workspace.join(local.as_ref());
        let remote_filename = match remote {
            Some(r) => r.to_string(),
            None => local
                .as_ref()
                .to_string_lossy()
                .to_string(),
        };
        let bytes = fs::read(&local_path)?;
        let url_path = format!("/f/{}/{}", self.build_uuid, remote_filename);
        let resp = self.client.put_bytes(&url_path, bytes).await?;
        let status = resp.get("status").and_then(|v| v.as_str()).unwrap_or("");
        if status != "ok" {
            return Err(ArtifactError::UploadRejected {
                local: local_path.display().to_string(),
                status: status.to_string(),
            });
        }
        let url = resp.get("url").and_then(|v| v.as_str()).unwrap_or("").to_string();
        Ok((Artifact { remote_filename }, url))
    }

    /// Download `remote` into the workspace (or `local` if given), creating
    /// intermediate directories as needed.
    pub async fn get(&self, remote: &str, local: Option<&Path>) -> Result<PathBuf, ArtifactError> {
        let dest = match local {
            Some(p) => p.to_path_buf(),
            None => self.workspace.join(remote),
        };
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        let url_path = format!("/f/{}/{}", self.build_uuid, remote);
        let bytes = self.client.get_bytes(&url_path).await?;
        fs::write(&dest, bytes)?;
        Ok(dest)
    }

    /// Collect files matching `glob_pattern` (workspace-relative) into a
    /// deflate-compressed archive at `zip_name`, then optionally upload it.
    pub async fn create_zip(
        &self,
        zip_name: &str,
        glob_pattern: &str,
        upload: bool,
    ) -> Result<(Artifact, Option<String>), ArtifactError> {
        let zip_path = self.workspace.join(zip_name);
        let pattern = self.workspace.join(glob_pattern);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let file = fs::File::create(&zip_path)?;
        let mut writer = ZipWriter::new(file);
        for entry in glob::glob(&pattern.to_string_lossy())? {
            let path = entry.map_err(|e| std::io::Error::other(e.to_string()))?;
            if !path.is_file() {
                continue;
            }
            let archive_name = path.strip_prefix(&self.workspace).unwrap_or(&path).to_string_lossy().to_string();
            writer.start_file(archive_name, options)?;
            let contents = fs::read(&path)?;
            writer.write_all(&contents)?;
        }
        writer.finish()?;

        if upload {
            let (artifact, url) = self.add(zip_name, None).await?;
            Ok((artifact, Some(url)))
        } else {
            Ok((Artifact { remote_filename: zip_name.to_string() }, None))
        }
    }
}

#[cfg(test)]
#[path = "artifacts_tests.rs"]
mod tests;
