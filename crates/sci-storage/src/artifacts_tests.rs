// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sci_core::BuildId;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn add_uploads_and_returns_url() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path_regex(r"^/f/.*/out\.txt$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok", "url": "http://store/out.txt"})))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("out.txt"), b"hello").unwrap();

    let artifacts = Artifacts::new(server.uri(), BuildId::new(), dir.path().to_path_buf());
    let (artifact, url) = artifacts.add("out.txt", None).await.unwrap();
    assert_eq!(artifact.remote_filename, "out.txt");
    assert_eq!(url, "http://store/out.txt");
}

#[tokio::test]
async fn add_rejects_non_ok_status() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path_regex(r"^/f/.*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "full"})))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("out.txt"), b"hello").unwrap();

    let artifacts = Artifacts::new(server.uri(), BuildId::new(), dir.path().to_path_buf());
    let err = artifacts.add("out.txt", None).await.unwrap_err();
    assert!(matches!(err, ArtifactError::UploadRejected { .. }));
}

#[tokio::test]
async fn create_zip_without_upload_leaves_archive_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("out")).unwrap();
    fs::write(dir.path().join("out/a.txt"), b"a").unwrap();
    fs::write(dir.path().join("out/b.txt"), b"b").unwrap();

    let artifacts = Artifacts::new("http://unused", BuildId::new(), dir.path().to_path_buf());
    let (artifact, url) = artifacts.create_zip("bundle.zip", "out/*.txt", false).await.unwrap();
    assert_eq!(artifact.remote_filename, "bundle.zip");
    assert!(url.is_none());
    assert!(dir.path().join("bundle.zip").is_file());
}