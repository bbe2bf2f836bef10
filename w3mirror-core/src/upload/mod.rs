//! Storage network upload.
//!
//! [`StorageClient`] is the seam between the mirror pipeline and whatever
//! talks to the storage network. [`W3CliClient`] drives the `w3` command line
//! client; tests substitute their own implementation.

mod w3cli;

pub use w3cli::{W3CliClient, parse_up_output};

use crate::cid::Cid;
use crate::error::UploadError;
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::info;

#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Human-readable name of this client
    fn name(&self) -> &str;

    /// Authenticate the local agent as the account owning `email`
    async fn login(&self, email: &str) -> Result<(), UploadError>;

    /// Make `space` the target of subsequent uploads
    async fn use_space(&self, space: &str) -> Result<(), UploadError>;

    /// Upload `files` wrapped in a single directory and return its CID
    async fn upload_directory(&self, files: &[PathBuf]) -> Result<Cid, UploadError>;
}

/// Authenticate, select `space`, and upload `files` as one directory.
///
/// Every path must exist and be a regular file before anything is sent.
/// Repeated paths are uploaded once, in order of first appearance.
pub async fn upload_files(
    client: &dyn StorageClient,
    files: &[PathBuf],
    email: &str,
    space: &str,
) -> Result<Cid, UploadError> {
    if files.is_empty() {
        return Err(UploadError::NoFiles);
    }

    let mut seen = HashSet::new();
    let files: Vec<PathBuf> = files
        .iter()
        .filter(|file| seen.insert(*file))
        .cloned()
        .collect();

    for file in &files {
        match tokio::fs::metadata(file).await {
            Ok(meta) if meta.is_file() => {}
            _ => return Err(UploadError::MissingFile(file.clone())),
        }
    }

    info!("Logging in to {} as {}", client.name(), email);
    client.login(email).await?;

    info!("Selecting space {}", space);
    client.use_space(space).await?;

    info!("Uploading {} files", files.len());
    let cid = client.upload_directory(&files).await?;
    info!("Upload complete: {}", cid);

    Ok(cid)
}
