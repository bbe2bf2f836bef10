use std::path::PathBuf;
use thiserror::Error;
use w3mirror_scanner::ScanError;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("no files to upload")]
    NoFiles,

    #[error("file not found or not a regular file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("login as {email} failed: {reason}")]
    Auth { email: String, reason: String },

    #[error("could not select space {space}: {reason}")]
    Space { space: String, reason: String },

    #[error("upload failed: {0}")]
    Transport(String),

    #[error("unexpected storage client output: {0}")]
    Output(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("failed to fetch {url}: {source}")]
    Fetch { url: String, source: ScanError },

    #[error("failed to parse page: {0}")]
    Parse(ScanError),

    #[error("staging directory error: {0}")]
    Staging(ScanError),

    /// Guard for an empty staging list before upload. `scrape_page` always
    /// stages `index.html`, so a full scrape never produces it.
    #[error("nothing to upload")]
    NothingToUpload,

    #[error(transparent)]
    Upload(#[from] UploadError),
}
