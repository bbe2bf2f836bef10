use crate::error::{Result, ScanError};
use crate::fetcher::Fetcher;
use crate::page::Page;
use crate::result::{AssetFailure, AssetRef, DownloadReport};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, warn};
use url::Url;

/// Called with `(position, url)` before each asset download starts
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

pub const DEFAULT_LINK_PREFIX: &str = "assets";

/// Downloads a page's assets into a flat staging directory and points the
/// page at the local copies.
pub struct Downloader {
    fetcher: Fetcher,
    staging_dir: PathBuf,
    link_prefix: String,
    progress_callback: Option<ProgressCallback>,
}

impl Downloader {
    pub fn new(fetcher: Fetcher, staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            staging_dir: staging_dir.into(),
            link_prefix: DEFAULT_LINK_PREFIX.to_string(),
            progress_callback: None,
        }
    }

    /// Directory prefix written into rewritten `href`/`src` attributes
    pub fn with_link_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.link_prefix = prefix.into();
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Download every asset one after another, rewriting the page as each
    /// succeeds. A failed asset is logged, recorded in the report and left
    /// pointing at its original URL.
    pub async fn download_assets(&self, mut page: Page, assets: &[AssetRef]) -> (Page, DownloadReport) {
        info!("Downloading {} assets into {}", assets.len(), self.staging_dir.display());

        let mut report = DownloadReport::new();

        for (position, asset) in assets.iter().enumerate() {
            if let Some(ref callback) = self.progress_callback {
                callback(position, asset.url.to_string());
            }

            match self.download_one(&asset.url).await {
                Ok((path, file_name)) => {
                    let local = self.local_reference(&file_name);
                    if page.set_attr(asset.index, asset.kind.attr(), &local) {
                        debug!("Rewrote {} -> {}", asset.url, local);
                    } else {
                        warn!("Downloaded {} but could not rewrite its element", asset.url);
                    }
                    report.written.push(path);
                }
                Err(e) => {
                    warn!("Skipping asset {}: {}", asset.url, e);
                    report.failed.push(AssetFailure {
                        url: asset.url.to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Assets done: {} written, {} skipped",
            report.written.len(),
            report.failed.len()
        );
        (page, report)
    }

    async fn download_one(&self, url: &Url) -> Result<(PathBuf, String)> {
        let file_name = asset_file_name(url)?;
        let bytes = self.fetcher.fetch_bytes(url).await?;

        fs::create_dir_all(&self.staging_dir).await?;
        let path = self.staging_dir.join(&file_name);
        fs::write(&path, &bytes).await?;
        debug!("Saved {} ({} bytes)", path.display(), bytes.len());

        Ok((path, file_name))
    }

    fn local_reference(&self, file_name: &str) -> String {
        let prefix = self.link_prefix.trim_end_matches('/');
        if prefix.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{}", prefix, file_name)
        }
    }
}

/// Last segment of the URL path, used as the staged file name
pub fn asset_file_name(url: &Url) -> Result<String> {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .map(str::to_string)
        .ok_or_else(|| ScanError::MissingFileName(url.to_string()))
}
