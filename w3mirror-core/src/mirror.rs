use crate::cid::Cid;
use crate::error::MirrorError;
use crate::upload::{StorageClient, upload_files};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;
use w3mirror_scanner::downloader::DEFAULT_LINK_PREFIX;
use w3mirror_scanner::{AssetFailure, Downloader, Fetcher, Page, ScanError, write_page};

pub const DEFAULT_STAGING_DIR: &str = "assets";

/// Options for configuring a mirror run
pub struct MirrorOptions {
    pub url: Url,
    pub staging_dir: PathBuf,
    pub link_prefix: String,
    pub timeout_secs: Option<u64>,
    pub show_progress_bars: bool,
}

impl MirrorOptions {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            staging_dir: PathBuf::from(DEFAULT_STAGING_DIR),
            link_prefix: DEFAULT_LINK_PREFIX.to_string(),
            timeout_secs: None,
            show_progress_bars: false,
        }
    }
}

/// Storage account and space an upload goes to
#[derive(Debug, Clone)]
pub struct Account {
    pub email: String,
    pub space: String,
}

/// Callback for reporting pipeline milestones
pub type MirrorProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

#[derive(Debug, Clone, Serialize)]
pub struct ScrapeOutcome {
    /// Downloaded assets followed by the rewritten `index.html`, each path once
    pub files: Vec<PathBuf>,
    pub failed: Vec<AssetFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MirrorOutcome {
    pub url: String,
    pub files: Vec<PathBuf>,
    pub failed: Vec<AssetFailure>,
    pub cid: Cid,
    pub gateway_url: String,
}

/// Leave `dir` existing and empty
pub async fn clear_assets(dir: &Path) -> Result<(), MirrorError> {
    w3mirror_scanner::clear_assets(dir)
        .await
        .map_err(MirrorError::Staging)
}

/// Fetch the page, stage its assets and the rewritten HTML.
///
/// The staging directory is cleared first. Assets that fail to download are
/// reported in [`ScrapeOutcome::failed`] and keep their original URLs.
pub async fn scrape_page(
    options: &MirrorOptions,
    progress_callback: Option<MirrorProgressCallback>,
) -> Result<ScrapeOutcome, MirrorError> {
    let MirrorOptions {
        url,
        staging_dir,
        link_prefix,
        timeout_secs,
        show_progress_bars,
    } = options;

    clear_assets(staging_dir).await?;

    let fetch_error = |source: ScanError| MirrorError::Fetch {
        url: url.to_string(),
        source,
    };

    let fetcher = match timeout_secs {
        Some(secs) => Fetcher::with_timeout(*secs),
        None => Fetcher::new(),
    }
    .map_err(fetch_error)?;

    info!("Fetching {}", url);
    let html = fetcher.fetch_text(url).await.map_err(fetch_error)?;

    let page = Page::parse(&html, url.clone()).map_err(MirrorError::Parse)?;
    let assets = page.assets();
    info!("Found {} assets on {}", assets.len(), url);

    if let Some(ref callback) = progress_callback {
        callback(format!("Found {} assets on {}", assets.len(), url));
    }

    let progress_bar = if *show_progress_bars && !assets.is_empty() {
        let pb = ProgressBar::new(assets.len() as u64);
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} [{pos}/{len}] {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let mut downloader =
        Downloader::new(fetcher, staging_dir.clone()).with_link_prefix(link_prefix.clone());

    if let Some(ref pb) = progress_bar {
        let pb_clone = pb.clone();
        downloader = downloader.with_progress_callback(Arc::new(move |position, asset_url| {
            pb_clone.set_position(position as u64);
            pb_clone.set_message(asset_url);
        }));
    }

    let (page, report) = downloader.download_assets(page, &assets).await;

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }

    let index = write_page(&page, staging_dir)
        .await
        .map_err(MirrorError::Staging)?;

    // assets sharing a basename, or named index.html, land on one path
    let mut seen = HashSet::new();
    let files: Vec<PathBuf> = report
        .written
        .into_iter()
        .chain(std::iter::once(index))
        .filter(|file| seen.insert(file.clone()))
        .collect();

    Ok(ScrapeOutcome {
        files,
        failed: report.failed,
    })
}

/// Scrape the page and upload the staged files to the account's space
pub async fn execute_mirror(
    options: &MirrorOptions,
    account: &Account,
    client: &dyn StorageClient,
    progress_callback: Option<MirrorProgressCallback>,
) -> Result<MirrorOutcome, MirrorError> {
    let scrape = scrape_page(options, progress_callback.clone()).await?;

    if scrape.files.is_empty() {
        warn!("No files staged for {}, skipping upload", options.url);
        return Err(MirrorError::NothingToUpload);
    }

    if let Some(ref callback) = progress_callback {
        callback(format!(
            "Uploading {} files to space {}",
            scrape.files.len(),
            account.space
        ));
    }

    let cid = upload_files(client, &scrape.files, &account.email, &account.space).await?;
    let gateway_url = cid.gateway_url();

    Ok(MirrorOutcome {
        url: options.url.to_string(),
        files: scrape.files,
        failed: scrape.failed,
        cid,
        gateway_url,
    })
}

/// Generate a human-readable summary of a finished mirror run
pub fn generate_mirror_report(outcome: &MirrorOutcome) -> String {
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Page: {}\n", outcome.url));
    report.push_str(&format!("  Files staged: {}\n", outcome.files.len()));
    report.push_str(&format!("  Assets skipped: {}\n", outcome.failed.len()));
    report.push_str(&format!("  CID: {}\n", outcome.cid));
    report.push_str(&format!("  Gateway: {}\n", outcome.gateway_url));
    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    report.push_str("## Staged files\n");
    for file in &outcome.files {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        report.push_str(&format!("  \x1b[32m✓\x1b[0m {}\n", name));
    }

    if !outcome.failed.is_empty() {
        report.push_str("\n## Skipped assets\n");
        for failure in &outcome.failed {
            report.push_str(&format!(
                "  \x1b[33m⚠\x1b[0m {} \x1b[90m{}\x1b[0m\n",
                failure.url, failure.error
            ));
        }
    }

    report
}
