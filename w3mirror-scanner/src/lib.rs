pub mod downloader;
pub mod error;
pub mod fetcher;
pub mod page;
pub mod result;
pub mod staging;

pub use downloader::{Downloader, ProgressCallback};
pub use error::ScanError;
pub use fetcher::Fetcher;
pub use page::Page;
pub use result::{AssetFailure, AssetKind, AssetRef, DownloadReport};
pub use staging::{INDEX_FILE, clear_assets, write_page};
