pub mod cid;
pub mod error;
pub mod mirror;
pub mod upload;

pub use cid::Cid;
pub use error::{MirrorError, UploadError};
pub use mirror::{
    Account, MirrorOptions, MirrorOutcome, MirrorProgressCallback, ScrapeOutcome, clear_assets,
    execute_mirror, generate_mirror_report, scrape_page,
};
pub use upload::{StorageClient, W3CliClient, upload_files};
