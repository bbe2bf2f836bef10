use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// The kinds of static asset a mirrored page pulls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetKind {
    Stylesheet,
    Script,
    Image,
}

impl AssetKind {
    /// Map an element's tag name onto an asset kind
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "link" => Some(AssetKind::Stylesheet),
            "script" => Some(AssetKind::Script),
            "img" => Some(AssetKind::Image),
            _ => None,
        }
    }

    /// Attribute holding the asset's location
    pub fn attr(self) -> &'static str {
        match self {
            AssetKind::Stylesheet => "href",
            AssetKind::Script | AssetKind::Image => "src",
        }
    }
}

/// An asset element found in a page, paired with its resolved URL.
///
/// `index` is the element's position among the page's asset elements in
/// document order. It stays valid for the lifetime of the [`crate::Page`]
/// it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    pub index: usize,
    pub kind: AssetKind,
    pub url: Url,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetFailure {
    pub url: String,
    pub error: String,
}

/// Outcome of a download pass over a page's assets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<AssetFailure>,
}

impl DownloadReport {
    pub fn new() -> Self {
        Self::default()
    }
}
