use crate::error::Result;
use crate::page::Page;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

pub const INDEX_FILE: &str = "index.html";

/// Remove the staging directory and everything in it, then recreate it empty
pub async fn clear_assets(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir).await {
        Ok(()) => debug!("Removed previous staging directory {}", dir.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    fs::create_dir_all(dir).await?;
    Ok(())
}

/// Serialize `page` to `index.html` inside `dir`, replacing any existing file
pub async fn write_page(page: &Page, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).await?;

    let path = dir.join(INDEX_FILE);
    fs::write(&path, page.to_html()).await?;
    debug!("Wrote {}", path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use url::Url;

    #[tokio::test]
    async fn test_clear_assets_empties_existing_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("assets");
        std::fs::create_dir_all(dir.join("nested")).unwrap();
        std::fs::write(dir.join("old.css"), "body{}").unwrap();
        std::fs::write(dir.join("nested").join("old.js"), "x()").unwrap();

        clear_assets(&dir).await.unwrap();

        assert!(dir.is_dir());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_clear_assets_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("does").join("not").join("exist");

        clear_assets(&dir).await.unwrap();

        assert!(dir.is_dir());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_write_page_overwrites_index() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(INDEX_FILE), "stale").unwrap();

        let page = Page::parse(
            "<html><body><p>fresh</p></body></html>",
            Url::parse("https://ex.com/").unwrap(),
        )
        .unwrap();

        let path = write_page(&page, temp.path()).await.unwrap();

        assert_eq!(path, temp.path().join(INDEX_FILE));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<p>fresh</p>"));
        assert!(!written.contains("stale"));
    }
}
