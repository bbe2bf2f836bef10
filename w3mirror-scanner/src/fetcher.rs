use crate::error::{Result, ScanError};
use reqwest::{Client, Response};
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("w3mirror/", env!("CARGO_PKG_VERSION"));

/// Thin HTTP GET wrapper shared by the page fetch and every asset download
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Fetcher with no request timeout
    pub fn new() -> Result<Self> {
        Self::build(None)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        Self::build(Some(Duration::from_secs(timeout_secs)))
    }

    fn build(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10));

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout).connect_timeout(timeout / 2);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// GET `url` and return the body as text
    pub async fn fetch_text(&self, url: &Url) -> Result<String> {
        let response = self.get(url).await?;
        Ok(response.text().await?)
    }

    /// GET `url` and return the raw body
    pub async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        let response = self.get(url).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn get(&self, url: &Url) -> Result<Response> {
        debug!("Fetching {}", url);

        let start = Instant::now();
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        debug!("{} -> {} in {:?}", url, status.as_u16(), start.elapsed());

        if !status.is_success() {
            return Err(ScanError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}
