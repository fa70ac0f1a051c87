//! Streaming preview and cover art lookup against the iTunes Search API.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub audio_url: Option<String>,
    pub artwork_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    preview_url: Option<String>,
    artwork_url100: Option<String>,
}

#[derive(Clone)]
pub struct PreviewClient {
    http: reqwest::Client,
    base_url: String,
}

impl PreviewClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Setup(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// First search hit for "{title} {artist}". Any failure is `None`.
    pub async fn lookup(&self, title: &str, artist: &str) -> Option<Preview> {
        let term = format!("{} {}", title, artist).trim().to_string();
        if term.is_empty() {
            return None;
        }

        match self.search(&term).await {
            Ok(found) => found,
            Err(e) => {
                debug!("Preview lookup for {:?} failed: {}", term, e);
                None
            }
        }
    }

    async fn search(&self, term: &str) -> Result<Option<Preview>, reqwest::Error> {
        let resp: SearchResponse = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[("media", "music"), ("limit", "1"), ("term", term)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp.results.into_iter().next().map(|hit| Preview {
            audio_url: hit.preview_url,
            artwork_url: hit.artwork_url100.map(|url| upscale_artwork(&url)),
        }))
    }
}

/// Swaps the 100px thumbnail for the 600px rendition of the same artwork.
pub fn upscale_artwork(url: &str) -> String {
    url.replace("100x100", "600x600")
}
