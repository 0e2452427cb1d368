use serde::Deserialize;
use std::time::Duration;

use crate::app::config::AppConfig;
use crate::app::domain::passage::{Verse, VerseCollection};
use crate::app::infrastructure::error::FetchError;

const USER_AGENT: &str = concat!("Proposito/", env!("CARGO_PKG_VERSION"));

/// Source of chapter text.
///
/// Implementations must be safe to call repeatedly and must not retry: a
/// failure is reported for that attempt only.
pub trait ContentFetcher {
    fn fetch(&self, book: &str, chapter: u32) -> Result<VerseCollection, FetchError>;
}

/// Provider response body. A body without `verses` is an empty chapter,
/// not an error.
#[derive(Debug, Deserialize)]
struct ChapterResponse {
    #[serde(default)]
    verses: Vec<Verse>,
}

/// Fetches chapters over HTTP: `GET <base>/<book> <chapter>?translation=<t>`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    base_url: String,
    translation: String,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>, translation: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            translation: translation.into(),
            timeout,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.api_base_url.clone(),
            config.translation.clone(),
            config.request_timeout(),
        )
    }

    /// Unencoded request URL; minreq percent-encodes the resource on send.
    pub fn chapter_url(&self, book: &str, chapter: u32) -> String {
        format!("{}/{} {}", self.base_url.trim_end_matches('/'), book, chapter)
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }
}

impl ContentFetcher for HttpFetcher {
    fn fetch(&self, book: &str, chapter: u32) -> Result<VerseCollection, FetchError> {
        let url = self.chapter_url(book, chapter);
        tracing::debug!(%url, translation = %self.translation, "fetching chapter");

        let response = minreq::get(&url)
            .with_param("translation", &self.translation)
            .with_header("User-Agent", USER_AGENT)
            .with_timeout(self.timeout.as_secs().max(1))
            .send()
            .map_err(|e| FetchError::Network(format!("Failed to connect to verse provider: {}", e)))?;

        if !(200..300).contains(&response.status_code) {
            return Err(FetchError::Network(format!(
                "Verse provider returned error: {} {}",
                response.status_code, response.reason_phrase
            )));
        }

        let chapter: ChapterResponse = response
            .json()
            .map_err(|e| FetchError::Parse(format!("Failed to parse verses: {}", e)))?;
        Ok(chapter.verses)
    }
}
