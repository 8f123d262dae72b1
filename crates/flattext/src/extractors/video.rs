//! Video transcript extractor and the caption fetcher behind it.

use crate::core::config::ExtractionConfig;
use crate::core::resolver::extract_video_id;
use crate::extraction::transcript::{parse_caption_tracks, parse_innertube_api_key, parse_timed_text, select_track};
use crate::extractors::web::{build_http_client, ensure_success, request_error};
use crate::plugins::{DocumentExtractor, ExtractionInput, Plugin};
use crate::types::{FormatTag, TranscriptEntry};
use crate::{FlattextError, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT_LANGUAGE, COOKIE};
use serde_json::{Value, json};
use std::sync::Arc;

const DEFAULT_VIDEO_HOST: &str = "https://www.youtube.com";
const INNERTUBE_CLIENT_NAME: &str = "ANDROID";
const INNERTUBE_CLIENT_VERSION: &str = "20.10.38";

/// Retrieves the timed caption entries of a video.
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    /// Fetch the transcript of `video_id` in one of the configured languages.
    ///
    /// # Errors
    ///
    /// - `FlattextError::TranscriptUnavailable` when captions are disabled,
    ///   the video cannot be played, or no track matches the languages
    /// - `FlattextError::Network` when a request fails
    async fn fetch(&self, video_id: &str, config: &ExtractionConfig) -> Result<Vec<TranscriptEntry>>;
}

/// [`TranscriptFetcher`] that talks to the video host's web endpoints.
///
/// The watch page yields an API key, the player endpoint lists caption
/// tracks, and the chosen track's URL serves the timed-text document.
#[derive(Debug, Clone)]
pub struct YoutubeTranscriptFetcher {
    base_url: String,
}

impl YoutubeTranscriptFetcher {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_VIDEO_HOST)
    }

    /// Point the fetcher at another host, e.g. a local stand-in server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get_text(&self, client: &reqwest::Client, url: &str) -> Result<String> {
        let response = client
            .get(url)
            .header(ACCEPT_LANGUAGE, "en-US")
            .header(COOKIE, "CONSENT=YES+cb")
            .send()
            .await
            .map_err(|e| request_error(url, e))?;
        let response = ensure_success(url, response)?;
        response.text().await.map_err(|e| request_error(url, e))
    }

    async fn player_response(&self, client: &reqwest::Client, video_id: &str, api_key: &str) -> Result<Value> {
        let url = format!("{}/youtubei/v1/player?key={}", self.base_url, api_key);
        let body = json!({
            "context": {
                "client": {
                    "clientName": INNERTUBE_CLIENT_NAME,
                    "clientVersion": INNERTUBE_CLIENT_VERSION,
                }
            },
            "videoId": video_id,
        });

        let response = client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| request_error(&url, e))?;
        let response = ensure_success(&url, response)?;

        response.json::<Value>().await.map_err(|e| {
            FlattextError::transcript_unavailable_with_source(format!("Could not read the player response: {}", e), e)
        })
    }
}

impl Default for YoutubeTranscriptFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptFetcher for YoutubeTranscriptFetcher {
    async fn fetch(&self, video_id: &str, config: &ExtractionConfig) -> Result<Vec<TranscriptEntry>> {
        let client = build_http_client(config)?;

        let watch_url = format!("{}/watch?v={}", self.base_url, video_id);
        let watch_html = self.get_text(&client, &watch_url).await?;
        let api_key = parse_innertube_api_key(&watch_html)?;

        let player = self.player_response(&client, video_id, &api_key).await?;
        let tracks = parse_caption_tracks(&player)?;
        let track = select_track(&tracks, &config.transcript_languages)?;

        tracing::debug!(
            video_id,
            language = %track.language_code,
            generated = track.is_generated,
            "Selected caption track"
        );

        let timed_text = self.get_text(&client, &track.base_url).await?;
        parse_timed_text(&timed_text)
    }
}

/// Extractor for video watch links.
///
/// Caption entries are ordered by start time and their texts joined with
/// single spaces.
pub struct VideoTranscriptExtractor {
    fetcher: Arc<dyn TranscriptFetcher>,
}

impl VideoTranscriptExtractor {
    pub fn new() -> Self {
        Self::with_fetcher(Arc::new(YoutubeTranscriptFetcher::new()))
    }

    pub fn with_fetcher(fetcher: Arc<dyn TranscriptFetcher>) -> Self {
        Self { fetcher }
    }
}

impl Default for VideoTranscriptExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for VideoTranscriptExtractor {
    fn name(&self) -> &str {
        "video-transcript-extractor"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    fn description(&self) -> &str {
        "Retrieves caption transcripts for video links"
    }
}

#[async_trait]
impl DocumentExtractor for VideoTranscriptExtractor {
    async fn extract(&self, input: ExtractionInput, config: &ExtractionConfig) -> Result<String> {
        let url = input.into_url()?;

        let video_id = extract_video_id(&url).ok_or_else(|| {
            FlattextError::transcript_unavailable(format!("Could not parse a video id from URL '{}'", url))
        })?;

        let mut entries = self.fetcher.fetch(&video_id, config).await?;
        entries.sort_by(|a, b| a.start.total_cmp(&b.start));

        let texts: Vec<&str> = entries
            .iter()
            .map(|entry| entry.text.as_str())
            .filter(|text| !text.trim().is_empty())
            .collect();

        tracing::debug!(video_id = %video_id, entries = texts.len(), "Joined transcript entries");

        Ok(texts.join(" "))
    }

    fn supported_formats(&self) -> &[FormatTag] {
        &[FormatTag::VideoTranscript]
    }
}
