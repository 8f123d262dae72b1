//! Parsing for video caption data.
//!
//! These functions cover the pure half of transcript retrieval: reading the
//! watch page, the player response and the timed-text document. Network access
//! lives in [`crate::extractors::YoutubeTranscriptFetcher`].

use crate::types::TranscriptEntry;
use crate::{FlattextError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use serde_json::Value;

static INNERTUBE_API_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#)
        .expect("Innertube API key regex pattern is valid and should compile")
});

/// One caption track advertised by the player response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    /// Automatic speech recognition track rather than uploaded captions.
    pub is_generated: bool,
}

/// Pull the innertube API key out of a watch page.
pub fn parse_innertube_api_key(watch_html: &str) -> Result<String> {
    if let Some(captures) = INNERTUBE_API_KEY.captures(watch_html) {
        return Ok(captures[1].to_string());
    }

    if watch_html.contains("class=\"g-recaptcha\"") {
        return Err(FlattextError::network(
            "Too many requests: the video host is asking for a captcha",
        ));
    }

    Err(FlattextError::transcript_unavailable(
        "Could not read the video page to locate captions",
    ))
}

/// Read the caption tracks out of a player response.
///
/// # Errors
///
/// `TranscriptUnavailable` when the video cannot be played or has captions disabled.
pub fn parse_caption_tracks(player_response: &Value) -> Result<Vec<CaptionTrack>> {
    if let Some(status) = player_response
        .pointer("/playabilityStatus/status")
        .and_then(Value::as_str)
        && status != "OK"
    {
        let reason = player_response
            .pointer("/playabilityStatus/reason")
            .and_then(Value::as_str)
            .unwrap_or(status);
        return Err(FlattextError::transcript_unavailable(format!(
            "Video is unplayable: {}",
            reason
        )));
    }

    let Some(tracks) = player_response
        .pointer("/captions/playerCaptionsTracklistRenderer/captionTracks")
        .and_then(Value::as_array)
    else {
        return Err(FlattextError::transcript_unavailable(
            "Subtitles are disabled for this video",
        ));
    };

    Ok(tracks
        .iter()
        .filter_map(|track| {
            let base_url = track.get("baseUrl")?.as_str()?;
            let language_code = track.get("languageCode")?.as_str()?;
            Some(CaptionTrack {
                base_url: base_url.replace("&fmt=srv3", ""),
                language_code: language_code.to_string(),
                is_generated: track.get("kind").and_then(Value::as_str) == Some("asr"),
            })
        })
        .collect())
}

/// Pick a track for the first language that has one, manual before generated.
pub fn select_track<'a>(tracks: &'a [CaptionTrack], languages: &[String]) -> Result<&'a CaptionTrack> {
    for language in languages {
        for generated in [false, true] {
            if let Some(track) = tracks
                .iter()
                .find(|t| t.language_code == *language && t.is_generated == generated)
            {
                return Ok(track);
            }
        }
    }

    let available: Vec<&str> = tracks.iter().map(|t| t.language_code.as_str()).collect();
    Err(FlattextError::transcript_unavailable(format!(
        "No transcript found for languages [{}] (available: [{}])",
        languages.join(", "),
        available.join(", ")
    )))
}

/// Parse a timed-text document of `<text start=".." dur="..">` entries.
///
/// Entry text is HTML-unescaped and any inline markup is stripped.
pub fn parse_timed_text(xml: &str) -> Result<Vec<TranscriptEntry>> {
    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| FlattextError::parsing_with_source(format!("Failed to parse transcript: {}", e), e))?;

    let entries = doc
        .descendants()
        .filter(|node| node.has_tag_name("text"))
        .filter_map(|node| {
            let raw = node.text()?;
            let start = node.attribute("start").and_then(|s| s.parse().ok()).unwrap_or(0.0);
            let duration = node.attribute("dur").and_then(|s| s.parse().ok()).unwrap_or(0.0);
            Some(TranscriptEntry {
                text: unescape_caption(raw),
                start,
                duration,
            })
        })
        .collect();

    Ok(entries)
}

fn unescape_caption(raw: &str) -> String {
    Html::parse_fragment(raw).root_element().text().collect()
}
