//! Remote extraction against local stand-in servers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
};
use flattext::extractors::{VideoTranscriptExtractor, WebPageExtractor, YoutubeTranscriptFetcher};
use flattext::{Dispatcher, ErrorKind, ExtractionConfig, ExtractionRequest, ExtractorRegistry};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const VIDEO_ID: &str = "dQw4w9WgXcQ";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Serve the router built by `build` on an ephemeral port and return its base URL.
async fn spawn_server(build: impl FnOnce(String) -> Router) -> String {
    init_tracing();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let router = build(base.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    base
}

fn web_dispatcher(config: ExtractionConfig) -> Dispatcher {
    let mut registry = ExtractorRegistry::new();
    registry.register(Arc::new(WebPageExtractor::new())).unwrap();
    Dispatcher::new(registry, config)
}

fn video_dispatcher(base: &str) -> Dispatcher {
    let fetcher = Arc::new(YoutubeTranscriptFetcher::with_base_url(base));
    let mut registry = ExtractorRegistry::new();
    registry
        .register(Arc::new(VideoTranscriptExtractor::with_fetcher(fetcher)))
        .unwrap();
    Dispatcher::new(registry, ExtractionConfig::default())
}

#[tokio::test]
async fn test_web_page_visible_text() {
    let base = spawn_server(|_| {
        Router::new().route(
            "/article",
            get(|| async {
                Html(
                    "<html><head><title>Daily</title><style>p { color: red }</style></head>\
                     <body><h1>News</h1><p>Rust   1.91 released</p><script>track()</script></body></html>",
                )
            }),
        )
    })
    .await;

    let result = web_dispatcher(ExtractionConfig::default())
        .dispatch(ExtractionRequest::remote_url(format!("{base}/article")))
        .await;

    assert_eq!(result.text(), Some("Daily News Rust 1.91 released"));
}

#[tokio::test]
async fn test_web_page_error_status_is_network_error() {
    let base = spawn_server(|_| {
        Router::new().route("/down", get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }))
    })
    .await;

    let result = web_dispatcher(ExtractionConfig::default())
        .dispatch(ExtractionRequest::remote_url(format!("{base}/down")))
        .await;

    assert_eq!(result.kind(), Some(ErrorKind::NetworkError));
    let flattext::ExtractionResult::Failure { detail, .. } = result else {
        panic!("expected failure");
    };
    assert!(detail.contains("503"), "detail was: {detail}");
}

#[tokio::test]
async fn test_web_page_timeout_is_network_error() {
    let base = spawn_server(|_| {
        Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Html("<p>too late</p>")
            }),
        )
    })
    .await;

    let config = ExtractionConfig {
        fetch_timeout_secs: 1,
        ..ExtractionConfig::default()
    };
    let result = web_dispatcher(config)
        .dispatch(ExtractionRequest::remote_url(format!("{base}/slow")))
        .await;

    assert_eq!(result.kind(), Some(ErrorKind::NetworkError));
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = web_dispatcher(ExtractionConfig::default())
        .dispatch(ExtractionRequest::remote_url(format!("http://{addr}/")))
        .await;

    assert_eq!(result.kind(), Some(ErrorKind::NetworkError));
}

fn video_host(base: String, player: Value) -> Router {
    let watch_page = r#"<html><script>ytcfg.set({"INNERTUBE_API_KEY":"test-key_123"});</script></html>"#;

    Router::new()
        .route("/watch", get(move || async move { Html(watch_page) }))
        .route(
            "/youtubei/v1/player",
            post(move |State(base): State<String>| {
                let player = player.to_string().replace("{base}", &base);
                async move { Json(serde_json::from_str::<Value>(&player).unwrap()) }
            }),
        )
        .route(
            "/api/timedtext",
            get(|| async {
                r#"<?xml version="1.0" encoding="utf-8" ?><transcript>
<text start="3.2" dur="1.0">to the show</text>
<text start="0.0" dur="1.5">Hello &amp;amp; welcome</text>
<text start="5.0" dur="0.5">   </text>
</transcript>"#
            }),
        )
        .with_state(base)
}

#[tokio::test]
async fn test_video_transcript_joined_by_start_time() {
    let player = json!({
        "playabilityStatus": { "status": "OK" },
        "captions": {
            "playerCaptionsTracklistRenderer": {
                "captionTracks": [
                    { "baseUrl": "{base}/api/timedtext?lang=de", "languageCode": "de" },
                    { "baseUrl": "{base}/api/timedtext?lang=en&fmt=srv3", "languageCode": "en" }
                ]
            }
        }
    });
    let base = spawn_server(move |base| video_host(base, player)).await;

    let result = video_dispatcher(&base)
        .dispatch(ExtractionRequest::remote_url(format!(
            "https://www.youtube.com/watch?v={VIDEO_ID}"
        )))
        .await;

    assert_eq!(result.text(), Some("Hello & welcome to the show"));
}

#[tokio::test]
async fn test_video_without_captions_is_transcript_unavailable() {
    let player = json!({ "playabilityStatus": { "status": "OK" } });
    let base = spawn_server(move |base| video_host(base, player)).await;

    let result = video_dispatcher(&base)
        .dispatch(ExtractionRequest::remote_url(format!("https://youtu.be/{VIDEO_ID}")))
        .await;

    assert_eq!(
        result,
        flattext::ExtractionResult::failure(ErrorKind::TranscriptUnavailable, "Subtitles are disabled for this video")
    );
}

#[tokio::test]
async fn test_video_without_requested_language_is_transcript_unavailable() {
    let player = json!({
        "playabilityStatus": { "status": "OK" },
        "captions": {
            "playerCaptionsTracklistRenderer": {
                "captionTracks": [
                    { "baseUrl": "{base}/api/timedtext?lang=fr", "languageCode": "fr" }
                ]
            }
        }
    });
    let base = spawn_server(move |base| video_host(base, player)).await;

    let result = video_dispatcher(&base)
        .dispatch(ExtractionRequest::remote_url(format!(
            "https://www.youtube.com/watch?v={VIDEO_ID}"
        )))
        .await;

    assert_eq!(result.kind(), Some(ErrorKind::TranscriptUnavailable));
}
