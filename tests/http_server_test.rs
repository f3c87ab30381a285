mod common;

use common::{track, Listing, StubSource};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use yt_transcript::{serve, AppState, LanguagePreference};

async fn setup_test_server(
    source: StubSource,
) -> Result<(String, reqwest::Client), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);
    let state = AppState::new(Arc::new(source), LanguagePreference::default());

    tokio::spawn(async move {
        let _ = serve(listener, state).await;
    });

    Ok((base_url, reqwest::Client::new()))
}

#[tokio::test]
async fn test_missing_video_id_is_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, client) = setup_test_server(StubSource::new(Listing::Disabled)).await?;

    for url in [
        format!("{}/api/transcript", base_url),
        format!("{}/api/transcript?videoId=", base_url),
        format!("{}/api/transcript?video_id=abc", base_url),
    ] {
        let response = client.get(&url).send().await?;
        assert_eq!(response.status().as_u16(), 400, "Failed for url: {}", url);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*"),
            "Missing CORS header for url: {}",
            url
        );

        let body: serde_json::Value = response.json().await?;
        assert_eq!(
            body,
            json!({ "success": false, "error": "Missing videoId parameter" })
        );
    }

    Ok(())
}

#[tokio::test]
async fn test_successful_fetch_returns_ok() -> Result<(), Box<dyn std::error::Error>> {
    let source = StubSource::with_tracks(vec![track("en", false, &[])]);
    let (base_url, client) = setup_test_server(source).await?;

    let response = client
        .get(format!("{}/api/transcript?videoId=abc123", base_url))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["language"], "en");
    assert_eq!(body["isGenerated"], false);
    assert_eq!(body["segments"][0]["offset"], 1500);
    assert_eq!(body["segments"][0]["duration"], 2250);
    assert!(body.get("error").is_none());

    Ok(())
}

#[tokio::test]
async fn test_failed_fetch_returns_server_error() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, client) = setup_test_server(StubSource::new(Listing::Disabled)).await?;

    let response = client
        .get(format!("{}/api/transcript?videoId=abc123", base_url))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    let body: serde_json::Value = response.json().await?;
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": "Transcripts are disabled for this video",
            "segments": []
        })
    );

    Ok(())
}

#[tokio::test]
async fn test_health_endpoint() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, client) = setup_test_server(StubSource::new(Listing::Disabled)).await?;

    let response = client.get(format!("{}/health", base_url)).send().await?;
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["status"], "ok");

    Ok(())
}
