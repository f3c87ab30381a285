mod common;

use common::{track, Listing, StubSource};
use serde_json::json;
use yt_transcript::{fetch_transcript, LanguagePreference, TranscriptSegment};

#[tokio::test]
async fn test_manual_english_transcript_is_preferred() {
    let source = StubSource::with_tracks(vec![
        track("en", true, &[]),
        track("en-GB", false, &["en"]),
    ]);

    let result = fetch_transcript(&source, "vid", &LanguagePreference::default()).await;

    assert!(result.success);
    assert_eq!(result.language.as_deref(), Some("en-GB"));
    assert_eq!(result.is_generated, Some(false));
    assert_eq!(source.fetched_codes(), vec!["en-GB"]);
}

#[tokio::test]
async fn test_generated_transcript_is_second_choice() {
    let source = StubSource::with_tracks(vec![
        track("de", false, &["en"]),
        track("en", true, &[]),
    ]);

    let result = fetch_transcript(&source, "vid", &LanguagePreference::default()).await;

    assert!(result.success);
    assert_eq!(result.language.as_deref(), Some("en"));
    assert_eq!(result.is_generated, Some(true));
}

#[tokio::test]
async fn test_translation_is_last_resort() {
    let source = StubSource::with_tracks(vec![
        track("ja", true, &["en"]),
        track("fr", false, &[]),
        track("de", false, &["en", "fr"]),
    ]);

    let result = fetch_transcript(&source, "vid", &LanguagePreference::default()).await;

    assert!(result.success);
    assert_eq!(result.language.as_deref(), Some("en"));
    assert_eq!(result.is_generated, Some(false));

    // the first translatable track in source order is manual German
    let fetched = source.fetched.lock().unwrap();
    assert_eq!(fetched.len(), 1);
    assert!(fetched[0].url.contains("lang=de"));
    assert!(fetched[0].url.ends_with("&tlang=en"));
}

#[tokio::test]
async fn test_no_usable_transcript() {
    let source = StubSource::with_tracks(vec![track("de", false, &[])]);

    let result = fetch_transcript(&source, "vid", &LanguagePreference::default()).await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "success": false,
            "error": "No English transcript available",
            "segments": []
        })
    );
    assert!(source.fetched_codes().is_empty());
}

#[tokio::test]
async fn test_transcripts_disabled_output_is_exact() {
    let source = StubSource::new(Listing::Disabled);

    let result = fetch_transcript(&source, "vid", &LanguagePreference::default()).await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "success": false,
            "error": "Transcripts are disabled for this video",
            "segments": []
        })
    );
}

#[tokio::test]
async fn test_video_unavailable() {
    let source = StubSource::new(Listing::Unavailable);

    let result = fetch_transcript(&source, "vid", &LanguagePreference::default()).await;

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("Video is unavailable"));
    assert!(result.segments.is_empty());
}

#[tokio::test]
async fn test_other_errors_pass_their_message_through() {
    let source = StubSource::new(Listing::Blocked);

    let result = fetch_transcript(&source, "vid", &LanguagePreference::default()).await;

    assert!(!result.success);
    assert_eq!(
        result.error.as_deref(),
        Some("YouTube is blocking requests from this IP address")
    );
}

#[tokio::test]
async fn test_missing_translation_language_is_reported() {
    let source = StubSource::with_tracks(vec![track("de", false, &["fr"])]);

    let result = fetch_transcript(&source, "vid", &LanguagePreference::default()).await;

    assert!(!result.success);
    assert_eq!(
        result.error.as_deref(),
        Some("The requested translation language is not available: en")
    );
}

#[tokio::test]
async fn test_segments_are_truncated_to_milliseconds() {
    let source = StubSource::with_tracks(vec![track("en", false, &[])]);

    let result = fetch_transcript(&source, "vid", &LanguagePreference::default()).await;

    assert_eq!(
        result.segments,
        vec![
            TranscriptSegment {
                text: String::from("Hello there"),
                offset: 1500,
                duration: 2250,
            },
            TranscriptSegment {
                text: String::from("General Kenobi"),
                offset: 3750,
                duration: 1000,
            },
        ]
    );
}

#[tokio::test]
async fn test_custom_language_preference() {
    let source = StubSource::with_tracks(vec![
        track("en", false, &[]),
        track("de", true, &[]),
    ]);
    let preference = LanguagePreference {
        languages: vec![String::from("de")],
        translate_to: String::from("de"),
    };

    let result = fetch_transcript(&source, "vid", &preference).await;

    assert_eq!(result.language.as_deref(), Some("de"));
    assert_eq!(result.is_generated, Some(true));
}
