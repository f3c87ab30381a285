#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use yt_transcript::{
    FetchedSnippet, Transcript, TranscriptError, TranscriptList, TranscriptSource,
    TranslationLanguage,
};

/// What `StubSource::list` answers with.
pub enum Listing {
    Tracks(Vec<Transcript>),
    Disabled,
    Unavailable,
    Blocked,
}

/// In-memory transcript source that records every track it is asked to fetch.
pub struct StubSource {
    listing: Listing,
    snippets: Vec<FetchedSnippet>,
    pub fetched: Mutex<Vec<Transcript>>,
}

impl StubSource {
    pub fn new(listing: Listing) -> Self {
        Self {
            listing,
            snippets: vec![
                FetchedSnippet {
                    text: String::from("Hello there"),
                    start: 1.5,
                    duration: 2.25,
                },
                FetchedSnippet {
                    text: String::from("General Kenobi"),
                    start: 3.75,
                    duration: 1.0009,
                },
            ],
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub fn with_tracks(tracks: Vec<Transcript>) -> Self {
        Self::new(Listing::Tracks(tracks))
    }

    pub fn fetched_codes(&self) -> Vec<String> {
        self.fetched
            .lock()
            .unwrap()
            .iter()
            .map(|t| t.language_code.clone())
            .collect()
    }
}

#[async_trait]
impl TranscriptSource for StubSource {
    async fn list(&self, video_id: &str) -> Result<TranscriptList, TranscriptError> {
        match &self.listing {
            Listing::Tracks(tracks) => Ok(TranscriptList::new(video_id, tracks.clone())),
            Listing::Disabled => Err(TranscriptError::TranscriptsDisabled {
                video_id: video_id.to_string(),
            }),
            Listing::Unavailable => Err(TranscriptError::VideoUnavailable {
                video_id: video_id.to_string(),
            }),
            Listing::Blocked => Err(TranscriptError::RequestBlocked),
        }
    }

    async fn fetch(&self, transcript: &Transcript) -> Result<Vec<FetchedSnippet>, TranscriptError> {
        self.fetched.lock().unwrap().push(transcript.clone());
        Ok(self.snippets.clone())
    }
}

pub fn track(language_code: &str, is_generated: bool, translatable_to: &[&str]) -> Transcript {
    Transcript {
        video_id: String::from("vid"),
        url: format!("https://www.youtube.com/api/timedtext?v=vid&lang={}", language_code),
        language: language_code.to_string(),
        language_code: language_code.to_string(),
        is_generated,
        translation_languages: translatable_to
            .iter()
            .map(|code| TranslationLanguage {
                language: format!("Translated {}", code),
                language_code: code.to_string(),
            })
            .collect(),
    }
}
