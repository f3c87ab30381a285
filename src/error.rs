use thiserror::Error;

/// Failures raised while listing, translating or fetching transcripts.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("Transcripts are disabled for video {video_id}")]
    TranscriptsDisabled { video_id: String },

    #[error("Video {video_id} is unavailable")]
    VideoUnavailable { video_id: String },

    #[error("No transcript found for video {video_id} in any of the requested languages: {}", .requested.join(", "))]
    NoTranscriptFound {
        video_id: String,
        requested: Vec<String>,
    },

    #[error("The requested transcript is not translatable")]
    NotTranslatable,

    #[error("The requested translation language is not available: {0}")]
    TranslationLanguageNotAvailable(String),

    #[error("Expected a video ID but got a URL: {0}")]
    InvalidVideoId(String),

    #[error("This video is age restricted")]
    AgeRestricted,

    #[error("The video is unplayable: {reason}")]
    VideoUnplayable { reason: String },

    #[error("YouTube is blocking requests from this IP address")]
    RequestBlocked,

    #[error("Failed to give consent to the YouTube cookie banner")]
    ConsentCookie,

    #[error("This caption track requires a PO token")]
    PoTokenRequired,

    #[error("Unexpected response from YouTube: {0}")]
    UnexpectedResponse(String),

    #[error("Request to YouTube failed: {0}")]
    Http(#[from] reqwest::Error),
}
