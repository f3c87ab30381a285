mod client;
mod config;
mod error;
mod logging;
mod models;
mod server;
mod utils;
mod youtube;

// Re-export types needed for the public API
pub use client::{
    fetch_transcript, seconds_to_millis, to_segments, LanguagePreference, NO_TRANSCRIPT_ERROR,
    TRANSCRIPTS_DISABLED_ERROR, VIDEO_UNAVAILABLE_ERROR,
};
pub use config::Config;
pub use error::TranscriptError;
pub use logging::init_tracing;
pub use models::{TranscriptResult, TranscriptSegment};
pub use server::{router, serve, AppState, MISSING_VIDEO_ID_ERROR};
pub use utils::{looks_like_url, strip_tags, unescape_html};
pub use youtube::{
    parse_timedtext, FetchedSnippet, Transcript, TranscriptList, TranscriptSource,
    TranslationLanguage, YouTubeTranscriptApi,
};

pub const NO_VIDEO_ID_ERROR: &str = "No video ID provided";

// Re-export command line types
use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Fetch a YouTube transcript as JSON", long_about = None)]
#[command(after_help = "Examples:
  yt-transcript dQw4w9WgXcQ
  yt-transcript dQw4w9WgXcQ --pretty
  RUST_LOG=debug yt-transcript dQw4w9WgXcQ")]
pub struct Args {
    /// YouTube video ID (not the full URL); IDs may start with '-'
    #[arg(name = "VIDEO_ID", allow_hyphen_values = true)]
    pub video_id: Option<String>,

    /// Anything after the video ID is ignored
    #[arg(hide = true)]
    pub ignored: Vec<String>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to a config file (defaults to ~/.config/yt-transcript/config.json)
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,
}

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Serve YouTube transcripts over HTTP", long_about = None)]
#[command(after_help = "Endpoints:
  GET /api/transcript?videoId=<ID>
  GET /health")]
pub struct ServerArgs {
    /// Address to listen on, overrides bind_address from the config
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to a config file (defaults to ~/.config/yt-transcript/config.json)
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,
}

/// Turn a command line parse error into the failure document the CLI prints.
pub fn usage_failure(err: &clap::Error) -> TranscriptResult {
    let rendered = err.to_string();
    let message = rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ");
    TranscriptResult::failure(format!("Invalid arguments: {}", message))
}

/// The one-shot CLI operation: a missing video ID is reported like any other failure.
pub async fn run_cli(
    video_id: Option<&str>,
    source: &dyn TranscriptSource,
    preference: &LanguagePreference,
) -> TranscriptResult {
    match video_id {
        Some(video_id) => fetch_transcript(source, video_id, preference).await,
        None => TranscriptResult::failure(NO_VIDEO_ID_ERROR),
    }
}
