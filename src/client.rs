use tracing::{info, warn};

use crate::error::TranscriptError;
use crate::models::{TranscriptResult, TranscriptSegment};
use crate::youtube::{FetchedSnippet, Transcript, TranscriptSource};

pub const TRANSCRIPTS_DISABLED_ERROR: &str = "Transcripts are disabled for this video";
pub const VIDEO_UNAVAILABLE_ERROR: &str = "Video is unavailable";
pub const NO_TRANSCRIPT_ERROR: &str = "No English transcript available";

/// Which languages to look for, and what to translate into as a last resort.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePreference {
    pub languages: Vec<String>,
    pub translate_to: String,
}

impl Default for LanguagePreference {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string(), "en-US".to_string(), "en-GB".to_string()],
            translate_to: "en".to_string(),
        }
    }
}

/// Fetch the transcript of `video_id` and normalize it into a [`TranscriptResult`].
///
/// Tracks are tried in order: a manually created track in a preferred
/// language, then a generated one, then a translation of the first
/// translatable track. Every failure is folded into the result.
///
/// The first step skips generated tracks even when one matches an earlier
/// language code; those are only considered once no manual track matches.
pub async fn fetch_transcript(
    source: &dyn TranscriptSource,
    video_id: &str,
    preference: &LanguagePreference,
) -> TranscriptResult {
    match try_fetch_transcript(source, video_id, preference).await {
        Ok(result) => result,
        Err(err) => {
            warn!(video_id, error = %err, "transcript fetch failed");
            TranscriptResult::failure(error_message(&err))
        }
    }
}

async fn try_fetch_transcript(
    source: &dyn TranscriptSource,
    video_id: &str,
    preference: &LanguagePreference,
) -> Result<TranscriptResult, TranscriptError> {
    let transcript_list = source.list(video_id).await?;
    let languages = preference.languages.as_slice();

    let transcript: Option<Transcript> =
        match transcript_list.find_manually_created_transcript(languages) {
            Ok(found) => Some(found.clone()),
            Err(TranscriptError::NoTranscriptFound { .. }) => {
                match transcript_list.find_generated_transcript(languages) {
                    Ok(found) => Some(found.clone()),
                    Err(TranscriptError::NoTranscriptFound { .. }) => transcript_list
                        .iter()
                        .find(|t| t.is_translatable())
                        .map(|t| t.translate(&preference.translate_to))
                        .transpose()?,
                    Err(err) => return Err(err),
                }
            }
            Err(err) => return Err(err),
        };

    let Some(transcript) = transcript else {
        return Ok(TranscriptResult::failure(NO_TRANSCRIPT_ERROR));
    };

    info!(
        video_id,
        language_code = %transcript.language_code,
        is_generated = transcript.is_generated,
        "selected transcript"
    );

    let snippets = source.fetch(&transcript).await?;
    Ok(TranscriptResult::success(
        to_segments(&snippets),
        transcript.language_code,
        transcript.is_generated,
    ))
}

fn error_message(err: &TranscriptError) -> String {
    match err {
        TranscriptError::TranscriptsDisabled { .. } => TRANSCRIPTS_DISABLED_ERROR.to_string(),
        TranscriptError::VideoUnavailable { .. } => VIDEO_UNAVAILABLE_ERROR.to_string(),
        TranscriptError::NoTranscriptFound { .. } => NO_TRANSCRIPT_ERROR.to_string(),
        other => other.to_string(),
    }
}

pub fn to_segments(snippets: &[FetchedSnippet]) -> Vec<TranscriptSegment> {
    snippets
        .iter()
        .map(|snippet| TranscriptSegment {
            text: snippet.text.clone(),
            offset: seconds_to_millis(snippet.start),
            duration: seconds_to_millis(snippet.duration),
        })
        .collect()
}

/// Truncates toward zero; fractional milliseconds are dropped, not rounded.
pub fn seconds_to_millis(seconds: f64) -> i64 {
    (seconds * 1000.0).trunc() as i64
}
