use serde::{Deserialize, Serialize};

/// One timed caption entry, with times in whole milliseconds.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct TranscriptSegment {
    pub text: String,
    pub offset: i64,
    pub duration: i64,
}

/// The JSON document returned by both the CLI and the HTTP endpoint.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptResult {
    pub success: bool,
    pub segments: Vec<TranscriptSegment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_generated: Option<bool>,
}

impl TranscriptResult {
    pub fn success(
        segments: Vec<TranscriptSegment>,
        language: impl Into<String>,
        is_generated: bool,
    ) -> Self {
        Self {
            success: true,
            segments,
            error: None,
            language: Some(language.into()),
            is_generated: Some(is_generated),
        }
    }

    /// Failures never carry segments.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            segments: Vec::new(),
            error: Some(error.into()),
            language: None,
            is_generated: None,
        }
    }
}
