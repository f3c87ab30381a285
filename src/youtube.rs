use anyhow::Context;
use async_trait::async_trait;
use regex::Regex;
use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::{Client, Response, StatusCode, Url};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::error::TranscriptError;
use crate::utils::{looks_like_url, strip_tags, unescape_html};

const YOUTUBE_URL: &str = "https://www.youtube.com";
const WATCH_URL: &str = "https://www.youtube.com/watch?v=";
const INNERTUBE_API_URL: &str = "https://www.youtube.com/youtubei/v1/player?key=";
const CONSENT_ACTION: &str = "action=\"https://consent.youtube.com/s\"";
const RECAPTCHA_MARKER: &str = "class=\"g-recaptcha\"";
const UNAVAILABLE_REASON: &str = "This video is unavailable";

lazy_static::lazy_static! {
    static ref API_KEY_RE: Regex =
        Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).unwrap();
    static ref CONSENT_VALUE_RE: Regex = Regex::new(r#"name="v" value="(.*?)""#).unwrap();
    static ref TEXT_ELEMENT_RE: Regex =
        Regex::new(r"(?s)<text\b([^>]*?)(?:/>|>(.*?)</text>)").unwrap();
    static ref ATTRIBUTE_RE: Regex = Regex::new(r#"([a-zA-Z_:-]+)="([^"]*)""#).unwrap();
}

/// Where transcripts come from. The fetch adapter only talks to this trait.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// List every caption track available for `video_id`.
    async fn list(&self, video_id: &str) -> Result<TranscriptList, TranscriptError>;

    /// Download the timed entries of one caption track.
    async fn fetch(&self, transcript: &Transcript) -> Result<Vec<FetchedSnippet>, TranscriptError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationLanguage {
    pub language: String,
    pub language_code: String,
}

/// One caption track of a video.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub video_id: String,
    pub url: String,
    pub language: String,
    pub language_code: String,
    pub is_generated: bool,
    pub translation_languages: Vec<TranslationLanguage>,
}

impl Transcript {
    pub fn is_translatable(&self) -> bool {
        !self.translation_languages.is_empty()
    }

    /// Returns a track that YouTube machine-translates into `language_code`.
    pub fn translate(&self, language_code: &str) -> Result<Transcript, TranscriptError> {
        if !self.is_translatable() {
            return Err(TranscriptError::NotTranslatable);
        }

        let target = self
            .translation_languages
            .iter()
            .find(|lang| lang.language_code == language_code)
            .ok_or_else(|| {
                TranscriptError::TranslationLanguageNotAvailable(language_code.to_string())
            })?;

        Ok(Transcript {
            video_id: self.video_id.clone(),
            url: format!("{}&tlang={}", self.url, language_code),
            language: target.language.clone(),
            language_code: language_code.to_string(),
            is_generated: self.is_generated,
            translation_languages: Vec::new(),
        })
    }
}

/// A single caption entry as served by YouTube, times in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedSnippet {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

#[derive(Debug, Clone, Default)]
pub struct TranscriptList {
    pub video_id: String,
    pub manually_created: Vec<Transcript>,
    pub generated: Vec<Transcript>,
}

impl TranscriptList {
    /// Split `transcripts` by kind, keeping source order within each kind.
    pub fn new(video_id: impl Into<String>, transcripts: Vec<Transcript>) -> Self {
        let (generated, manually_created): (Vec<Transcript>, Vec<Transcript>) =
            transcripts.into_iter().partition(|t| t.is_generated);
        Self {
            video_id: video_id.into(),
            manually_created,
            generated,
        }
    }

    /// Manually created tracks are preferred over generated ones for each code.
    pub fn find_transcript<S: AsRef<str>>(
        &self,
        language_codes: &[S],
    ) -> Result<&Transcript, TranscriptError> {
        self.find_in(
            language_codes,
            &[self.manually_created.as_slice(), self.generated.as_slice()],
        )
    }

    pub fn find_manually_created_transcript<S: AsRef<str>>(
        &self,
        language_codes: &[S],
    ) -> Result<&Transcript, TranscriptError> {
        self.find_in(language_codes, &[self.manually_created.as_slice()])
    }

    pub fn find_generated_transcript<S: AsRef<str>>(
        &self,
        language_codes: &[S],
    ) -> Result<&Transcript, TranscriptError> {
        self.find_in(language_codes, &[self.generated.as_slice()])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transcript> {
        self.manually_created.iter().chain(self.generated.iter())
    }

    fn find_in<'a, S: AsRef<str>>(
        &'a self,
        language_codes: &[S],
        kinds: &[&'a [Transcript]],
    ) -> Result<&'a Transcript, TranscriptError> {
        for code in language_codes {
            for transcripts in kinds {
                if let Some(found) = transcripts
                    .iter()
                    .find(|t| t.language_code == code.as_ref())
                {
                    return Ok(found);
                }
            }
        }

        Err(TranscriptError::NoTranscriptFound {
            video_id: self.video_id.clone(),
            requested: language_codes
                .iter()
                .map(|code| code.as_ref().to_string())
                .collect(),
        })
    }
}

/// Scrapes caption tracks through the watch page and the innertube player API.
pub struct YouTubeTranscriptApi {
    client: Client,
    cookies: Arc<Jar>,
}

impl YouTubeTranscriptApi {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language)
                .context("Invalid accept_language in config")?,
        );

        let cookies = Arc::new(Jar::default());
        let client = Client::builder()
            .default_headers(headers)
            .cookie_provider(cookies.clone())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, cookies })
    }

    async fn fetch_video_html(&self, video_id: &str) -> Result<String, TranscriptError> {
        let html = self.fetch_html(video_id).await?;
        if !html.contains(CONSENT_ACTION) {
            return Ok(html);
        }

        self.create_consent_cookie(&html)?;
        let html = self.fetch_html(video_id).await?;
        if html.contains(CONSENT_ACTION) {
            return Err(TranscriptError::ConsentCookie);
        }
        Ok(html)
    }

    async fn fetch_html(&self, video_id: &str) -> Result<String, TranscriptError> {
        let url = format!("{}{}", WATCH_URL, video_id);
        debug!(url = %url, "fetching watch page");
        let response = check_status(self.client.get(&url).send().await?)?;
        Ok(response.text().await?)
    }

    fn create_consent_cookie(&self, html: &str) -> Result<(), TranscriptError> {
        let value = CONSENT_VALUE_RE
            .captures(html)
            .and_then(|caps| caps.get(1))
            .ok_or(TranscriptError::ConsentCookie)?;
        let url: Url = YOUTUBE_URL
            .parse()
            .map_err(|_| TranscriptError::ConsentCookie)?;

        debug!("accepting cookie consent");
        self.cookies.add_cookie_str(
            &format!("CONSENT=YES+{}; Domain=.youtube.com", value.as_str()),
            &url,
        );
        Ok(())
    }

    async fn fetch_innertube_data(
        &self,
        video_id: &str,
        api_key: &str,
    ) -> Result<Value, TranscriptError> {
        debug!(video_id, "requesting innertube player data");
        let response = self
            .client
            .post(format!("{}{}", INNERTUBE_API_URL, api_key))
            .json(&json!({
                "context": {
                    "client": {
                        "clientName": "ANDROID",
                        "clientVersion": "20.10.38"
                    }
                },
                "videoId": video_id
            }))
            .send()
            .await?;

        Ok(check_status(response)?.json().await?)
    }
}

#[async_trait]
impl TranscriptSource for YouTubeTranscriptApi {
    async fn list(&self, video_id: &str) -> Result<TranscriptList, TranscriptError> {
        let html = self.fetch_video_html(video_id).await?;
        let api_key = extract_api_key(&html, video_id)?;
        let data = self.fetch_innertube_data(video_id, &api_key).await?;
        parse_player_response(video_id, &data)
    }

    async fn fetch(&self, transcript: &Transcript) -> Result<Vec<FetchedSnippet>, TranscriptError> {
        if transcript.url.contains("&exp=xpe") {
            return Err(TranscriptError::PoTokenRequired);
        }

        debug!(
            video_id = %transcript.video_id,
            language_code = %transcript.language_code,
            "fetching timedtext"
        );
        let response = check_status(self.client.get(&transcript.url).send().await?)?;
        let raw = response.text().await?;
        Ok(parse_timedtext(&raw))
    }
}

fn check_status(response: Response) -> Result<Response, TranscriptError> {
    if response.status() == StatusCode::TOO_MANY_REQUESTS {
        return Err(TranscriptError::RequestBlocked);
    }
    Ok(response.error_for_status()?)
}

fn extract_api_key(html: &str, video_id: &str) -> Result<String, TranscriptError> {
    if let Some(caps) = API_KEY_RE.captures(html) {
        return Ok(caps[1].to_string());
    }
    if html.contains(RECAPTCHA_MARKER) {
        return Err(TranscriptError::RequestBlocked);
    }
    Err(TranscriptError::UnexpectedResponse(format!(
        "no innertube API key on the watch page of {}",
        video_id
    )))
}

fn parse_player_response(video_id: &str, data: &Value) -> Result<TranscriptList, TranscriptError> {
    assert_playability(video_id, &data["playabilityStatus"])?;

    let renderer = &data["captions"]["playerCaptionsTracklistRenderer"];
    let Some(tracks) = renderer["captionTracks"].as_array() else {
        return Err(TranscriptError::TranscriptsDisabled {
            video_id: video_id.to_string(),
        });
    };

    let translation_languages: Vec<TranslationLanguage> = renderer["translationLanguages"]
        .as_array()
        .map(|languages| {
            languages
                .iter()
                .filter_map(|lang| {
                    Some(TranslationLanguage {
                        language: run_text(&lang["languageName"]),
                        language_code: lang["languageCode"].as_str()?.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    let transcripts = tracks
        .iter()
        .filter_map(|track| {
            let base_url = track["baseUrl"].as_str()?;
            let language_code = track["languageCode"].as_str()?;
            let translatable = track["isTranslatable"].as_bool().unwrap_or(false);

            Some(Transcript {
                video_id: video_id.to_string(),
                url: base_url.replace("&fmt=srv3", ""),
                language: run_text(&track["name"]),
                language_code: language_code.to_string(),
                is_generated: track["kind"].as_str() == Some("asr"),
                translation_languages: if translatable {
                    translation_languages.clone()
                } else {
                    Vec::new()
                },
            })
        })
        .collect();

    Ok(TranscriptList::new(video_id, transcripts))
}

fn assert_playability(video_id: &str, status_info: &Value) -> Result<(), TranscriptError> {
    let status = match status_info["status"].as_str() {
        None | Some("OK") => return Ok(()),
        Some(status) => status,
    };
    let reason = status_info["reason"].as_str().unwrap_or_default();

    if status == "LOGIN_REQUIRED" {
        if reason.contains("not a bot") {
            return Err(TranscriptError::RequestBlocked);
        }
        if reason.contains("inappropriate for some users") {
            return Err(TranscriptError::AgeRestricted);
        }
    }

    if status == "ERROR" && reason == UNAVAILABLE_REASON {
        if looks_like_url(video_id) {
            return Err(TranscriptError::InvalidVideoId(video_id.to_string()));
        }
        return Err(TranscriptError::VideoUnavailable {
            video_id: video_id.to_string(),
        });
    }

    Err(TranscriptError::VideoUnplayable {
        reason: if reason.is_empty() {
            status.to_string()
        } else {
            reason.to_string()
        },
    })
}

// Innertube labels are either `{"runs": [{"text": ..}]}` or `{"simpleText": ..}`.
fn run_text(label: &Value) -> String {
    label["runs"][0]["text"]
        .as_str()
        .or_else(|| label["simpleText"].as_str())
        .unwrap_or_default()
        .to_string()
}

/// Parse a timedtext XML document. Elements without text are skipped.
pub fn parse_timedtext(raw: &str) -> Vec<FetchedSnippet> {
    TEXT_ELEMENT_RE
        .captures_iter(raw)
        .filter_map(|caps| {
            let body = caps.get(2)?.as_str();
            if body.is_empty() {
                return None;
            }

            let attributes: HashMap<&str, &str> = ATTRIBUTE_RE
                .captures_iter(caps.get(1).map_or("", |m| m.as_str()))
                .filter_map(|attr| Some((attr.get(1)?.as_str(), attr.get(2)?.as_str())))
                .collect();
            let seconds = |name: &str| {
                attributes
                    .get(name)
                    .and_then(|value| value.parse::<f64>().ok())
                    .unwrap_or(0.0)
            };

            // The XML layer and the caption text are each entity-encoded.
            let text = strip_tags(&unescape_html(&unescape_html(body)));

            Some(FetchedSnippet {
                text,
                start: seconds("start"),
                duration: seconds("dur"),
            })
        })
        .collect()
}
