use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::ACCEPT_LANGUAGE;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::playability::classify_playability;
use super::timedtext::parse_timed_text;
use super::{CaptionSource, CaptionTrack, Snippet, VideoId};
use crate::config::YoutubeConfig;
use crate::{Result, TranscriptError};

static API_KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).unwrap());

const RECAPTCHA_MARKER: &str = r#"class="g-recaptcha""#;

/// Query parameter selecting the timed-text container format
const FORMAT_PARAM: &str = "fmt";

/// Player API response, reduced to the parts we read
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    playability_status: Option<PlayabilityStatus>,
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    status: Option<String>,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Captions {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<RawCaptionTrack>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCaptionTrack {
    base_url: String,
    language_code: String,
    kind: Option<String>,
    name: Option<TrackName>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackName {
    simple_text: Option<String>,
    #[serde(default)]
    runs: Vec<TextRun>,
}

#[derive(Debug, Deserialize)]
struct TextRun {
    text: String,
}

impl From<RawCaptionTrack> for CaptionTrack {
    fn from(raw: RawCaptionTrack) -> Self {
        let display_name = raw.name.and_then(|name| {
            name.simple_text
                .or_else(|| name.runs.into_iter().next().map(|run| run.text))
        });

        Self {
            base_url: raw.base_url,
            language_code: raw.language_code,
            is_generated: raw.kind.as_deref() == Some("asr"),
            display_name,
        }
    }
}

/// Caption source backed by YouTube's watch page and player API
pub struct YoutubeClient {
    client: Client,
    config: YoutubeConfig,
}

impl YoutubeClient {
    pub fn new(config: YoutubeConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Fetch the watch page and pull the player API key out of it
    pub async fn fetch_page_credential(&self, video_id: &VideoId) -> Result<String> {
        let url = self.config.watch_url.replace("{video_id}", video_id.as_str());
        tracing::debug!("Fetching watch page: {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT_LANGUAGE, self.config.accept_language.as_str())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TranscriptError::PageFetchFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let html = response.text().await?;
        extract_api_key(&html)
    }

    /// Ask the player API for the video's caption tracks
    pub async fn fetch_caption_tracks(
        &self,
        video_id: &VideoId,
        api_key: &str,
    ) -> Result<Vec<CaptionTrack>> {
        let url = self.config.player_api_url.replace("{api_key}", api_key);

        let payload = serde_json::json!({
            "context": {
                "client": {
                    "clientName": self.config.client_name,
                    "clientVersion": self.config.client_version,
                }
            },
            "videoId": video_id.as_str(),
        });

        let response = self.client.post(&url).json(&payload).send().await?;

        if !response.status().is_success() {
            return Err(TranscriptError::ApiRequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let player: PlayerResponse = serde_json::from_str(&body).map_err(|e| {
            TranscriptError::ApiRequestFailed(format!("unexpected player response: {}", e))
        })?;

        tracks_from_player_response(player)
    }

    /// Download one track's timed text and parse it
    pub async fn fetch_track_snippets(&self, track: &CaptionTrack) -> Result<Vec<Snippet>> {
        let url = timed_text_url(&track.base_url)?;
        tracing::debug!("Fetching timed text: {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(TranscriptError::TranscriptFetchFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let xml = response.text().await?;
        parse_timed_text(&xml)
    }
}

#[async_trait]
impl CaptionSource for YoutubeClient {
    async fn list_tracks(&self, video_id: &VideoId) -> Result<Vec<CaptionTrack>> {
        let api_key = self.fetch_page_credential(video_id).await?;
        tracing::debug!("Extracted player API key for {}", video_id);

        let tracks = self.fetch_caption_tracks(video_id, &api_key).await?;
        tracing::info!("Found {} caption tracks for {}", tracks.len(), video_id);

        Ok(tracks)
    }

    async fn fetch_snippets(&self, track: &CaptionTrack) -> Result<Vec<Snippet>> {
        self.fetch_track_snippets(track).await
    }
}

/// Find the API key in watch-page markup, telling a bot check apart from a
/// page that simply lacks one
pub fn extract_api_key(html: &str) -> Result<String> {
    let key = API_KEY_PATTERN
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string());

    match key {
        Some(key) => Ok(key),
        None if html.contains(RECAPTCHA_MARKER) => Err(TranscriptError::RequestBlocked),
        None => Err(TranscriptError::ApiKeyNotFound),
    }
}

fn tracks_from_player_response(player: PlayerResponse) -> Result<Vec<CaptionTrack>> {
    let (status, reason) = player
        .playability_status
        .map(|ps| (ps.status, ps.reason))
        .unwrap_or_default();
    classify_playability(status.as_deref(), reason.as_deref())?;

    let tracks: Vec<CaptionTrack> = player
        .captions
        .and_then(|captions| captions.renderer)
        .map(|renderer| renderer.caption_tracks)
        .unwrap_or_default()
        .into_iter()
        .map(CaptionTrack::from)
        .collect();

    if tracks.is_empty() {
        return Err(TranscriptError::CaptionsDisabled);
    }

    Ok(tracks)
}

/// Drop the format parameter so the endpoint serves its default XML payload
fn timed_text_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url).map_err(|e| {
        TranscriptError::TranscriptFetchFailed(format!("invalid track URL {}: {}", base_url, e))
    })?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != FORMAT_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }

    Ok(url)
}
