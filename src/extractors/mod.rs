use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod playability;
pub mod timedtext;
pub mod video_id;
pub mod youtube;

pub use video_id::{resolve_video_id, VideoId};
pub use youtube::YoutubeClient;

use crate::Result;

/// One caption stream available for a video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionTrack {
    /// Location of the timed-text payload
    pub base_url: String,

    /// Language code (en, de, pt-BR, ...)
    pub language_code: String,

    /// True for automatic speech-recognition captions
    pub is_generated: bool,

    /// Human readable track name, if the platform sent one
    pub display_name: Option<String>,
}

impl CaptionTrack {
    /// Name to show for this track, falling back to the language code
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.language_code)
    }
}

/// One timed caption entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    pub text: String,

    /// Start time in seconds
    pub start: f64,

    /// Duration in seconds
    pub duration: f64,
}

/// Source of caption tracks and their timed text
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// List the caption tracks of a video, in platform order. Never empty.
    async fn list_tracks(&self, video_id: &VideoId) -> Result<Vec<CaptionTrack>>;

    /// Download and parse the timed text of one track
    async fn fetch_snippets(&self, track: &CaptionTrack) -> Result<Vec<Snippet>>;
}

/// Pick the best track for a language preference list.
///
/// Each preferred language is tried in order, manual tracks before generated
/// ones. When nothing matches, the first track in platform order is returned,
/// so a language mismatch never fails. Returns `None` only for an empty list.
pub fn select_track<'a, S: AsRef<str>>(
    tracks: &'a [CaptionTrack],
    preferred_languages: &[S],
) -> Option<&'a CaptionTrack> {
    let (manual, generated): (Vec<&CaptionTrack>, Vec<&CaptionTrack>) =
        tracks.iter().partition(|track| !track.is_generated);

    preferred_languages
        .iter()
        .map(AsRef::as_ref)
        .find_map(|lang| {
            manual
                .iter()
                .chain(generated.iter())
                .find(|track| track.language_code == lang)
                .copied()
        })
        .or_else(|| tracks.first())
}
