use serde::Serialize;

use crate::extractors::{resolve_video_id, select_track, CaptionSource, CaptionTrack, Snippet, VideoId};
use crate::selection::{filter_snippets, SelectionRequest};
use crate::{Result, TranscriptError};

/// A fetched (and possibly filtered) transcript
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    pub video_id: String,

    /// Track the snippets were read from
    pub track: CaptionTrack,

    /// Snippets in platform order
    pub snippets: Vec<Snippet>,
}

/// Sequential transcript pipeline: resolve, list, select, fetch, filter
pub struct TranscriptPipeline<S: CaptionSource> {
    source: S,
}

impl<S: CaptionSource> TranscriptPipeline<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// List the caption tracks available for a video reference
    pub async fn list_tracks(&self, reference: &str) -> Result<(VideoId, Vec<CaptionTrack>)> {
        let video_id = resolve_video_id(reference)?;
        tracing::info!("Resolved video id: {}", video_id);

        let tracks = self.source.list_tracks(&video_id).await?;
        Ok((video_id, tracks))
    }

    /// Fetch the best matching transcript and apply the selection to it
    pub async fn fetch_transcript<L: AsRef<str>>(
        &self,
        reference: &str,
        languages: &[L],
        request: &SelectionRequest,
    ) -> Result<Transcript> {
        request.validate()?;

        let (video_id, tracks) = self.list_tracks(reference).await?;

        let track = select_track(&tracks, languages)
            .cloned()
            .ok_or(TranscriptError::CaptionsDisabled)?;
        tracing::info!(
            "Selected {} track: {} ({})",
            if track.is_generated { "generated" } else { "manual" },
            track.language_code,
            track.label()
        );

        let snippets = self.source.fetch_snippets(&track).await?;
        tracing::info!("Fetched {} snippets", snippets.len());

        let snippets = if request.is_empty() {
            snippets
        } else {
            let filtered = filter_snippets(&snippets, request)?;
            tracing::info!("Kept {} of {} snippets after selection", filtered.len(), snippets.len());
            filtered
        };

        Ok(Transcript {
            video_id: video_id.to_string(),
            track,
            snippets,
        })
    }
}
