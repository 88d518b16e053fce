use serde::Serialize;

use crate::extractors::Snippet;
use crate::timing::format_timestamp;
use crate::transcribe::Transcript;

/// JSON shape of a transcript
#[derive(Debug, Serialize)]
struct JsonTranscript<'a> {
    video_id: &'a str,
    language_code: &'a str,
    language: &'a str,
    is_generated: bool,
    snippets: &'a [Snippet],
}

/// One line per snippet, optionally prefixed with `[MM:SS]` / `[HH:MM:SS]`
pub fn format_as_text(snippets: &[Snippet], include_timestamps: bool) -> String {
    snippets
        .iter()
        .map(|snippet| {
            if include_timestamps {
                format!("[{}] {}", format_timestamp(snippet.start), snippet.text)
            } else {
                snippet.text.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_as_json(transcript: &Transcript) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonTranscript {
        video_id: &transcript.video_id,
        language_code: &transcript.track.language_code,
        language: transcript.track.label(),
        is_generated: transcript.track.is_generated,
        snippets: &transcript.snippets,
    })
}
