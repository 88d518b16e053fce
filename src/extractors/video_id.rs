use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::{Result, TranscriptError};

/// Recognized reference shapes, tried in this order
static VIDEO_ID_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Raw id
        r"^([A-Za-z0-9_-]{11})$",
        // youtube.com/watch?v=ID (v may follow other query parameters)
        r"youtube\.com/watch\?(?:[^#]*&)?v=([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)",
        // youtu.be/ID
        r"youtu\.be/([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)",
        // youtube.com/embed/ID
        r"youtube\.com/embed/([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)",
        r"youtube\.com/(?:shorts|live)/([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Canonical 11-character YouTube video id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve a raw id or a watch/short/embed URL into a video id
pub fn resolve_video_id(input: &str) -> Result<VideoId> {
    let input = input.trim();

    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(input))
        .and_then(|captures| captures.get(1))
        .map(|m| VideoId(m.as_str().to_string()))
        .ok_or_else(|| TranscriptError::UnrecognizedVideoReference(input.to_string()))
}
