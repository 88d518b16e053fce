//! ytcaptions - A Rust CLI tool for fetching YouTube caption tracks
//!
//! This library resolves a video reference, picks the best caption track for a
//! language preference list, downloads its timed text and renders it as plain or
//! timestamped text, optionally restricted to a time window.

pub mod cli;
pub mod config;
pub mod extractors;
pub mod output;
pub mod selection;
pub mod timing;
pub mod transcribe;

pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
pub use extractors::{CaptionSource, CaptionTrack, Snippet};
pub use selection::SelectionRequest;
pub use transcribe::{Transcript, TranscriptPipeline};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, TranscriptError>;

/// Error types specific to transcript retrieval
#[derive(thiserror::Error, Debug)]
pub enum TranscriptError {
    #[error("Invalid time format: {0:?} (expected MM:SS or HH:MM:SS)")]
    InvalidTimeFormat(String),

    #[error("Invalid range format: {0:?} (expected START-END)")]
    InvalidRangeFormat(String),

    #[error("Invalid range order: start {start}s is after end {end}s")]
    InvalidRangeOrder { start: u64, end: u64 },

    #[error("Unrecognized video reference: {0}")]
    UnrecognizedVideoReference(String),

    #[error("Failed to fetch video page: {0}")]
    PageFetchFailed(String),

    #[error("Request blocked by YouTube (rate limited or CAPTCHA required), try again later")]
    RequestBlocked,

    #[error("Could not find an API key in the video page")]
    ApiKeyNotFound,

    #[error("Player API request failed: {0}")]
    ApiRequestFailed(String),

    #[error("Video is age restricted")]
    AgeRestricted,

    #[error("Video is unavailable")]
    VideoUnavailable,

    #[error("Video is unplayable: {0}")]
    VideoUnplayable(String),

    #[error("Captions are disabled for this video")]
    CaptionsDisabled,

    #[error("Failed to fetch transcript: {0}")]
    TranscriptFetchFailed(String),

    #[error("--only cannot be combined with --from/--to")]
    ConflictingSelection,

    #[error("Time selection flags require --timestamps")]
    TimestampsRequired,

    #[error("Malformed transcript payload: {0}")]
    MalformedTranscript(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
