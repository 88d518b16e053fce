//! Classification of the player API's `playabilityStatus` block.

use crate::{Result, TranscriptError};

const STATUS_OK: &str = "OK";
const STATUS_LOGIN_REQUIRED: &str = "LOGIN_REQUIRED";

const BOT_CHECK_MARKER: &str = "not a bot";
const AGE_RESTRICTED_MARKER: &str = "inappropriate";
const UNAVAILABLE_MARKER: &str = "unavailable";

/// Map a playability status and its reason text onto an outcome.
///
/// A missing status or `OK` means the video is playable.
pub fn classify_playability(status: Option<&str>, reason: Option<&str>) -> Result<()> {
    let status = match status {
        None | Some(STATUS_OK) => return Ok(()),
        Some(status) => status,
    };
    let reason = reason.unwrap_or_default();

    if status == STATUS_LOGIN_REQUIRED && reason.contains(BOT_CHECK_MARKER) {
        return Err(TranscriptError::RequestBlocked);
    }
    if reason.contains(AGE_RESTRICTED_MARKER) {
        return Err(TranscriptError::AgeRestricted);
    }
    if reason.contains(UNAVAILABLE_MARKER) {
        return Err(TranscriptError::VideoUnavailable);
    }

    Err(TranscriptError::VideoUnplayable(reason.to_string()))
}
