use crate::{Result, TranscriptError};

/// Whole seconds, the unit of every user-facing time expression
pub type TimeSeconds = u64;

/// Inclusive `[low, high]` interval of seconds to drop from a transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExcludeRange {
    pub low: TimeSeconds,
    pub high: TimeSeconds,
}

impl ExcludeRange {
    /// Whether an (unrounded) snippet start falls inside this range
    pub fn contains(&self, start: f64) -> bool {
        self.low as f64 <= start && start <= self.high as f64
    }
}

/// Parse `MM:SS` or `HH:MM:SS` into seconds
pub fn parse_time(input: &str) -> Result<TimeSeconds> {
    let invalid = || TranscriptError::InvalidTimeFormat(input.to_string());

    let parts = input
        .trim()
        .split(':')
        .map(|part| parse_component(part).ok_or_else(invalid))
        .collect::<Result<Vec<_>>>()?;

    let (hours, minutes, seconds) = match parts.as_slice() {
        [m, s] => (0, *m, *s),
        [h, m, s] => (*h, *m, *s),
        _ => return Err(invalid()),
    };

    if minutes > 59 || seconds > 59 {
        return Err(invalid());
    }

    hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes * 60 + seconds))
        .ok_or_else(invalid)
}

// Digits only: `u64::from_str` would also accept a leading '+'.
fn parse_component(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Parse a `START-END` exclude range
pub fn parse_exclude_range(input: &str) -> Result<ExcludeRange> {
    let trimmed = input.trim();
    let last = trimmed.len().saturating_sub(1);

    let split_at = trimmed
        .char_indices()
        .find(|&(i, c)| c == '-' && i != 0 && i != last)
        .map(|(i, _)| i)
        .ok_or_else(|| TranscriptError::InvalidRangeFormat(input.to_string()))?;

    let low = parse_time(&trimmed[..split_at])?;
    let high = parse_time(&trimmed[split_at + 1..])?;

    if low > high {
        return Err(TranscriptError::InvalidRangeOrder {
            start: low,
            end: high,
        });
    }

    Ok(ExcludeRange { low, high })
}

/// Render seconds as `MM:SS`, or `HH:MM:SS` once there is a whole hour.
/// Fractional seconds are truncated.
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}
