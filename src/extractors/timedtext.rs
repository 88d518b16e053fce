//! Parser for the `<transcript><text start=".." dur="..">..</text></transcript>`
//! timed-text payload.

use once_cell::sync::Lazy;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;

use super::Snippet;
use crate::{Result, TranscriptError};

static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

struct PendingSnippet {
    start: f64,
    duration: f64,
    text: String,
}

/// Parse a timed-text document into snippets, in document order.
///
/// Elements whose text is empty once unescaped and stripped of tags are dropped.
pub fn parse_timed_text(xml: &str) -> Result<Vec<Snippet>> {
    let mut reader = Reader::from_str(xml);
    let mut snippets = Vec::new();
    let mut pending: Option<PendingSnippet> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"text" => {
                let (start, duration) = timing_attributes(&e)?;
                pending = Some(PendingSnippet {
                    start,
                    duration,
                    text: String::new(),
                });
            }
            Ok(Event::Empty(e)) if e.name().as_ref() == b"text" => {
                timing_attributes(&e)?;
            }
            Ok(Event::Text(e)) => {
                if let Some(p) = pending.as_mut() {
                    p.text.push_str(&normalize_text(&String::from_utf8_lossy(&e)));
                }
            }
            // CDATA is literal: no unescaping, no tag stripping
            Ok(Event::CData(e)) => {
                if let Some(p) = pending.as_mut() {
                    p.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"text" => {
                if let Some(p) = pending.take() {
                    let text = p.text.trim().to_string();
                    if !text.is_empty() {
                        snippets.push(Snippet {
                            text,
                            start: p.start,
                            duration: p.duration,
                        });
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(TranscriptError::MalformedTranscript(format!(
                    "error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    tracing::debug!("Parsed {} snippets from timed text", snippets.len());
    Ok(snippets)
}

/// Read `start` (required) and `dur` (defaults to 0) from a `<text>` element
fn timing_attributes(element: &BytesStart<'_>) -> Result<(f64, f64)> {
    let mut start = None;
    let mut duration = 0.0;

    for attr in element.attributes().flatten() {
        let value = String::from_utf8_lossy(&attr.value);
        match attr.key.as_ref() {
            b"start" => start = value.trim().parse::<f64>().ok(),
            b"dur" => duration = value.trim().parse::<f64>().unwrap_or(0.0),
            _ => {}
        }
    }

    let start = start.ok_or_else(|| {
        TranscriptError::MalformedTranscript("text element without a numeric start".to_string())
    })?;

    Ok((start, duration))
}

/// Unescape the XML layer, then the HTML entities inside it, and strip any tags
fn normalize_text(raw: &str) -> String {
    let xml_unescaped = html_escape::decode_html_entities(raw);
    let unescaped = html_escape::decode_html_entities(&xml_unescaped);

    MARKUP_TAG.replace_all(&unescaped, "").into_owned()
}
