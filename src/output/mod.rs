use anyhow::Result;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::transcribe::Transcript;

pub mod formatters;

pub use formatters::*;

/// Render a transcript in the requested format
pub fn render(transcript: &Transcript, format: &OutputFormat, include_timestamps: bool) -> Result<String> {
    let content = match format {
        OutputFormat::Text => format_as_text(&transcript.snippets, include_timestamps),
        OutputFormat::Json => format_as_json(transcript)?,
    };
    Ok(content)
}

/// Save transcript to file
pub fn save_to_file(
    transcript: &Transcript,
    path: &Path,
    format: &OutputFormat,
    include_timestamps: bool,
) -> Result<()> {
    let mut content = render(transcript, format, include_timestamps)?;
    if !content.is_empty() {
        content.push('\n');
    }

    fs_err::write(path, content)?;
    Ok(())
}

/// Print transcript to console
pub fn print_to_console(
    transcript: &Transcript,
    format: &OutputFormat,
    include_timestamps: bool,
) -> Result<()> {
    let content = render(transcript, format, include_timestamps)?;
    if !content.is_empty() {
        println!("{}", content);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::{CaptionTrack, Snippet};

    #[test]
    fn test_save_to_file_appends_newline() {
        let transcript = Transcript {
            video_id: "dQw4w9WgXcQ".to_string(),
            track: CaptionTrack {
                base_url: "https://example.com".to_string(),
                language_code: "en".to_string(),
                is_generated: false,
                display_name: None,
            },
            snippets: vec![
                Snippet { text: "a".to_string(), start: 1.0, duration: 1.0 },
                Snippet { text: "b".to_string(), start: 2.0, duration: 1.0 },
            ],
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        save_to_file(&transcript, &path, &OutputFormat::Text, true).unwrap();

        assert_eq!(fs_err::read_to_string(&path).unwrap(), "[00:01] a\n[00:02] b\n");
    }
}
