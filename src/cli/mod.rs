use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::selection::SelectionRequest;
use crate::timing::{parse_exclude_range, parse_time, ExcludeRange, TimeSeconds};

#[derive(Parser)]
#[command(
    name = "ytcaptions",
    about = "Fetch YouTube caption tracks as plain or timestamped text",
    version,
    long_about = "A CLI tool for downloading the captions of a YouTube video. Picks the best track for your language preferences and can restrict the transcript to a time window, specific start times, or with ranges cut out."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the transcript of a video
    Fetch {
        /// Video URL (watch, youtu.be, embed or shorts) or 11-character video id
        #[arg(value_name = "VIDEO")]
        video: String,

        /// Preferred caption languages, most preferred first (defaults from config)
        #[arg(short, long, value_name = "LANG", num_args = 1.., env = "YTCAPTIONS_LANGUAGES", value_delimiter = ',')]
        languages: Vec<String>,

        /// Prefix every line with its start time
        #[arg(short, long)]
        timestamps: bool,

        /// Keep snippets starting at or after this time (MM:SS or HH:MM:SS)
        #[arg(long, value_name = "TIME", value_parser = parse_time)]
        from: Option<TimeSeconds>,

        /// Keep snippets starting at or before this time (MM:SS or HH:MM:SS)
        #[arg(long, value_name = "TIME", value_parser = parse_time)]
        to: Option<TimeSeconds>,

        /// Keep only snippets starting at these times, rounded to the second
        #[arg(long, value_name = "TIME", num_args = 1.., value_parser = parse_time)]
        only: Vec<TimeSeconds>,

        /// Drop snippets starting inside these START-END ranges (inclusive)
        #[arg(long, value_name = "RANGE", num_args = 1.., value_parser = parse_exclude_range)]
        exclude: Vec<ExcludeRange>,

        /// Output format (defaults from config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file path (prints to console if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List the caption tracks available for a video
    List {
        /// Video URL or 11-character video id
        #[arg(value_name = "VIDEO")]
        video: String,
    },

    /// Write the default configuration file, or show the current one
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,
    },
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum OutputFormat {
    /// Plain text, one snippet per line
    Text,
    /// JSON with start times and durations
    Json,
}

impl OutputFormat {
    /// Whether start times end up in the output
    pub fn shows_timestamps(&self, timestamps_flag: bool) -> bool {
        match self {
            OutputFormat::Text => timestamps_flag,
            OutputFormat::Json => true,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Build and validate the selection for a `fetch` invocation
pub fn selection_request(
    from: Option<TimeSeconds>,
    to: Option<TimeSeconds>,
    only: &[TimeSeconds],
    exclude: &[ExcludeRange],
    format: &OutputFormat,
    timestamps: bool,
) -> crate::Result<SelectionRequest> {
    let request = SelectionRequest::new(from, to, only.iter().copied(), exclude.to_vec())?;
    request.check_timestamps(format.shows_timestamps(timestamps))?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TranscriptError;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ytcaptions").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_fetch_flags() {
        let cli = parse(&[
            "fetch", "dQw4w9WgXcQ", "-t", "--from", "0:30", "--to", "1:00:00",
            "--exclude", "0:40-0:45", "0:50-0:55", "-l", "de", "en",
        ]);

        match cli.command {
            Commands::Fetch { video, languages, timestamps, from, to, exclude, only, .. } => {
                assert_eq!(video, "dQw4w9WgXcQ");
                assert_eq!(languages, vec!["de", "en"]);
                assert!(timestamps);
                assert_eq!(from, Some(30));
                assert_eq!(to, Some(3600));
                assert!(only.is_empty());
                assert_eq!(
                    exclude,
                    vec![ExcludeRange { low: 40, high: 45 }, ExcludeRange { low: 50, high: 55 }]
                );
            }
            _ => panic!("expected fetch"),
        }
    }

    #[test]
    fn test_bad_time_is_rejected_by_parser() {
        let result = Cli::try_parse_from(["ytcaptions", "fetch", "dQw4w9WgXcQ", "--from", "1:75"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_selection_request_rules() {
        assert!(matches!(
            selection_request(Some(1), None, &[5], &[], &OutputFormat::Text, true),
            Err(TranscriptError::ConflictingSelection)
        ));
        assert!(matches!(
            selection_request(Some(1), None, &[], &[], &OutputFormat::Text, false),
            Err(TranscriptError::TimestampsRequired)
        ));
        assert!(selection_request(Some(1), None, &[], &[], &OutputFormat::Json, false).is_ok());
        assert!(selection_request(None, None, &[], &[], &OutputFormat::Text, false).is_ok());
    }
}
