use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ytcaptions::cli::{self, Cli, Commands, OutputFormat};
use ytcaptions::extractors::YoutubeClient;
use ytcaptions::{output, Config, TranscriptPipeline};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr, stdout is reserved for the transcript
    let default_filter = if cli.verbose {
        "ytcaptions=debug"
    } else {
        "ytcaptions=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load()?;

    match cli.command {
        Commands::Fetch {
            video,
            languages,
            timestamps,
            from,
            to,
            only,
            exclude,
            format,
            output,
        } => {
            let format = match format {
                Some(format) => format,
                None => OutputFormat::from_str(&config.app.default_output_format, true)
                    .map_err(|e| anyhow::anyhow!("Invalid default output format: {}", e))?,
            };

            // Validate the selection before touching the network
            let request = cli::selection_request(from, to, &only, &exclude, &format, timestamps)?;

            let languages = if languages.is_empty() {
                config.app.default_languages.clone()
            } else {
                languages
            };

            let pipeline = TranscriptPipeline::new(YoutubeClient::new(config.youtube.clone())?);

            tracing::info!("Fetching transcript for: {}", video);
            let progress = spinner(cli.quiet, "Fetching transcript...")?;
            let transcript = pipeline
                .fetch_transcript(&video, languages.as_slice(), &request)
                .await;
            progress.finish_and_clear();
            let transcript = transcript?;

            match output {
                Some(path) => {
                    output::save_to_file(&transcript, &path, &format, timestamps)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    eprintln!("Transcript saved to: {}", path.display());
                }
                None => {
                    output::print_to_console(&transcript, &format, timestamps)?;
                }
            }
        }
        Commands::List { video } => {
            let pipeline = TranscriptPipeline::new(YoutubeClient::new(config.youtube.clone())?);

            let progress = spinner(cli.quiet, "Fetching caption tracks...")?;
            let listing = pipeline.list_tracks(&video).await;
            progress.finish_and_clear();
            let (video_id, tracks) = listing?;

            println!("Caption tracks for {}:", video_id);
            for track in tracks {
                println!(
                    "  • {:<8} {} [{}]",
                    track.language_code,
                    track.label(),
                    if track.is_generated { "generated" } else { "manual" }
                );
            }
        }
        Commands::Config { show } => {
            if show {
                config.display();
            } else {
                let path = config.save()?;
                println!("Configuration written to: {}", path.display());
            }
        }
    }

    Ok(())
}

/// Spinner on stderr while network stages run
fn spinner(quiet: bool, message: &'static str) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let progress = ProgressBar::new_spinner();
    progress.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    progress.set_message(message);
    progress.enable_steady_tick(Duration::from_millis(100));
    Ok(progress)
}
