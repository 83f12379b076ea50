//! Transcoder - translated subtitles and speed-altered media
//!
//! Entry point: classifies the input file by extension, selects the matching
//! pipeline, and drives the external transcoding and transcription tools.

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use transcoder::cli::{classify_input, Args, InputKind};
use transcoder::config::Config;
use transcoder::error::TranscoderError;
use transcoder::workflow::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.verbose)?;

    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            if Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };

    if args.speed <= 0.0 {
        return Err(TranscoderError::InvalidArgument(
            "speed must be greater than 0".to_string(),
        )
        .into());
    }

    // Classify before any processor exists so an unsupported input fails
    // without touching the external tools.
    let kind = classify_input(&args.input).ok_or_else(|| {
        TranscoderError::UnsupportedFormat(format!(
            "unsupported file type: {}",
            args.input.display()
        ))
    })?;

    let workflow = Workflow::new(config)?;

    match kind {
        InputKind::Video => {
            info!("Processing video file: {}", args.input.display());
            workflow
                .process_video(&args.input, &args.output, &args.lang, args.speed)
                .await?;
        }
        InputKind::Audio => {
            info!("Translating audio file: {}", args.input.display());
            workflow
                .translate_audio(&args.input, &args.output, &args.lang)
                .await?;
        }
    }

    info!("Processing completed successfully");
    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = std::env::current_dir()?.join(".transcoder").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Daily rotation; the guard must outlive main, so leak it.
    let file_appender = rolling::daily(&log_dir, "transcoder.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);
    std::mem::forget(guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer().with_target(false);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
