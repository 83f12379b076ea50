use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Input audio or video file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file path (subtitles for audio inputs, processed video for video inputs)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Target language for translation
    #[arg(short, long, default_value = "")]
    pub lang: String,

    /// Speed factor applied to video inputs
    #[arg(short, long, default_value_t = 1.0)]
    pub speed: f64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Pipeline selected from the input file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Video,
    Audio,
}

const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "avi", "mkv", "mov"];
const AUDIO_EXTENSIONS: [&str; 4] = ["mp3", "wav", "ogg", "flac"];

/// Classify an input file by extension. `None` means no pipeline handles it.
pub fn classify_input(path: &Path) -> Option<InputKind> {
    let ext = path.extension()?.to_str()?.to_lowercase();

    if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Some(InputKind::Video)
    } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
        Some(InputKind::Audio)
    } else {
        None
    }
}
