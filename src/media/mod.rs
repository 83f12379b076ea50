// Media processing seam.
//
// - commands: fixed ffmpeg argument templates
// - processor: ffmpeg-backed implementation behind the trait

pub mod commands;
pub mod processor;

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

pub use commands::MediaCommandBuilder;
pub use processor::FfmpegProcessor;

use crate::command::CommandRunner;
use crate::config::MediaConfig;
use crate::error::Result;

/// Main trait for media processing operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaProcessorTrait: Send + Sync {
    /// Extract the audio track as mono 16 kHz 16-bit PCM
    async fn extract_audio(&self, input: &Path, output: &Path) -> Result<()>;

    /// Re-time the video stream by the given playback factor
    async fn change_speed(&self, input: &Path, output: &Path, factor: f64) -> Result<()>;

    /// Check the transcoding tool is reachable
    fn check_availability(&self) -> Result<()>;
}

/// Factory for media processor instances
pub struct MediaProcessorFactory;

impl MediaProcessorFactory {
    /// Create the default media processor implementation (FFmpeg-based)
    pub fn create_processor(
        config: MediaConfig,
        runner: Arc<dyn CommandRunner>,
    ) -> Box<dyn MediaProcessorTrait> {
        Box::new(FfmpegProcessor::new(config, runner))
    }
}
