// Transcription seam.
//
// - language: closed set of codes the tool accepts for translation targets
// - whisper_cli: whisper-cli-backed implementation behind the trait

pub mod language;
pub mod whisper_cli;

use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

pub use whisper_cli::WhisperCliTranscriber;

use crate::command::CommandRunner;
use crate::config::TranscriberConfig;
use crate::error::Result;

/// Main trait for transcription operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriberTrait: Send + Sync {
    /// Transcribe audio into an SRT subtitle file
    async fn transcribe(&self, input: &Path, output: &Path) -> Result<()>;

    /// Transcribe audio and translate the result into the target language
    async fn transcribe_with_translation(
        &self,
        input: &Path,
        output: &Path,
        target_lang: &str,
    ) -> Result<()>;
}

impl fmt::Debug for dyn TranscriberTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn TranscriberTrait")
    }
}

/// Factory for transcriber instances
pub struct TranscriberFactory;

impl TranscriberFactory {
    /// Create the default transcriber implementation (whisper-cli-based).
    /// Fails when the configured model file does not exist.
    pub fn create_transcriber(
        config: TranscriberConfig,
        runner: Arc<dyn CommandRunner>,
    ) -> Result<Box<dyn TranscriberTrait>> {
        Ok(Box::new(WhisperCliTranscriber::new(config, runner)?))
    }
}
