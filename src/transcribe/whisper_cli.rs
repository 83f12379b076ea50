use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use super::{language, TranscriberTrait};
use crate::command::{ensure_input_exists, ensure_parent_dir, CommandRunner, ToolCommand};
use crate::config::TranscriberConfig;
use crate::error::{Result, TranscoderError};

/// whisper-cli-backed transcriber.
pub struct WhisperCliTranscriber {
    config: TranscriberConfig,
    runner: Arc<dyn CommandRunner>,
}

impl fmt::Debug for WhisperCliTranscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WhisperCliTranscriber").finish_non_exhaustive()
    }
}

impl WhisperCliTranscriber {
    /// Create a transcriber. The model file must exist up front; input and
    /// output paths are validated per operation.
    pub fn new(config: TranscriberConfig, runner: Arc<dyn CommandRunner>) -> Result<Self> {
        if !config.model_path.exists() {
            return Err(TranscoderError::FileNotFound(format!(
                "model file not found at {}",
                config.model_path.display()
            )));
        }

        debug!(
            "Transcriber ready: model {}, device {}, threads {}",
            config.model_path.display(),
            config.device,
            config.threads
        );

        Ok(Self { config, runner })
    }

    /// Build the fixed invocation. The tool appends its own `.srt` extension,
    /// so a trailing one is stripped from the output path first.
    fn build_command(
        &self,
        input: &Path,
        output: &Path,
        translate: bool,
        lang: Option<&str>,
    ) -> ToolCommand {
        let description = if translate {
            "Translated transcription"
        } else {
            "Transcription"
        };

        let mut command = ToolCommand::new(&self.config.binary_path, description)
            .arg("-m")
            .arg(self.config.model_path.to_string_lossy().to_string())
            .arg("-osrt");

        if translate {
            command = command.arg("-tr");
        }

        command = command.arg("-of").arg(strip_srt_suffix(output));

        if let Some(lang) = lang {
            command = command.arg("-l").arg(lang);
        }

        if self.config.threads > 0 {
            command = command.arg("-t").arg(self.config.threads.to_string());
        }

        command.arg("-f").arg(input.to_string_lossy().to_string())
    }
}

#[async_trait]
impl TranscriberTrait for WhisperCliTranscriber {
    async fn transcribe(&self, input: &Path, output: &Path) -> Result<()> {
        info!("Transcribing {} -> {}", input.display(), output.display());

        ensure_input_exists(input)?;
        ensure_parent_dir(output)?;

        // The configured language is only a hint; "auto" and empty both leave
        // detection to the tool.
        let lang = match self.config.language.as_str() {
            "" | "auto" => None,
            configured => Some(configured),
        };

        let command = self.build_command(input, output, false, lang);
        self.runner.run(&command).await?;

        info!("Transcription completed");
        Ok(())
    }

    async fn transcribe_with_translation(
        &self,
        input: &Path,
        output: &Path,
        target_lang: &str,
    ) -> Result<()> {
        info!(
            "Transcribing {} with translation to '{}' -> {}",
            input.display(),
            target_lang,
            output.display()
        );

        ensure_input_exists(input)?;

        // An empty code is a valid permissive default and "auto" defers to
        // the tool; anything else must be in the supported set.
        if !target_lang.is_empty() && target_lang != "auto" && !language::is_supported(target_lang)
        {
            return Err(TranscoderError::UnsupportedLanguage(target_lang.to_string()));
        }

        ensure_parent_dir(output)?;

        let lang = (!target_lang.is_empty()).then_some(target_lang);
        let command = self.build_command(input, output, true, lang);
        self.runner.run(&command).await?;

        info!("Translated transcription completed");
        Ok(())
    }
}

fn strip_srt_suffix(output: &Path) -> String {
    let raw = output.to_string_lossy();
    raw.strip_suffix(".srt").unwrap_or(&raw).to_string()
}
