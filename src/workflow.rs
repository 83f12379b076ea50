use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::{Builder, TempPath};
use tracing::info;

use crate::command::{ensure_input_exists, ensure_parent_dir, CommandRunner, SystemCommandRunner};
use crate::config::Config;
use crate::error::{Result, TranscoderError};
use crate::media::{MediaProcessorFactory, MediaProcessorTrait};
use crate::transcribe::{TranscriberFactory, TranscriberTrait};

/// Composes the transcoding and transcription processors into the
/// translate-audio, translate-video, and process-video pipelines.
///
/// Each pipeline is a fixed sequence of blocking external calls; the first
/// failing stage aborts the run. The staged intermediate audio file is owned
/// here and removed when the pipeline exits, whether or not it succeeded.
pub struct Workflow {
    media: Box<dyn MediaProcessorTrait>,
    transcriber: Box<dyn TranscriberTrait>,
}

impl Workflow {
    /// Wire both processors to the system process runner, using the binary
    /// paths the configuration supplies. Fails when the transcriber model is
    /// missing or the transcoding tool does not respond.
    pub fn new(config: Config) -> Result<Self> {
        let runner: Arc<dyn CommandRunner> = Arc::new(SystemCommandRunner);
        let media = MediaProcessorFactory::create_processor(config.media, runner.clone());
        let transcriber = TranscriberFactory::create_transcriber(config.transcriber, runner)?;

        media.check_availability()?;

        Ok(Self { media, transcriber })
    }

    /// Assemble a workflow from preexisting components. Lets tests swap in
    /// fakes without touching the execution environment.
    pub fn with_components(
        media: Box<dyn MediaProcessorTrait>,
        transcriber: Box<dyn TranscriberTrait>,
    ) -> Self {
        Self { media, transcriber }
    }

    /// Translate an audio file into subtitles, staging a WAV conversion first
    /// when the input is not already one.
    pub async fn translate_audio(
        &self,
        input: &Path,
        output: &Path,
        target_lang: &str,
    ) -> Result<()> {
        self.validate_request(input, target_lang)?;
        ensure_parent_dir(output)?;

        info!(
            "Translating audio {} -> {}",
            input.display(),
            output.display()
        );

        if is_wav(input) {
            return self
                .transcriber
                .transcribe_with_translation(input, output, target_lang)
                .await;
        }

        let staged = self.stage_audio(input, output).await?;
        self.transcriber
            .transcribe_with_translation(&staged, output, target_lang)
            .await
        // `staged` drops here, removing the intermediate file on success and
        // failure alike.
    }

    /// Extract a video's audio track and translate it into subtitles.
    pub async fn translate_video(
        &self,
        input: &Path,
        output: &Path,
        target_lang: &str,
    ) -> Result<()> {
        self.validate_request(input, target_lang)?;
        ensure_parent_dir(output)?;

        info!(
            "Translating video {} -> {}",
            input.display(),
            output.display()
        );

        let staged = self.stage_audio(input, output).await?;
        self.transcriber
            .transcribe_with_translation(&staged, output, target_lang)
            .await
    }

    /// Full video pipeline: translated subtitles next to the output, then a
    /// speed-changed copy of the original video at the output path itself.
    /// The speed change reads the original input, not the audio pipeline's
    /// product.
    pub async fn process_video(
        &self,
        input: &Path,
        output: &Path,
        target_lang: &str,
        speed: f64,
    ) -> Result<()> {
        if speed <= 0.0 {
            return Err(TranscoderError::InvalidArgument(format!(
                "speed factor must be greater than 0, got {}",
                speed
            )));
        }

        let subtitle_path = output.with_extension("srt");
        self.translate_video(input, &subtitle_path, target_lang).await?;
        self.media.change_speed(input, output, speed).await?;

        Ok(())
    }

    fn validate_request(&self, input: &Path, target_lang: &str) -> Result<()> {
        if target_lang.is_empty() {
            return Err(TranscoderError::InvalidArgument(
                "target language is required".to_string(),
            ));
        }
        ensure_input_exists(input)
    }

    /// Extract the input's audio into a scoped temporary WAV in the output's
    /// directory. The file disappears when the returned handle drops; removal
    /// problems are ignored.
    async fn stage_audio(&self, input: &Path, output: &Path) -> Result<TempPath> {
        let staged = Builder::new()
            .prefix("staged-audio-")
            .suffix(".wav")
            .tempfile_in(staging_dir(output))?
            .into_temp_path();

        self.media.extract_audio(input, &staged).await?;
        Ok(staged)
    }
}

fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("wav"))
        .unwrap_or(false)
}

fn staging_dir(output: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
