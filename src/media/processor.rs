use async_trait::async_trait;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;
use tracing::{debug, info};

use super::{MediaCommandBuilder, MediaProcessorTrait};
use crate::command::{ensure_input_exists, ensure_parent_dir, CommandRunner};
use crate::config::MediaConfig;
use crate::error::{Result, TranscoderError};

/// FFmpeg-backed media processor.
pub struct FfmpegProcessor {
    command_builder: MediaCommandBuilder,
    runner: Arc<dyn CommandRunner>,
}

impl FfmpegProcessor {
    pub fn new(config: MediaConfig, runner: Arc<dyn CommandRunner>) -> Self {
        let command_builder = MediaCommandBuilder::new(&config.binary_path);

        Self {
            command_builder,
            runner,
        }
    }
}

#[async_trait]
impl MediaProcessorTrait for FfmpegProcessor {
    async fn extract_audio(&self, input: &Path, output: &Path) -> Result<()> {
        info!(
            "Extracting audio from {} to {}",
            input.display(),
            output.display()
        );

        ensure_input_exists(input)?;
        ensure_parent_dir(output)?;

        let command = self.command_builder.extract_audio(input, output);
        self.runner.run(&command).await?;

        info!("Audio extraction completed");
        Ok(())
    }

    async fn change_speed(&self, input: &Path, output: &Path, factor: f64) -> Result<()> {
        if factor <= 0.0 {
            return Err(TranscoderError::InvalidArgument(format!(
                "speed factor must be greater than 0, got {}",
                factor
            )));
        }

        info!(
            "Changing playback speed of {} by {}x -> {}",
            input.display(),
            factor,
            output.display()
        );

        ensure_input_exists(input)?;
        ensure_parent_dir(output)?;

        let command = self.command_builder.change_speed(input, output, factor);
        self.runner.run(&command).await?;

        info!("Speed change completed");
        Ok(())
    }

    fn check_availability(&self) -> Result<()> {
        let probe = self.command_builder.version_check();
        let output = Command::new(&probe.binary_path)
            .args(&probe.args)
            .output()
            .map_err(|e| TranscoderError::Tool(format!("Media processor not found: {}", e)))?;

        if output.status.success() {
            debug!("Media processor is available");
            Ok(())
        } else {
            Err(TranscoderError::Tool(
                "Media processor version check failed".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::MockCommandRunner;
    use tempfile::TempDir;

    fn processor_with(runner: MockCommandRunner) -> FfmpegProcessor {
        FfmpegProcessor::new(
            MediaConfig {
                binary_path: "ffmpeg".to_string(),
            },
            Arc::new(runner),
        )
    }

    #[tokio::test]
    async fn change_speed_rejects_non_positive_factor() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(0);
        let processor = processor_with(runner);

        for factor in [0.0, -1.0, -0.01] {
            let err = processor
                .change_speed(Path::new("in.mp4"), Path::new("out.mp4"), factor)
                .await
                .unwrap_err();
            assert!(matches!(err, TranscoderError::InvalidArgument(_)));
        }
    }

    #[tokio::test]
    async fn extract_audio_fails_before_side_effects_when_input_missing() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(0);
        let processor = processor_with(runner);

        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.mp4");
        let output = temp.path().join("nested").join("out.wav");

        let err = processor.extract_audio(&missing, &output).await.unwrap_err();

        assert!(matches!(err, TranscoderError::FileNotFound(_)));
        assert!(
            !output.parent().unwrap().exists(),
            "output directory must not be created for a missing input"
        );
    }

    #[tokio::test]
    async fn change_speed_fails_before_side_effects_when_input_missing() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(0);
        let processor = processor_with(runner);

        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.mp4");
        let output = temp.path().join("nested").join("out.mp4");

        let err = processor
            .change_speed(&missing, &output, 2.0)
            .await
            .unwrap_err();

        assert!(matches!(err, TranscoderError::FileNotFound(_)));
        assert!(!output.parent().unwrap().exists());
    }

    #[tokio::test]
    async fn extract_audio_invokes_fixed_template() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("clip.mp4");
        std::fs::write(&input, b"video").unwrap();
        let output = temp.path().join("clip.wav");

        let expected: Vec<String> = vec![
            "-i".into(),
            input.to_string_lossy().into_owned(),
            "-vn".into(),
            "-acodec".into(),
            "pcm_s16le".into(),
            "-ar".into(),
            "16000".into(),
            "-ac".into(),
            "1".into(),
            "-y".into(),
            output.to_string_lossy().into_owned(),
        ];

        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(move |command| command.args == expected)
            .times(1)
            .returning(|_| Ok(()));

        let processor = processor_with(runner);
        processor.extract_audio(&input, &output).await.unwrap();
    }

    #[tokio::test]
    async fn failed_tool_exit_propagates_as_tool_error() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("clip.mp4");
        std::fs::write(&input, b"video").unwrap();
        let output = temp.path().join("fast.mp4");

        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(1).returning(|command| {
            Err(TranscoderError::Tool(format!(
                "{} failed with exit status: 1",
                command.description
            )))
        });

        let processor = processor_with(runner);
        let err = processor.change_speed(&input, &output, 1.5).await.unwrap_err();

        match err {
            TranscoderError::Tool(message) => assert!(message.contains("Speed change")),
            other => panic!("expected tool error, got {:?}", other),
        }
    }
}
