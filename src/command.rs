// Shared subprocess plumbing for the external tools.
//
// Both processors describe an invocation as a ToolCommand and hand it to a
// CommandRunner. The production runner spawns the tool with the caller's
// stdio; tests substitute a mock to observe or fail invocations.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Result, TranscoderError};

/// A single external tool invocation: binary, argument vector, and a short
/// stage description used in failure messages.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCommand {
    pub binary_path: String,
    pub args: Vec<String>,
    pub description: String,
}

impl ToolCommand {
    pub fn new<S1: Into<String>, S2: Into<String>>(binary_path: S1, description: S2) -> Self {
        Self {
            binary_path: binary_path.into(),
            args: Vec::new(),
            description: description.into(),
        }
    }

    /// Add an argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(|s| s.into()));
        self
    }

    /// Add input file
    pub fn input<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg("-i").arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Add output file
    pub fn output<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Force overwrite output
    pub fn overwrite(self) -> Self {
        self.arg("-y")
    }

    /// Disable video
    pub fn no_video(self) -> Self {
        self.arg("-vn")
    }

    /// Set audio codec
    pub fn audio_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-acodec").arg(codec)
    }

    /// Set audio sample rate
    pub fn audio_sample_rate(self, rate: u32) -> Self {
        self.arg("-ar").arg(rate.to_string())
    }

    /// Set audio channels
    pub fn audio_channels(self, channels: u32) -> Self {
        self.arg("-ac").arg(channels.to_string())
    }

    /// Add video filter
    pub fn video_filter<S: Into<String>>(self, filter: S) -> Self {
        self.arg("-filter:v").arg(filter)
    }
}

/// Capability interface over process launching. The orchestrator and both
/// processors only ever see this trait, so tests can swap in a fake instead
/// of a preconfigured process handle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &ToolCommand) -> Result<()>;
}

/// Production runner backed by tokio's process support.
///
/// The child inherits the caller's stdout/stderr (tool output is not captured
/// or parsed) and is killed when the in-flight future is dropped, which is how
/// caller-side cancellation reaches a running tool.
pub struct SystemCommandRunner;

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, command: &ToolCommand) -> Result<()> {
        debug!(
            "Executing {}: {} {:?}",
            command.description, command.binary_path, command.args
        );

        let status = tokio::process::Command::new(&command.binary_path)
            .args(&command.args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| {
                TranscoderError::Tool(format!(
                    "{}: failed to launch {}: {}",
                    command.description, command.binary_path, e
                ))
            })?;

        if !status.success() {
            return Err(TranscoderError::Tool(format!(
                "{} failed with {}",
                command.description, status
            )));
        }

        Ok(())
    }
}

/// Fail before any directory creation or subprocess launch when the input
/// is missing.
pub(crate) fn ensure_input_exists(input: &Path) -> Result<()> {
    if !input.exists() {
        return Err(TranscoderError::FileNotFound(input.display().to_string()));
    }
    Ok(())
}

/// Create the output's parent directory when it has one.
pub(crate) fn ensure_parent_dir(output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn tool_command_builder_accumulates_args() {
        let command = ToolCommand::new("ffmpeg", "Audio extraction")
            .input("in.mp4")
            .no_video()
            .audio_codec("pcm_s16le")
            .audio_sample_rate(16000)
            .audio_channels(1)
            .overwrite()
            .output("out.wav");

        assert_eq!(command.binary_path, "ffmpeg");
        assert_eq!(
            command.args,
            vec![
                "-i", "in.mp4", "-vn", "-acodec", "pcm_s16le", "-ar", "16000", "-ac", "1", "-y",
                "out.wav"
            ]
        );
    }

    #[test]
    fn ensure_input_exists_reports_missing_file() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.mp4");

        let err = ensure_input_exists(&missing).unwrap_err();
        assert!(matches!(err, TranscoderError::FileNotFound(_)));
    }

    #[test]
    fn ensure_parent_dir_creates_nested_directories() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("a").join("b").join("out.srt");

        ensure_parent_dir(&output).unwrap();
        assert!(output.parent().unwrap().is_dir());
    }

    #[test]
    fn ensure_parent_dir_accepts_bare_filename() {
        ensure_parent_dir(Path::new("out.srt")).unwrap();
    }
}
