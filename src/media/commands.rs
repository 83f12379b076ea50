use std::path::Path;

use crate::command::ToolCommand;

/// Builder for the fixed transcoding-tool invocations.
pub struct MediaCommandBuilder {
    binary_path: String,
}

impl MediaCommandBuilder {
    pub fn new<S: Into<String>>(binary_path: S) -> Self {
        Self {
            binary_path: binary_path.into(),
        }
    }

    /// Audio extraction in the format the transcriber expects: mono, 16 kHz,
    /// 16-bit PCM, overwriting any previous output.
    pub fn extract_audio<P: AsRef<Path>>(&self, input: P, output: P) -> ToolCommand {
        ToolCommand::new(&self.binary_path, "Audio extraction")
            .input(input)
            .no_video()
            .audio_codec("pcm_s16le")
            .audio_sample_rate(16000)
            .audio_channels(1)
            .overwrite()
            .output(output)
    }

    /// Playback speed change by scaling video presentation timestamps.
    pub fn change_speed<P: AsRef<Path>>(&self, input: P, output: P, factor: f64) -> ToolCommand {
        ToolCommand::new(&self.binary_path, "Speed change")
            .input(input)
            .video_filter(format!("setpts=PTS/{}", factor))
            .overwrite()
            .output(output)
    }

    /// Version probe used by the availability check.
    pub fn version_check(&self) -> ToolCommand {
        ToolCommand::new(&self.binary_path, "Version check").arg("-version")
    }
}
