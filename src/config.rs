use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, TranscoderError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub media: MediaConfig,
    pub transcriber: TranscriberConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Path to ffmpeg binary
    pub binary_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriberConfig {
    /// Path to transcriber binary (e.g., whisper-cli)
    pub binary_path: String,
    /// Path to the whisper model file
    pub model_path: PathBuf,
    /// Compute device the transcriber was built for ("cpu", "cuda", "metal")
    pub device: String,
    /// Worker thread count; 0 leaves the tool's own default in place
    pub threads: u32,
    /// Source language hint for plain transcription ("auto" lets the tool detect)
    pub language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            media: MediaConfig {
                binary_path: "ffmpeg".to_string(),
            },
            transcriber: TranscriberConfig {
                binary_path: "whisper-cli".to_string(),
                model_path: default_model_path(),
                device: "cpu".to_string(),
                threads: 4,
                language: "auto".to_string(),
            },
        }
    }
}

/// Default model location under the user's home directory.
fn default_model_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(".cache")
        .join("whisper")
        .join("base.bin")
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TranscoderError::Config(format!("Failed to read config file: {}", e)))?;

        Ok(toml::from_str(&content)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TranscoderError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| TranscoderError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_points_at_system_tools() {
        let config = Config::default();

        assert_eq!(config.media.binary_path, "ffmpeg");
        assert_eq!(config.transcriber.binary_path, "whisper-cli");
        assert_eq!(config.transcriber.device, "cpu");
        assert_eq!(config.transcriber.threads, 4);
        assert_eq!(config.transcriber.language, "auto");
        assert!(config.transcriber.model_path.ends_with(".cache/whisper/base.bin"));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        let mut config = Config::default();
        config.transcriber.model_path = PathBuf::from("/opt/models/medium.bin");
        config.transcriber.threads = 8;

        config.save_to_file(&path).unwrap();
        let loaded = Config::from_file(&path).unwrap();

        assert_eq!(loaded.transcriber.model_path, PathBuf::from("/opt/models/medium.bin"));
        assert_eq!(loaded.transcriber.threads, 8);
        assert_eq!(loaded.media.binary_path, "ffmpeg");
    }

    #[test]
    fn from_file_rejects_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "media = \"not a table\"").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, TranscoderError::Toml(_)));
    }
}
