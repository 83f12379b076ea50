use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscoderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported language code: {0}")]
    UnsupportedLanguage(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("External tool error: {0}")]
    Tool(String),
}

pub type Result<T> = std::result::Result<T, TranscoderError>;
