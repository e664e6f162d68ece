use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("handler already registered for {family} {version}")]
    DuplicateHandler { family: String, version: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ProcessorResult<T> = Result<T, ProcessorError>;
