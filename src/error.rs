use thiserror::Error;

/// Errors raised while configuring a typing test
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("test duration must be a positive number of seconds, got {0}")]
    InvalidDuration(u64),
    #[error("word count must be positive, got {0}")]
    InvalidWordCount(usize),
    #[error("word source returned no words for a request of {0}")]
    EmptyWordList(usize),
}

/// Errors raised while loading an embedded word list
#[derive(Debug, Error)]
pub enum LanguageError {
    #[error("word list not found: {0}")]
    NotFound(String),
    #[error("word list {0} is not valid utf-8")]
    Encoding(String),
    #[error("unable to decode word list: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors raised by the config store
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
