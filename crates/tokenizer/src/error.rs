use std::path::PathBuf;
use thiserror::Error;

/// Result type for tokenizer operations
pub type Result<T> = std::result::Result<T, TokenizerError>;

/// Errors that can occur while loading or tokenizing documents
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// IO error occurred
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid UTF-8
    #[error("{path} is not valid UTF-8 (byte offset {valid_up_to})")]
    InvalidUtf8 { path: PathBuf, valid_up_to: usize },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TokenizerError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
