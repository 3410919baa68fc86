use crate::config::TokenizerConfig;
use crate::error::{Result, TokenizerError};
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Splits text into the ordered tokens handed to the aligner
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Tokenizer driven by a [`TokenizerConfig`]
#[derive(Debug, Clone)]
pub struct NormalizingTokenizer {
    config: TokenizerConfig,
    separator: Option<Regex>,
}

impl NormalizingTokenizer {
    /// Create a tokenizer, compiling the separator pattern if it is used
    pub fn new(config: TokenizerConfig) -> Result<Self> {
        config.validate().map_err(TokenizerError::invalid_config)?;

        let separator = if config.strip_punctuation {
            let regex = Regex::new(&config.separator_pattern)
                .map_err(|err| TokenizerError::invalid_config(err.to_string()))?;
            Some(regex)
        } else {
            None
        };

        Ok(Self { config, separator })
    }

    #[must_use]
    pub const fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Apply every enabled normalization stage, without splitting
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        let mut normalized: String = if self.config.strip_diacritics {
            text.nfkd().filter(|ch| !is_combining_mark(*ch)).collect()
        } else {
            text.nfkd().collect()
        };

        if self.config.lowercase {
            normalized = normalized.to_lowercase();
        }

        if let Some(separator) = &self.separator {
            normalized = separator.replace_all(&normalized, " ").into_owned();
        }

        normalized
    }
}

impl Tokenizer for NormalizingTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.normalize(text)
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}
