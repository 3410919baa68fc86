use crate::error::{Result, TokenizerError};
use crate::normalize::Tokenizer;
use std::path::{Path, PathBuf};

/// A tokenized document on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub tokens: Vec<String>,
}

impl Document {
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Read `path` as UTF-8 and tokenize it
pub fn load_document(path: impl AsRef<Path>, tokenizer: &dyn Tokenizer) -> Result<Document> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| TokenizerError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let text = String::from_utf8(bytes).map_err(|err| TokenizerError::InvalidUtf8 {
        path: path.to_path_buf(),
        valid_up_to: err.utf8_error().valid_up_to(),
    })?;

    let tokens = tokenizer.tokenize(&text);
    log::debug!("{}: {} tokens", path.display(), tokens.len());

    Ok(Document {
        path: path.to_path_buf(),
        tokens,
    })
}
