//! # tokdiff tokenizer
//!
//! Turns raw document text into the token sequences the aligner compares.
//!
//! ```text
//! text ──> NFKD ──> drop combining marks ──> lowercase
//!      ──> separator runs → ' ' ──> split on whitespace ──> tokens
//! ```
//!
//! NFKD and the whitespace split always run; every other stage can be
//! switched off through
//! [`TokenizerConfig`]; the aligner only needs tokens that compare by value.
//!
//! ## Example
//!
//! ```rust
//! use tokdiff_tokenizer::{NormalizingTokenizer, Tokenizer, TokenizerConfig};
//!
//! let tokenizer = NormalizingTokenizer::new(TokenizerConfig::default()).unwrap();
//! assert_eq!(
//!     tokenizer.tokenize("Café-Résumé, Q3 2024!"),
//!     vec!["cafe", "resume", "q3", "2024"]
//! );
//! ```

mod config;
mod document;
mod error;
mod normalize;

pub use config::{TokenizerConfig, DEFAULT_SEPARATOR_PATTERN};
pub use document::{load_document, Document};
pub use error::{Result, TokenizerError};
pub use normalize::{NormalizingTokenizer, Tokenizer};
