use clap::ValueEnum;
use tokdiff_tokenizer::TokenizerConfig;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum TokenizerPreset {
    /// Strip diacritics, lowercase, collapse punctuation
    Standard,
    /// Split on whitespace only
    Raw,
}

impl TokenizerPreset {
    pub(crate) fn as_domain(self) -> TokenizerConfig {
        match self {
            TokenizerPreset::Standard => TokenizerConfig::default(),
            TokenizerPreset::Raw => TokenizerConfig::raw(),
        }
    }
}
