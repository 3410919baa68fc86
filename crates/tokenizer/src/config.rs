use serde::{Deserialize, Serialize};

/// Runs of anything outside ASCII letters and digits
pub const DEFAULT_SEPARATOR_PATTERN: &str = "[^0-9a-zA-Z]+";

/// Normalization applied before text is split into tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenizerConfig {
    /// Drop the combining marks left by NFKD decomposition, so `é` becomes `e`
    pub strip_diacritics: bool,

    /// Lowercase every token
    pub lowercase: bool,

    /// Replace every `separator_pattern` match with a single space
    pub strip_punctuation: bool,

    /// Regex for separator runs, used when `strip_punctuation` is set
    pub separator_pattern: String,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            strip_diacritics: true,
            lowercase: true,
            strip_punctuation: true,
            separator_pattern: DEFAULT_SEPARATOR_PATTERN.to_string(),
        }
    }
}

impl TokenizerConfig {
    /// Compatibility decomposition and whitespace splitting only; case and
    /// punctuation are kept as written
    pub fn raw() -> Self {
        Self {
            strip_diacritics: false,
            lowercase: false,
            strip_punctuation: false,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.strip_punctuation {
            return Ok(());
        }

        if self.separator_pattern.trim().is_empty() {
            return Err("separator_pattern must not be empty".to_string());
        }

        regex::Regex::new(&self.separator_pattern)
            .map(|_| ())
            .map_err(|err| format!("separator_pattern is not a valid regex: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(TokenizerConfig::default().validate().is_ok());
        assert!(TokenizerConfig::raw().validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = TokenizerConfig {
            separator_pattern: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.separator_pattern = "[unclosed".to_string();
        assert!(config.validate().is_err());

        // Pattern is unused without punctuation stripping
        config.strip_punctuation = false;
        assert!(config.validate().is_ok());

        config.strip_punctuation = true;
        config.separator_pattern = r"[\W_]+".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: TokenizerConfig = toml::from_str("lowercase = false").unwrap();
        assert!(!config.lowercase);
        assert!(config.strip_diacritics);
        assert_eq!(config.separator_pattern, DEFAULT_SEPARATOR_PATTERN);
    }

    #[test]
    fn test_misspelled_key_is_rejected() {
        let err = toml::from_str::<TokenizerConfig>("lowercse = false").unwrap_err();
        assert!(err.to_string().contains("lowercse"), "{err}");
    }
}
