use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokdiff_tokenizer::TokenizerConfig;

use crate::batch::PairSpec;

/// Batch manifest, loaded from TOML
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Directory that `name` entries are resolved against on the expected side
    pub expected_dir: Option<PathBuf>,

    /// Directory that `name` entries are resolved against on the actual side
    pub actual_dir: Option<PathBuf>,

    /// Tokenizer override for every pair in the manifest
    pub tokenizer: Option<TokenizerConfig>,

    #[serde(default, rename = "pair")]
    pub pairs: Vec<ManifestPair>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestPair {
    pub name: Option<String>,
    pub expected: Option<PathBuf>,
    pub actual: Option<PathBuf>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("Invalid manifest {}", path.display()))
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Resolve every pair to concrete paths. Relative paths are taken from
    /// `base`, normally the directory holding the manifest.
    pub fn resolve(&self, base: &Path) -> Result<Vec<PairSpec>> {
        if self.pairs.is_empty() {
            bail!("manifest lists no pairs");
        }

        let side_dir = |dir: &Option<PathBuf>| {
            dir.as_ref()
                .map_or_else(|| base.to_path_buf(), |dir| base.join(dir))
        };
        let expected_dir = side_dir(&self.expected_dir);
        let actual_dir = side_dir(&self.actual_dir);

        self.pairs
            .iter()
            .enumerate()
            .map(|(idx, pair)| {
                let side = |explicit: &Option<PathBuf>, dir: &Path| -> Option<PathBuf> {
                    match (explicit, &pair.name) {
                        (Some(path), _) => Some(base.join(path)),
                        (None, Some(name)) => Some(dir.join(name)),
                        (None, None) => None,
                    }
                };

                let (Some(expected), Some(actual)) = (
                    side(&pair.expected, &expected_dir),
                    side(&pair.actual, &actual_dir),
                ) else {
                    return Err(anyhow!(
                        "pair #{}: needs `name` or both `expected` and `actual`",
                        idx + 1
                    ));
                };

                let name = pair
                    .name
                    .clone()
                    .unwrap_or_else(|| display_name(&expected));

                Ok(PairSpec {
                    name,
                    expected,
                    actual,
                })
            })
            .collect()
    }
}

/// Pairs for files with the same name in two directories. Without explicit
/// names every regular file in `expected_dir` is used, sorted by name.
pub fn pairs_from_dirs(
    expected_dir: &Path,
    actual_dir: &Path,
    names: &[String],
) -> Result<Vec<PairSpec>> {
    let names = if names.is_empty() {
        list_file_names(expected_dir)?
    } else {
        names.to_vec()
    };

    if names.is_empty() {
        bail!("no documents found in {}", expected_dir.display());
    }

    Ok(names
        .into_iter()
        .map(|name| PairSpec {
            expected: expected_dir.join(&name),
            actual: actual_dir.join(&name),
            name,
        })
        .collect())
}

fn list_file_names(dir: &Path) -> Result<Vec<String>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => log::warn!("Skipping non-UTF-8 file name {raw:?}"),
        }
    }
    names.sort();
    Ok(names)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn names_resolve_against_side_directories() {
        let manifest = Manifest::from_toml_str(
            r#"
            expected_dir = "answers"
            actual_dir = "results"

            [[pair]]
            name = "a.txt"

            [[pair]]
            expected = "gold/b.txt"
            actual = "out/b-generated.txt"
            "#,
        )
        .unwrap();

        let pairs = manifest.resolve(Path::new("/data")).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].name, "a.txt");
        assert_eq!(pairs[0].expected, PathBuf::from("/data/answers/a.txt"));
        assert_eq!(pairs[0].actual, PathBuf::from("/data/results/a.txt"));
        assert_eq!(pairs[1].name, "b.txt");
        assert_eq!(pairs[1].expected, PathBuf::from("/data/gold/b.txt"));
        assert_eq!(pairs[1].actual, PathBuf::from("/data/out/b-generated.txt"));
    }

    #[test]
    fn explicit_path_overrides_one_side() {
        let manifest = Manifest::from_toml_str(
            r#"
            actual_dir = "results"

            [[pair]]
            name = "a.txt"
            expected = "elsewhere/a.txt"
            "#,
        )
        .unwrap();

        let pairs = manifest.resolve(Path::new("base")).unwrap();
        assert_eq!(pairs[0].expected, PathBuf::from("base/elsewhere/a.txt"));
        assert_eq!(pairs[0].actual, PathBuf::from("base/results/a.txt"));
    }

    #[test]
    fn incomplete_pair_is_rejected_with_its_position() {
        let manifest = Manifest::from_toml_str(
            r#"
            [[pair]]
            name = "ok.txt"

            [[pair]]
            expected = "only-one-side.txt"
            "#,
        )
        .unwrap();

        let err = manifest.resolve(Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("pair #2"), "{err}");
    }

    #[test]
    fn empty_manifest_is_rejected() {
        let manifest = Manifest::from_toml_str("expected_dir = \"x\"").unwrap();
        assert!(manifest.resolve(Path::new(".")).is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Manifest::from_toml_str("[[pair]]\nnmae = \"typo.txt\"").is_err());
        assert!(Manifest::from_toml_str(
            "[tokenizer]\nlowercse = false\n\n[[pair]]\nname = \"a.txt\""
        )
        .is_err());
    }

    #[test]
    fn tokenizer_section_is_parsed() {
        let manifest = Manifest::from_toml_str(
            r#"
            [tokenizer]
            lowercase = false

            [[pair]]
            name = "a.txt"
            "#,
        )
        .unwrap();
        let tokenizer = manifest.tokenizer.unwrap();
        assert!(!tokenizer.lowercase);
        assert!(tokenizer.strip_punctuation);
    }

    #[test]
    fn directory_listing_is_sorted_and_skips_subdirectories() {
        let temp = tempdir().unwrap();
        let expected = temp.path().join("expected");
        fs::create_dir_all(expected.join("nested")).unwrap();
        fs::write(expected.join("b.txt"), "b").unwrap();
        fs::write(expected.join("a.txt"), "a").unwrap();

        let pairs = pairs_from_dirs(&expected, Path::new("actual"), &[]).unwrap();
        let names: Vec<_> = pairs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
        assert_eq!(pairs[0].actual, PathBuf::from("actual/a.txt"));
    }

    #[test]
    fn explicit_names_skip_directory_listing() {
        let pairs = pairs_from_dirs(
            Path::new("does-not-exist"),
            Path::new("actual"),
            &["z.txt".to_string()],
        )
        .unwrap();
        assert_eq!(pairs[0].expected, PathBuf::from("does-not-exist/z.txt"));
    }
}
