//! Configuration file support.
//!
//! Settings are read from TOML. Every key has a default, so an empty file
//! (or no file at all) yields [`Settings::default`].
//!
//! ```toml
//! [model]
//! frozen = false
//! extra = "forbid"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

/// File name looked up by [`Settings::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "fieldunits.toml";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The file is not valid TOML or has keys of the wrong type.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// No file in any of the searched locations.
    #[error("no fieldunits.toml found in: {}", display_paths(.0))]
    NotFound(Vec<PathBuf>),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Defaults applied to every schema built without an explicit config.
    #[serde(default)]
    pub model: ModelConfig,
}

/// Behaviour of models built from a schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Reject every assignment after construction.
    #[serde(default)]
    pub frozen: bool,
    /// What to do with input keys the schema does not declare.
    #[serde(default)]
    pub extra: ExtraPolicy,
}

/// Handling of undeclared input keys at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtraPolicy {
    /// Report each one as a validation error.
    #[default]
    Forbid,
    /// Drop them with a warning.
    Ignore,
}

impl Settings {
    /// Parses settings from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let settings = Self::from_toml_str(&content)?;
        info!(
            "Loaded settings from {} (frozen={}, extra={:?})",
            path.display(),
            settings.model.frozen,
            settings.model.extra
        );
        Ok(settings)
    }

    /// Loads settings from the first of `fieldunits.toml` and
    /// `config/fieldunits.toml` that exists in the working directory.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        Self::from_search_paths(&default_search_paths())
    }

    fn from_search_paths(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        match paths.iter().find(|p| p.exists()) {
            Some(path) => Self::from_file(path),
            None => Err(ConfigError::NotFound(paths.to_vec())),
        }
    }
}

fn default_search_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from(CONFIG_FILE_NAME),
        Path::new("config").join(CONFIG_FILE_NAME),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_empty_document_gives_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!settings.model.frozen);
        assert_eq!(settings.model.extra, ExtraPolicy::Forbid);
    }

    #[test]
    fn test_full_document() {
        let settings = Settings::from_toml_str(
            r#"
            [model]
            frozen = true
            extra = "ignore"
            "#,
        )
        .unwrap();
        assert!(settings.model.frozen);
        assert_eq!(settings.model.extra, ExtraPolicy::Ignore);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let settings = Settings::from_toml_str("[model]\nextra = \"ignore\"\n").unwrap();
        assert!(!settings.model.frozen);
        assert_eq!(settings.model.extra, ExtraPolicy::Ignore);
    }

    #[test]
    fn test_bad_values_are_parse_errors() {
        for doc in [
            "[model]\nextra = \"allow\"\n",
            "[model]\nfrozen = \"yes\"\n",
            "[model]\ncolour = 1\n",
            "[database]\nurl = \"x\"\n",
            "not toml at all [",
        ] {
            assert!(
                matches!(Settings::from_toml_str(doc), Err(ConfigError::Parse(_))),
                "{doc}"
            );
        }
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[model]\nfrozen = true").unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert!(settings.model.frozen);
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempdir().unwrap();
        let err = Settings::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn test_search_paths_pick_first_existing() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("config");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join(CONFIG_FILE_NAME), "[model]\nextra = \"ignore\"\n").unwrap();

        let paths = vec![dir.path().join(CONFIG_FILE_NAME), nested.join(CONFIG_FILE_NAME)];
        let settings = Settings::from_search_paths(&paths).unwrap();
        assert_eq!(settings.model.extra, ExtraPolicy::Ignore);

        fs::write(dir.path().join(CONFIG_FILE_NAME), "[model]\nfrozen = true\n").unwrap();
        let settings = Settings::from_search_paths(&paths).unwrap();
        assert!(settings.model.frozen);
        assert_eq!(settings.model.extra, ExtraPolicy::Forbid);
    }

    #[test]
    fn test_search_paths_none_found() {
        let dir = tempdir().unwrap();
        let paths = vec![dir.path().join(CONFIG_FILE_NAME)];
        let err = Settings::from_search_paths(&paths).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(ref p) if p.len() == 1));
        assert!(err.to_string().starts_with("no fieldunits.toml found in:"));
    }
}
