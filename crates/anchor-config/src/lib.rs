//! Configuration primitives and loader for the anchor-link toolkit.
//!
//! Configuration resolves through a precedence stack:
//! override flag → working directory → git root → built-in defaults.
//! Parsed settings are normalised into typed structures so downstream
//! crates can operate without touching raw TOML.

use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = ".anchor-link.toml";

/// Complete configuration resolved from defaults and on-disk overrides.
#[derive(Clone, Debug)]
pub struct Config {
    pub sanitize: SanitizeSettings,
    pub permalinks: PermalinkTable,
    pub sources: ConfigSources,
}

/// Settings governing anchor sanitization policy.
#[derive(Clone, Debug)]
pub struct SanitizeSettings {
    /// Maximum token length applied after sanitization; `None` disables
    /// truncation.
    pub max_length: Option<usize>,
}

/// Static target-id → resolved-URL table consulted when a link names a
/// target instead of carrying a fixed base URL.
#[derive(Clone, Debug, Default)]
pub struct PermalinkTable {
    entries: BTreeMap<String, String>,
}

impl PermalinkTable {
    pub fn get(&self, target: &str) -> Option<&str> {
        self.entries.get(target).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(target, url)| (target.as_str(), url.as_str()))
    }
}

/// Provenance information for resolved configuration.
#[derive(Clone, Debug)]
pub struct ConfigSources {
    pub working_directory: PathBuf,
    pub layers: Vec<ConfigSource>,
}

/// Specific layer of configuration (default/git/local/override).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigSource {
    pub kind: ConfigSourceKind,
    pub path: Option<PathBuf>,
}

impl ConfigSource {
    fn default_layer() -> Self {
        ConfigSource {
            kind: ConfigSourceKind::Default,
            path: None,
        }
    }

    fn for_file(kind: ConfigSourceKind, path: PathBuf) -> Self {
        ConfigSource {
            kind,
            path: Some(path),
        }
    }

    fn describe(&self) -> String {
        match (&self.kind, &self.path) {
            (ConfigSourceKind::Default, _) => "built-in defaults".to_owned(),
            (kind, Some(path)) => format!("{} at {}", kind, path.display()),
            (kind, None) => kind.to_string(),
        }
    }
}

/// Kinds of configuration sources, ordered from lowest to highest
/// precedence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigSourceKind {
    Default,
    GitRoot,
    Local,
    Override,
}

impl fmt::Display for ConfigSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfigSourceKind::Default => "defaults",
            ConfigSourceKind::GitRoot => "git-root config",
            ConfigSourceKind::Local => "local config",
            ConfigSourceKind::Override => "override config",
        };
        f.write_str(label)
    }
}

/// Loader options, typically supplied by the CLI layer.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub override_path: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
}

impl LoadOptions {
    pub fn with_override_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    pub fn with_working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }
}

/// Errors surfaced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve working directory {attempted}: {source}")]
    WorkingDirectory {
        attempted: PathBuf,
        source: io::Error,
    },
    #[error("override config {path} not found")]
    OverrideNotFound { path: PathBuf },
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("configuration validation failed:\n{0}")]
    Validation(ConfigValidationErrors),
}

impl Config {
    /// Loads configuration using the precedence rules and returns typed
    /// settings.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let working_dir = resolve_working_dir(options.working_dir)?;
        let override_path = options
            .override_path
            .map(|path| make_absolute(&path, &working_dir));

        if let Some(path) = &override_path {
            if !path.exists() {
                return Err(ConfigError::OverrideNotFound { path: path.clone() });
            }
        }

        let mut merged = PartialConfig::defaults();
        let mut layers = vec![ConfigSource::default_layer()];

        let git_config_path = find_git_root(&working_dir).map(|root| root.join(CONFIG_FILE_NAME));
        let local_config_path = working_dir.join(CONFIG_FILE_NAME);

        if let Some(path) = git_config_path.as_ref() {
            if path.exists() && Some(path) != override_path.as_ref() && path != &local_config_path {
                let source = ConfigSource::for_file(ConfigSourceKind::GitRoot, path.clone());
                merged.merge(load_layer(path, source.clone())?);
                layers.push(source);
            }
        }

        if local_config_path.exists() && Some(&local_config_path) != override_path.as_ref() {
            let source = ConfigSource::for_file(ConfigSourceKind::Local, local_config_path.clone());
            merged.merge(load_layer(&local_config_path, source.clone())?);
            layers.push(source);
        }

        if let Some(path) = override_path {
            let source = ConfigSource::for_file(ConfigSourceKind::Override, path.clone());
            merged.merge(load_layer(&path, source.clone())?);
            layers.push(source);
        }

        let (sanitize, permalinks) = merged.finalize().map_err(ConfigError::Validation)?;
        Ok(Config {
            sanitize,
            permalinks,
            sources: ConfigSources {
                working_directory: working_dir,
                layers,
            },
        })
    }
}

fn resolve_working_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match override_dir {
        Some(path) => fs::canonicalize(&path).map_err(|source| ConfigError::WorkingDirectory {
            attempted: path,
            source,
        }),
        None => env::current_dir().map_err(|source| ConfigError::WorkingDirectory {
            attempted: PathBuf::from("."),
            source,
        }),
    }
}

fn make_absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(".git").exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

fn load_layer(path: &Path, source: ConfigSource) -> Result<PartialConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.into(),
        source,
    })?;
    let raw: RawConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.into(),
        source,
    })?;
    Ok(raw.into_partial(source))
}

#[derive(Clone, Debug, Default)]
struct PartialConfig {
    max_length: Option<Located<Option<usize>>>,
    permalinks: BTreeMap<String, Located<String>>,
}

impl PartialConfig {
    fn defaults() -> Self {
        PartialConfig {
            max_length: Some(Located::new(None, ConfigSource::default_layer())),
            permalinks: BTreeMap::new(),
        }
    }

    fn merge(&mut self, other: PartialConfig) {
        if other.max_length.is_some() {
            self.max_length = other.max_length;
        }
        // Permalink entries merge per key so project-wide tables can be
        // extended locally.
        for (target, url) in other.permalinks {
            self.permalinks.insert(target, url);
        }
    }

    fn finalize(self) -> Result<(SanitizeSettings, PermalinkTable), ConfigValidationErrors> {
        let mut errors = Vec::new();

        let max_length = self.max_length.and_then(|located| {
            if let Some(value) = located.value {
                if value == 0 {
                    errors.push(ConfigValidationError {
                        source: Some(located.source.clone()),
                        message: "sanitize.max_length must be at least 1 (received 0)".into(),
                    });
                    return None;
                }
            }
            located.value
        });

        let mut entries = BTreeMap::new();
        for (target, located) in self.permalinks {
            if target.trim().is_empty() {
                errors.push(ConfigValidationError {
                    source: Some(located.source.clone()),
                    message: "permalinks targets cannot be empty".into(),
                });
                continue;
            }
            if located.value.trim().is_empty() {
                errors.push(ConfigValidationError {
                    source: Some(located.source.clone()),
                    message: format!("permalinks entry '{target}' has an empty URL"),
                });
                continue;
            }
            entries.insert(target, located.value);
        }

        if !errors.is_empty() {
            return Err(ConfigValidationErrors(errors));
        }

        Ok((SanitizeSettings { max_length }, PermalinkTable { entries }))
    }
}

#[derive(Clone, Debug)]
struct Located<T> {
    value: T,
    source: ConfigSource,
}

impl<T> Located<T> {
    fn new(value: T, source: ConfigSource) -> Self {
        Located { value, source }
    }
}

/// Container for validation failures, formatted as a bullet list.
#[derive(Debug)]
pub struct ConfigValidationErrors(pub Vec<ConfigValidationError>);

impl fmt::Display for ConfigValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "- {err}")?;
        }
        Ok(())
    }
}

/// Validation failure with optional provenance.
#[derive(Clone, Debug)]
pub struct ConfigValidationError {
    pub source: Option<ConfigSource>,
    pub message: String,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(source) = &self.source {
            write!(f, " ({})", source.describe())?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    sanitize: Option<RawSanitize>,
    #[serde(default)]
    permalinks: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct RawSanitize {
    #[serde(default)]
    max_length: Option<usize>,
}

impl RawConfig {
    fn into_partial(self, source: ConfigSource) -> PartialConfig {
        PartialConfig {
            max_length: self
                .sanitize
                .map(|sanitize| Located::new(sanitize.max_length, source.clone())),
            permalinks: self
                .permalinks
                .unwrap_or_default()
                .into_iter()
                .map(|(target, url)| (target, Located::new(url, source.clone())))
                .collect(),
        }
    }
}
