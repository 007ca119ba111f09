//! Run-configuration loading and validation.
//!
//! A depscope run is described by a small JSON file naming the package to
//! analyze, where its dependency data lives, and how the result should be
//! rendered by default. Unknown extra keys are ignored.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::render::RenderFormat;

/// Errors that can occur while loading or validating a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the file from disk.
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse JSON content (syntax errors, missing keys, wrong types).
    #[error("Failed to parse config JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The configuration parsed but carries an invalid value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Where dependency data is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoMode {
    /// A local flat-file description (`repository_source` is a file path).
    Local,
    /// A remote Maven repository (`repository_source` is a base URL).
    Remote,
}

impl std::fmt::Display for RepoMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoMode::Local => write!(f, "local"),
            RepoMode::Remote => write!(f, "remote"),
        }
    }
}

/// The run configuration for one build-and-render session.
///
/// Loaded once in `main` and passed by reference from there; nothing in the
/// crate mutates it after validation.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Package to analyze. In remote mode this is the `group:artifact` pair.
    pub package_name: String,

    /// Flat-file path (local mode) or repository base URL (remote mode).
    pub repository_source: String,

    /// Which kind of source `repository_source` points at.
    pub repo_mode: RepoMode,

    /// Version of the root package; forms the remote coordinate.
    pub package_version: String,

    /// When true, `analyze` defaults to the ASCII tree instead of the edge list.
    pub output_mode_ascii_tree: bool,
}

impl Config {
    /// Returns the identifier graph construction starts from.
    ///
    /// Local descriptions are keyed by bare package name; remote lookups
    /// need the full `group:artifact:version` coordinate.
    pub fn start_package(&self) -> String {
        match self.repo_mode {
            RepoMode::Local => self.package_name.clone(),
            RepoMode::Remote => format!("{}:{}", self.package_name, self.package_version),
        }
    }

    /// Returns the render format selected by `output_mode_ascii_tree`.
    pub fn default_format(&self) -> RenderFormat {
        if self.output_mode_ascii_tree {
            RenderFormat::Tree
        } else {
            RenderFormat::Edges
        }
    }
}

/// Loads and parses a configuration file from a file path.
///
/// # Arguments
///
/// * `path` - Path to the JSON configuration file
///
/// # Returns
///
/// A `ConfigResult` containing the parsed `Config` or an error. Call
/// [`validate`] afterwards to check value constraints.
pub fn load(path: &Path) -> ConfigResult<Config> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a configuration from a JSON string.
///
/// # Example
///
/// ```
/// use depscope::config::parse_str;
///
/// let json = r#"{
///     "package_name": "demo-app",
///     "repository_source": "deps.txt",
///     "repo_mode": "local",
///     "package_version": "1.0.0",
///     "output_mode_ascii_tree": true
/// }"#;
/// let config = parse_str(json).unwrap();
/// assert_eq!(config.package_name, "demo-app");
/// ```
pub fn parse_str(content: &str) -> ConfigResult<Config> {
    let config: Config = serde_json::from_str(content)?;
    Ok(config)
}

/// Validates a parsed configuration.
///
/// Serde already rejects missing keys, wrong types, and unknown `repo_mode`
/// values; this checks the constraints a type cannot express.
pub fn validate(config: &Config) -> ConfigResult<()> {
    for (key, value) in [
        ("package_name", &config.package_name),
        ("repository_source", &config.repository_source),
        ("package_version", &config.package_version),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(format!(
                "'{}' must be a non-empty string",
                key
            )));
        }
    }
    Ok(())
}
