//! Application configuration for Rollcall.
//!
//! User config lives at `~/.rollcall/rollcall.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, RollcallError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "rollcall.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".rollcall";

/// Root of the Senate Legislative Information System document tree.
pub const DEFAULT_BASE_URL: &str = "https://www.senate.gov/legislative/LIS/";

// ---------------------------------------------------------------------------
// Config structs (matching rollcall.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Document retrieval and caching.
    #[serde(default)]
    pub source: SourceSection,

    /// Table output defaults.
    #[serde(default)]
    pub output: OutputSection,
}

/// `[source]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    /// Base URL the vote list and vote record paths are joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Directory holding cached XML documents.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,

    /// Whether cached documents are reused or always re-fetched.
    #[serde(default)]
    pub cache_policy: CachePolicy,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cache_dir: default_cache_dir(),
            cache_policy: CachePolicy::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_cache_dir() -> String {
    "senate_votes_xml".into()
}
fn default_timeout_secs() -> u64 {
    30
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    /// Default export format.
    #[serde(default)]
    pub format: ExportFormat,

    /// Directory exported tables are written to when no path is given.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> String {
    ".".into()
}

/// How the document cache treats files already on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CachePolicy {
    /// A cached file is trusted as-is and never re-fetched.
    #[default]
    TrustLocal,
    /// Always fetch from the remote source and overwrite the cached copy.
    Refresh,
}

/// Flat-file format for exported vote tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    /// File extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

// ---------------------------------------------------------------------------
// Source config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime document source configuration.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Base URL for the LIS document tree (always ends with `/`).
    pub base_url: Url,
    /// Cache directory.
    pub cache_dir: PathBuf,
    /// Cache policy.
    pub cache_policy: CachePolicy,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl TryFrom<&AppConfig> for SourceConfig {
    type Error = RollcallError;

    fn try_from(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(&config.source.base_url)?,
            cache_dir: PathBuf::from(&config.source.cache_dir),
            cache_policy: config.source.cache_policy,
            timeout_secs: config.source.timeout_secs,
        })
    }
}

/// Parse a base URL, appending a trailing slash so relative joins keep the last segment.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized)
        .map_err(|e| RollcallError::config(format!("invalid base_url '{raw}': {e}")))
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.rollcall/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| RollcallError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.rollcall/rollcall.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| RollcallError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| RollcallError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| RollcallError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| RollcallError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| RollcallError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("base_url"));
        assert!(toml_str.contains("trust-local"));
        assert!(toml_str.contains("csv"));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[source]
cache_dir = "/tmp/votes"
cache_policy = "refresh"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.source.cache_dir, "/tmp/votes");
        assert_eq!(config.source.cache_policy, CachePolicy::Refresh);
        assert_eq!(config.source.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.source.timeout_secs, 30);
        assert_eq!(config.output.format, ExportFormat::Csv);
    }

    #[test]
    fn source_config_from_app_config() {
        let app = AppConfig::default();
        let source = SourceConfig::try_from(&app).expect("valid defaults");
        assert_eq!(source.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(source.cache_dir, PathBuf::from("senate_votes_xml"));
        assert_eq!(source.cache_policy, CachePolicy::TrustLocal);
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let url = parse_base_url("http://127.0.0.1:8080/lis").expect("parse");
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/lis/");
        assert_eq!(
            url.join("roll_call_lists/x.xml").expect("join").as_str(),
            "http://127.0.0.1:8080/lis/roll_call_lists/x.xml"
        );
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let mut app = AppConfig::default();
        app.source.base_url = "not a url".into();
        let err = SourceConfig::try_from(&app).unwrap_err();
        assert!(matches!(err, RollcallError::Config { .. }));
    }
}
