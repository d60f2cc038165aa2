//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\freetext-finder\config.toml
//! - macOS: ~/Library/Application Support/freetext-finder/config.toml
//! - Linux: ~/.config/freetext-finder/config.toml
//!
//! An explicit path (the CLI's `--config`) overrides the default location.
//! Every section is optional; missing keys take their defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Outbound HTTP settings shared by every provider
    pub http: HttpConfig,

    /// Lookup orchestration settings
    pub lookup: LookupConfig,

    /// Provider registration
    pub providers: ProvidersConfig,

    /// Catalog database
    pub database: DatabaseConfig,
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout
    pub timeout_secs: u64,

    /// TCP/TLS connect timeout
    pub connect_timeout_secs: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: format!("freetext-finder/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Lookup orchestration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Books looked up concurrently in a batch (each book's chain stays sequential)
    pub batch_concurrency: usize,

    /// Upper bound on one provider call, on top of the HTTP timeouts
    pub adapter_timeout_secs: u64,

    /// Cache data file replacing the built-in dataset
    pub cache_file: Option<PathBuf>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            batch_concurrency: 4,
            adapter_timeout_secs: 45,
            cache_file: None,
        }
    }
}

impl LookupConfig {
    pub fn adapter_timeout(&self) -> Duration {
        Duration::from_secs(self.adapter_timeout_secs)
    }
}

/// Which providers run, and in what order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Provider names that are not registered
    pub disabled: Vec<String>,

    /// Provider name -> priority, replacing the built-in priority
    pub priority_overrides: BTreeMap<String, i32>,
}

impl ProvidersConfig {
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.iter().any(|d| d.eq_ignore_ascii_case(name))
    }
}

/// Catalog database settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file path
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(crate::db::DEFAULT_DB_NAME),
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("freetext-finder"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from `path`, or the default location when `None`.
///
/// Returns default config if the file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load(path: Option<&Path>) -> Config {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => p,
            None => {
                tracing::warn!("Could not determine config directory, using defaults");
                return Config::default();
            }
        },
    };

    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to `path`, or the default location when `None`.
///
/// Creates the parent directory if it doesn't exist.
pub fn save(config: &Config, path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_path().ok_or(ConfigError::NoConfigDir)?,
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, &path)
        .map_err(|e| ConfigError::Rename(temp_path, path.clone(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(path)
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[http]"));
        assert!(toml.contains("[lookup]"));
        assert!(toml.contains("[providers]"));
        assert!(toml.contains("[database]"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
        assert_eq!(config.http.connect_timeout(), Duration::from_secs(10));
        assert!(config.http.user_agent.starts_with("freetext-finder/"));
        assert_eq!(config.lookup.batch_concurrency, 4);
        assert_eq!(config.lookup.adapter_timeout(), Duration::from_secs(45));
        assert!(config.lookup.cache_file.is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[providers]
disabled = ["Vatican.va"]

[providers.priority_overrides]
"LibriVox (Audiobooks)" = 1
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert!(config.providers.is_disabled("vatican.va"));
        assert!(!config.providers.is_disabled("Project Gutenberg"));
        assert_eq!(
            config.providers.priority_overrides.get("LibriVox (Audiobooks)"),
            Some(&1)
        );

        // Other sections use defaults
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.database.path, PathBuf::from("library.db"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.lookup.batch_concurrency = 8;
        config.http.user_agent = "test-agent/1.0".to_string();

        let written = save(&config, Some(&path)).unwrap();
        assert_eq!(written, path);
        assert!(!path.with_extension("toml.tmp").exists());

        let loaded = load(Some(&path));
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[lookup]\nbatch_concurrency = \"many\"").unwrap();

        assert_eq!(load(Some(&path)), Config::default());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load(Some(&dir.path().join("absent.toml"))), Config::default());
    }
}
