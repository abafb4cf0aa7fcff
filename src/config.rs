//! Configuration management using the prefer crate.
//!
//! Resolution order, lowest to highest priority: built-in defaults, a
//! discovered `campus_connect.{toml,yaml,json}` file, then the `DATABASE_URL`
//! environment variable (a `.env` file is honoured).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::repository::util::sqlite_path;
use crate::repository::DbContext;

/// Name used for config file discovery.
pub const CONFIG_NAME: &str = "campus_connect";

/// Default database filename.
pub const DEFAULT_DATABASE_FILENAME: &str = "campus_connect.db";

/// Default data directory, relative to the working directory.
const DEFAULT_DATA_DIR: &str = "db";

/// Environment variable that overrides the database location.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base data directory.
    pub data_dir: PathBuf,
    /// Database filename inside `data_dir`.
    pub database_filename: String,
    /// Database URL (overrides data_dir/database_filename if set).
    pub database_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            database_filename: DEFAULT_DATABASE_FILENAME.to_string(),
            database_url: None,
        }
    }
}

impl Settings {
    /// Load settings from config discovery and the environment.
    pub async fn load() -> Self {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let mut settings = Settings::default();
        let config = Config::load().await;
        let base_dir = config
            .base_dir()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        config.apply_to_settings(&mut settings, &base_dir);
        settings.apply_env_overrides();
        settings
    }

    /// Apply `DATABASE_URL` from the process environment.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            if !url.trim().is_empty() {
                debug!("Using database URL from {}", DATABASE_URL_ENV);
                self.database_url = Some(url);
            }
        }
    }

    /// Get the database URL, constructing from path if not explicitly set.
    pub fn database_url(&self) -> String {
        if let Some(ref url) = self.database_url {
            url.clone()
        } else {
            format!("sqlite:{}", self.database_path().display())
        }
    }

    /// Full path to the SQLite database file.
    pub fn database_path(&self) -> PathBuf {
        match self.database_url {
            Some(ref url) => PathBuf::from(sqlite_path(url)),
            None => self.data_dir.join(&self.database_filename),
        }
    }

    /// Check if the database file exists.
    pub fn database_exists(&self) -> bool {
        self.database_path().exists()
    }

    /// Ensure the directory holding the database exists.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        match self.database_path().parent() {
            Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }

    /// Create a database context for these settings.
    pub fn create_db_context(&self) -> DbContext {
        DbContext::from_url(&self.database_url())
    }
}

/// On-disk configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Data directory (absolute, `~`-prefixed, or relative to the config file).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    /// Database filename inside the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_filename: Option<String>,
    /// Full database URL; wins over data_dir/database_filename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
    /// Where this config was loaded from.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer for discovery.
    /// Falls back to defaults when no file is found or it fails to parse.
    pub async fn load() -> Self {
        match prefer::load(CONFIG_NAME).await {
            Ok(pref_config) => match pref_config.source_path() {
                Some(path) => match Self::load_from_path(path).await {
                    Ok(config) => config,
                    Err(e) => {
                        tracing::warn!("Ignoring config file {}: {}", path.display(), e);
                        Self::default()
                    }
                },
                None => Self::default(),
            },
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path).await?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let mut config = Self::parse(&contents, ext)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse config text in the given format (`toml`, `yaml`/`yml`, anything else is JSON).
    pub fn parse(contents: &str, ext: &str) -> Result<Self> {
        match ext {
            "toml" => toml::from_str(contents)
                .map_err(|e| Error::Config(format!("Failed to parse TOML config: {}", e))),
            "yaml" | "yml" => serde_yaml::from_str(contents)
                .map_err(|e| Error::Config(format!("Failed to parse YAML config: {}", e))),
            _ => serde_json::from_str(contents)
                .map_err(|e| Error::Config(format!("Failed to parse JSON config: {}", e))),
        }
    }

    /// Directory of the config file, used to resolve relative paths.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved against `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref data_dir) = self.data_dir {
            settings.data_dir = self.resolve_path(data_dir, base_dir);
        }
        if let Some(ref filename) = self.database_filename {
            settings.database_filename = filename.clone();
        }
        if let Some(ref url) = self.database_url {
            settings.database_url = Some(url.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_database_url() {
        let settings = Settings::default();
        assert_eq!(settings.database_url(), "sqlite:db/campus_connect.db");
        assert_eq!(
            settings.database_path(),
            PathBuf::from("db/campus_connect.db")
        );
    }

    #[test]
    fn test_explicit_url_wins() {
        let settings = Settings {
            database_url: Some("sqlite:/var/lib/campus/app.db".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.database_url(), "sqlite:/var/lib/campus/app.db");
        assert_eq!(
            settings.database_path(),
            PathBuf::from("/var/lib/campus/app.db")
        );
    }

    #[test]
    fn test_parse_formats() {
        let toml = Config::parse("data_dir = \"data\"\ndatabase_filename = \"x.db\"", "toml")
            .unwrap();
        assert_eq!(toml.data_dir.as_deref(), Some("data"));
        assert_eq!(toml.database_filename.as_deref(), Some("x.db"));

        let yaml = Config::parse("database_url: sqlite:/tmp/y.db\n", "yml").unwrap();
        assert_eq!(yaml.database_url.as_deref(), Some("sqlite:/tmp/y.db"));

        let json = Config::parse(r#"{"data_dir": "/srv/campus"}"#, "json").unwrap();
        assert_eq!(json.data_dir.as_deref(), Some("/srv/campus"));

        let err = Config::parse("data_dir = [", "toml").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_relative_data_dir_resolves_against_config_dir() {
        let config = Config {
            data_dir: Some("data".to_string()),
            ..Default::default()
        };
        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings, Path::new("/etc/campus"));
        assert_eq!(settings.data_dir, PathBuf::from("/etc/campus/data"));
        assert_eq!(
            settings.database_path(),
            PathBuf::from("/etc/campus/data/campus_connect.db")
        );
    }

    #[tokio::test]
    async fn test_load_from_path_records_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campus_connect.toml");
        std::fs::write(&path, "database_filename = \"events.db\"\n").unwrap();

        let config = Config::load_from_path(&path).await.unwrap();
        assert_eq!(config.database_filename.as_deref(), Some("events.db"));
        assert_eq!(config.base_dir(), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn test_ensure_directories() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            data_dir: dir.path().join("nested").join("db"),
            ..Default::default()
        };
        settings.ensure_directories().unwrap();
        assert!(dir.path().join("nested").join("db").is_dir());
        assert!(!settings.database_exists());
    }
}
