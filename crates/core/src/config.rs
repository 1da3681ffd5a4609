//! Client configuration
//!
//! Loaded from `carhire.toml` in the user's config directory. Every field has
//! a default, so a missing file is not an error. A few environment variables
//! override the file.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_URL: &str = "CARHIRE_API_URL";
pub const ENV_SESSION_FILE: &str = "CARHIRE_SESSION_FILE";

const CONFIG_FILE: &str = "carhire.toml";
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Where the REST backend lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// Session record location; defaults to the data directory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Parse TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist; the default file may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Ok(p) => (p, false),
                Err(_) => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            if required {
                return Err(Error::NotFound(format!(
                    "config file {}",
                    path.display()
                )));
            }
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(path) = lookup(ENV_SESSION_FILE).filter(|v| !v.trim().is_empty()) {
            self.session.path = Some(PathBuf::from(path));
        }
    }

    /// Apply overrides from the process environment
    pub fn with_env(mut self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok());
        self
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }

    /// Resolved location of the session record
    pub fn session_path(&self) -> Result<PathBuf> {
        match &self.session.path {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join(SESSION_FILE)),
        }
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "carhire", "carhire").ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine data directory",
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.session.path.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[api]
base_url = "https://rentals.example.lk/"
timeout_secs = 5

[session]
path = "/tmp/carhire-session.json"
"#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.base_url(), "https://rentals.example.lk");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(
            config.session_path().unwrap(),
            PathBuf::from("/tmp/carhire-session.json")
        );
    }

    #[test]
    fn test_env_beats_file() {
        let mut config = Config::from_toml("[api]\nbase_url = \"http://file:8080\"").unwrap();
        config.apply_overrides(|key| match key {
            ENV_API_URL => Some("http://env:9090".to_string()),
            ENV_SESSION_FILE => Some("".to_string()),
            _ => None,
        });
        assert_eq!(config.api.base_url, "http://env:9090");
        assert!(config.session.path.is_none());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carhire.toml");
        std::fs::write(&path, "[api]\ntimeout_secs = 12\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.api.timeout_secs, 12);

        let missing = dir.path().join("nope.toml");
        assert!(matches!(Config::load(Some(&missing)), Err(Error::NotFound(_))));

        std::fs::write(&path, "[api\n").unwrap();
        assert!(matches!(Config::load(Some(&path)), Err(Error::Config(_))));
    }
}
