//! Configuration management for forgeteam

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::Credentials;
use crate::error::{ConfigError, Result};
use crate::state::StateStore;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Forgejo instance URL, e.g. `https://codeberg.org`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Personal access token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Basic auth user, used when no token is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Per-request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// State database location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_path: Option<PathBuf>,
}

/// Values supplied on the command line or through `FORGETEAM_*` variables
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub url: Option<String>,
    pub token: Option<String>,
    pub state_path: Option<PathBuf>,
}

impl Config {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".forgeteam").join("config.yaml"))
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing default file yields an empty config so flags and environment
    /// variables alone are enough; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    log::debug!("No config file at {}, using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        // Credentials live here: owner-only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Layer command line values over the file.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(url) = overrides.url {
            self.url = Some(url);
        }
        if let Some(token) = overrides.token {
            self.token = Some(token);
        }
        if let Some(state_path) = overrides.state_path {
            self.state_path = Some(state_path);
        }
    }

    /// Instance URL without a trailing slash
    pub fn base_url(&self) -> Result<String> {
        let url = self
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingUrl)?;

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(
                ConfigError::Invalid(format!("URL must start with http:// or https://: {}", url))
                    .into(),
            );
        }
        Ok(url.trim_end_matches('/').to_string())
    }

    /// Token wins over basic auth.
    pub fn credentials(&self) -> Result<Credentials> {
        if let Some(token) = self.token.as_deref().filter(|t| !t.is_empty()) {
            return Ok(Credentials::Token(token.to_string()));
        }

        match (&self.username, &self.password) {
            (Some(username), Some(password)) if !username.is_empty() => Ok(Credentials::Basic {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => Err(ConfigError::MissingCredentials.into()),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(Self::DEFAULT_TIMEOUT_SECS))
    }

    /// Configured state path, falling back to `~/.forgeteam/state.db`
    pub fn state_path(&self) -> Result<PathBuf> {
        match &self.state_path {
            Some(path) => Ok(path.clone()),
            None => Ok(StateStore::default_path()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.url.is_none());
        assert!(config.token.is_none());
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("forgeteam").join("config.yaml");

        let config = Config {
            url: Some("https://forgejo.example.com".to_string()),
            token: Some("secret".to_string()),
            timeout_secs: Some(5),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.url.as_deref(), Some("https://forgejo.example.com"));
        assert_eq!(loaded.timeout(), Duration::from_secs(5));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = Config::load(Some(Path::new("/nonexistent/config.yaml"))).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "url: https://x\napi_key: nope\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_overrides_win() {
        let mut config = Config {
            url: Some("https://file.example.com".to_string()),
            token: Some("file-token".to_string()),
            ..Config::default()
        };
        config.apply_overrides(ConfigOverrides {
            url: Some("https://flag.example.com/".to_string()),
            token: None,
            state_path: Some(PathBuf::from("/tmp/state.db")),
        });

        assert_eq!(config.base_url().unwrap(), "https://flag.example.com");
        assert!(matches!(config.credentials().unwrap(), Credentials::Token(t) if t == "file-token"));
        assert_eq!(config.state_path().unwrap(), PathBuf::from("/tmp/state.db"));
    }

    #[test]
    fn test_credentials_fallback_to_basic() {
        let config = Config {
            username: Some("admin".to_string()),
            password: Some("pw".to_string()),
            ..Config::default()
        };
        assert!(matches!(
            config.credentials().unwrap(),
            Credentials::Basic { ref username, .. } if username == "admin"
        ));
    }

    #[test]
    fn test_missing_url_and_credentials() {
        let config = Config::default();
        assert!(matches!(
            config.base_url().unwrap_err(),
            Error::Config(ConfigError::MissingUrl)
        ));
        assert!(matches!(
            config.credentials().unwrap_err(),
            Error::Config(ConfigError::MissingCredentials)
        ));
    }

    #[test]
    fn test_url_scheme_required() {
        let config = Config {
            url: Some("forgejo.example.com".to_string()),
            ..Config::default()
        };
        assert!(matches!(
            config.base_url().unwrap_err(),
            Error::Config(ConfigError::Invalid(_))
        ));
    }
}
