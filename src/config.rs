//! Configuration for `~/.config/studynav/config.toml`.
//!
//! The file is optional and every key has a default. Precedence, lowest
//! first: file, then the `STUDYNAV_API_URL` environment variable, then
//! command-line flags (applied by the binary).
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Environment variable that overrides `api_base_url`.
pub const API_URL_ENV: &str = "STUDYNAV_API_URL";

const KNOWN_KEYS: [&str; 7] = [
    "api_base_url",
    "request_timeout_secs",
    "theme",
    "mobile_breakpoint_columns",
    "user_name",
    "user_email",
    "content_locked",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),

    #[error("Invalid config value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the taxonomy service, e.g. `http://localhost:3300`.
    pub api_base_url: String,

    /// Per-request deadline for taxonomy fetches.
    pub request_timeout_secs: u64,

    /// "dark" or "light".
    pub theme: String,

    /// Terminals narrower than this get the mobile layout (hamburger menu
    /// and bottom bar) instead of the desktop bar.
    pub mobile_breakpoint_columns: u16,

    /// Signed-in user for the local session. No name means signed out.
    pub user_name: Option<String>,
    pub user_email: Option<String>,

    /// Initial value of the content entitlement flag.
    pub content_locked: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3300".to_string(),
            request_timeout_secs: 20,
            theme: "dark".to_string(),
            mobile_breakpoint_columns: 100,
            user_name: None,
            user_email: None,
            content_locked: false,
        }
    }
}

impl Config {
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// A missing or blank file yields defaults. Unknown keys are accepted and
    /// logged at `warn`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys().filter(|k| !KNOWN_KEYS.contains(&k.as_str())) {
                tracing::warn!(key = %key, "Unknown key in config file, ignoring");
            }
        }

        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        tracing::info!(
            path = %path.display(),
            api_base_url = %config.api_base_url,
            theme = %config.theme,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Apply the environment override for the base URL, if set and non-empty.
    pub fn apply_env(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            tracing::debug!(env = API_URL_ENV, url = %url, "API base URL overridden from environment");
            self.api_base_url = url;
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "request_timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "api_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_config(name: &str, content: &str) -> (PathBuf, PathBuf) {
        let dir = std::env::temp_dir().join(format!("studynav_config_test_{}", name));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:3300");
        assert_eq!(config.request_timeout(), Duration::from_secs(20));
        assert_eq!(config.theme, "dark");
        assert_eq!(config.mobile_breakpoint_columns, 100);
        assert!(config.user_name.is_none());
        assert!(!config.content_locked);
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/studynav_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_whitespace_only_file_returns_default() {
        let (dir, path) = write_config("whitespace", "  \n\n ");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:3300");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_full_config() {
        let (dir, path) = write_config(
            "full",
            r#"
api_base_url = "https://catalogue.example.com"
request_timeout_secs = 5
theme = "light"
mobile_breakpoint_columns = 80
user_name = "Ravi"
user_email = "ravi@example.com"
content_locked = true
"#,
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api_base_url, "https://catalogue.example.com");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.theme, "light");
        assert_eq!(config.mobile_breakpoint_columns, 80);
        assert_eq!(config.user_name.as_deref(), Some("Ravi"));
        assert_eq!(config.user_email.as_deref(), Some("ravi@example.com"));
        assert!(config.content_locked);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let (dir, path) = write_config("partial", "content_locked = true\n");
        let config = Config::load(&path).unwrap();
        assert!(config.content_locked);
        assert_eq!(config.request_timeout_secs, 20);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let (dir, path) = write_config("invalid", "api_base_url = [oops");
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let (dir, path) = write_config("unknown", "theme = \"dark\"\nrefresh_minutes = 5\n");
        assert!(Config::load(&path).is_ok());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let (dir, path) = write_config("zero_timeout", "request_timeout_secs = 0\n");
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "request_timeout_secs",
                ..
            }
        ));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_too_large_file_rejected() {
        let (dir, path) = write_config("too_large", &"#".repeat(1_048_577));
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_env_override() {
        let mut config = Config::default();
        config.apply_env(Some("https://env.example.com".to_string()));
        assert_eq!(config.api_base_url, "https://env.example.com");

        config.apply_env(Some("   ".to_string()));
        assert_eq!(config.api_base_url, "https://env.example.com");

        config.apply_env(None);
        assert_eq!(config.api_base_url, "https://env.example.com");
    }
}
