pub mod schema;

pub use schema::{ApiConfig, AvatarConfig, LoggingConfig, SessionConfig};

use crate::error::ConfigError;
use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Data directory (session file lives here) - computed, not serialized
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Path to config.toml - computed, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub avatar: AvatarConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load `~/.bookwise/config.toml`, writing defaults on first run.
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Self::load_or_init_in(&home.join(".bookwise"))
    }

    /// Same as [`Config::load_or_init`] rooted at an explicit directory.
    pub fn load_or_init_in(bookwise_dir: &Path) -> Result<Self> {
        let config_path = bookwise_dir.join("config.toml");

        if !bookwise_dir.exists() {
            fs::create_dir_all(bookwise_dir).context("Failed to create .bookwise directory")?;
        }

        let mut config = if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            toml::from_str::<Config>(&contents).context("Failed to parse config file")?
        } else {
            Self::default()
        };

        // Set computed paths that are skipped during serialization
        config.config_path.clone_from(&config_path);
        config.data_dir = bookwise_dir.to_path_buf();

        if !config_path.exists() {
            config.save()?;
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).with_context(|| {
            format!("Failed to write config file: {}", self.config_path.display())
        })?;
        Ok(())
    }

    /// Apply environment variable overrides to config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    pub(crate) fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // API base URL: BOOKWISE_API_URL
        if let Some(url) = lookup("BOOKWISE_API_URL").filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }

        // Log level: BOOKWISE_LOG
        if let Some(level) = lookup("BOOKWISE_LOG").filter(|v| !v.trim().is_empty()) {
            self.logging.level = level.trim().to_string();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = Url::parse(&self.api.base_url).map_err(|error| {
            ConfigError::Validation(format!(
                "api.base_url '{}' is not a valid URL: {error}",
                self.api.base_url
            ))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "api.base_url must use http or https, got '{}'",
                base.scheme()
            )));
        }
        if self.api.timeout_secs == 0 || self.api.connect_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api timeouts must be greater than zero".into(),
            ));
        }
        if self.avatar.max_bytes == 0 {
            return Err(ConfigError::Validation(
                "avatar.max_bytes must be greater than zero".into(),
            ));
        }
        if self.logging.tracing_level().is_none() {
            return Err(ConfigError::Validation(format!(
                "logging.level '{}' is not one of error, warn, info, debug, trace",
                self.logging.level
            )));
        }
        Ok(())
    }

    pub fn session_path(&self) -> PathBuf {
        self.session.resolve_path(&self.data_dir)
    }
}
