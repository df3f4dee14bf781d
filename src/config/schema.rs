use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ── Remote API ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the booking API (default: http://localhost:3333)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Connection timeout in seconds (default: 10)
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3333".into()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

// ── Session persistence ──────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session file; `~` is expanded. Defaults to `session.json` in the data dir.
    #[serde(default)]
    pub path: Option<String>,
}

impl SessionConfig {
    pub fn resolve_path(&self, data_dir: &Path) -> PathBuf {
        match self.path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => PathBuf::from(shellexpand::tilde(path).into_owned()),
            _ => data_dir.join("session.json"),
        }
    }
}

// ── Avatar upload ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarConfig {
    /// Largest image accepted for upload, in bytes (default: 5 MiB)
    #[serde(default = "default_avatar_max_bytes")]
    pub max_bytes: usize,
}

fn default_avatar_max_bytes() -> usize {
    5 * 1024 * 1024
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_avatar_max_bytes(),
        }
    }
}

// ── Logging ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of: error, warn, info, debug, trace (default: warn)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    pub fn tracing_level(&self) -> Option<tracing::Level> {
        self.level.trim().parse().ok()
    }
}
