use super::store::{SessionStore, poisoned};
use super::types::{ProfileUpdate, Session, UserProfile};
use crate::error::SessionError;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::debug;

/// Session store persisted as a JSON file.
///
/// Every write goes to disk before it becomes visible in memory, so a failed
/// write leaves both the file and the cached session as they were.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    session: RwLock<Option<Session>>,
}

impl FileSessionStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let session = Self::load_from_disk(&path)?;
        debug!(path = %path.display(), signed_in = session.is_some(), "opened session store");
        Ok(Self {
            path,
            session: RwLock::new(session),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_from_disk(path: &Path) -> Result<Option<Session>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file: {}", path.display()))?;
        let session: Session = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session file: {}", path.display()))?;
        Ok(Some(session))
    }

    fn save_to_disk(&self, session: &Session) -> Result<()> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).with_context(|| {
            format!(
                "Failed to create session directory: {}",
                parent.display()
            )
        })?;

        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write session file: {}", self.path.display()))?;

        // The file carries the bearer token.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).with_context(
                || {
                    format!(
                        "Failed to set session file permissions on '{}': expected 0600",
                        self.path.display()
                    )
                },
            )?;
        }

        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn current_user(&self) -> Option<UserProfile> {
        let guard = self.session.read().ok()?;
        guard.as_ref().map(|session| session.user.clone())
    }

    fn token(&self) -> Option<String> {
        let guard = self.session.read().ok()?;
        guard.as_ref().map(|session| session.token.clone())
    }

    fn begin(&self, session: Session) -> Result<()> {
        let mut guard = self.session.write().map_err(|_| poisoned())?;
        self.save_to_disk(&session)?;
        *guard = Some(session);
        Ok(())
    }

    fn commit(&self, update: ProfileUpdate) -> Result<UserProfile> {
        let mut guard = self.session.write().map_err(|_| poisoned())?;
        let mut merged = guard.as_ref().cloned().ok_or(SessionError::NotSignedIn)?;
        merged.user.apply(update);
        self.save_to_disk(&merged)?;
        let user = merged.user.clone();
        *guard = Some(merged);
        Ok(user)
    }

    fn end(&self) -> Result<()> {
        let mut guard = self.session.write().map_err(|_| poisoned())?;
        if self.path.exists() {
            fs::remove_file(&self.path).with_context(|| {
                format!("Failed to remove session file: {}", self.path.display())
            })?;
        }
        *guard = None;
        Ok(())
    }
}
