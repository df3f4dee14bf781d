use super::types::{ProfileUpdate, Session, UserProfile};
use crate::error::SessionError;
use anyhow::Result;
use std::sync::RwLock;

/// Local holder of the signed-in session.
///
/// The stored profile changes only through [`SessionStore::commit`] (a
/// field-level merge) or [`SessionStore::begin`] (a new session replaces the
/// old one wholesale).
pub trait SessionStore: Send + Sync {
    fn current_user(&self) -> Option<UserProfile>;

    fn token(&self) -> Option<String>;

    /// Replace whatever session is held with `session`.
    fn begin(&self, session: Session) -> Result<()>;

    /// Merge `update` into the stored profile and return the merged result.
    fn commit(&self, update: ProfileUpdate) -> Result<UserProfile>;

    /// Drop the session. Ending when nobody is signed in is not an error.
    fn end(&self) -> Result<()>;
}

/// Process-local store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

pub(super) fn poisoned() -> SessionError {
    SessionError::Store("session lock poisoned".into())
}

impl SessionStore for MemorySessionStore {
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
        *guard = Some(session);
        Ok(())
    }

    fn commit(&self, update: ProfileUpdate) -> Result<UserProfile> {
        let mut guard = self.session.write().map_err(|_| poisoned())?;
        let session = guard.as_mut().ok_or(SessionError::NotSignedIn)?;
        session.user.apply(update);
        Ok(session.user.clone())
    }

    fn end(&self) -> Result<()> {
        let mut guard = self.session.write().map_err(|_| poisoned())?;
        *guard = None;
        Ok(())
    }
}
