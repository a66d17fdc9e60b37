use super::types::{ApiError, Session};
use std::cell::RefCell;
use thiserror::Error;

pub const SESSION_STORAGE_KEY: &str = "mindhaven.auth.session";

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to access session storage")]
    Access,
    #[error("stored session is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl From<SessionStoreError> for ApiError {
    fn from(error: SessionStoreError) -> Self {
        ApiError::unknown(error.to_string())
    }
}

/// Persistence for the current session so that a reload restores it.
pub trait SessionStore {
    fn load(&self) -> Result<Option<Session>, SessionStoreError>;
    fn save(&self, session: &Session) -> Result<(), SessionStoreError>;
    fn clear(&self) -> Result<(), SessionStoreError>;
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: RefCell<Option<Session>>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        *self.slot.borrow_mut() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        self.slot.borrow_mut().take();
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct BrowserSessionStore {
    key: String,
}

impl Default for BrowserSessionStore {
    fn default() -> Self {
        Self {
            key: SESSION_STORAGE_KEY.to_string(),
        }
    }
}

impl SessionStore for BrowserSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        let storage = crate::utils::storage::local_storage().map_err(SessionStoreError::Unavailable)?;
        let raw = storage
            .get_item(&self.key)
            .map_err(|_| SessionStoreError::Access)?;
        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        let storage = crate::utils::storage::local_storage().map_err(SessionStoreError::Unavailable)?;
        let raw = serde_json::to_string(session)?;
        storage
            .set_item(&self.key, &raw)
            .map_err(|_| SessionStoreError::Access)
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        let storage = crate::utils::storage::local_storage().map_err(SessionStoreError::Unavailable)?;
        storage
            .remove_item(&self.key)
            .map_err(|_| SessionStoreError::Access)
    }
}

#[cfg(target_arch = "wasm32")]
pub fn default_store() -> Box<dyn SessionStore> {
    Box::new(BrowserSessionStore::default())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn default_store() -> Box<dyn SessionStore> {
    Box::new(MemorySessionStore::default())
}
