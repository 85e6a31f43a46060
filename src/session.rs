//! Session Store and Auth Gate
//!
//! Tokens persist in a key/value store (browser `localStorage` in the app).
//! The loaded `Session` is passed explicitly to every authenticated call.

use std::fmt;

use crate::config::PortalConfig;
use crate::models::TokenPair;

/// Persistent string key/value storage
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Authenticated session: the bearer token plus the stored refresh token
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    access: String,
    refresh: Option<String>,
}

impl Session {
    pub fn new(access: impl Into<String>, refresh: Option<String>) -> Self {
        Self {
            access: access.into(),
            refresh,
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access
    }

    /// Persisted but never used to renew the access token
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh.as_deref()
    }

    /// Presence check only; expiry is discovered when the server says 401
    pub fn load(store: &dyn SessionStore, config: &PortalConfig) -> Option<Self> {
        let access = store.get(config.access_key).filter(|token| !token.is_empty())?;
        let refresh = store.get(config.refresh_key).filter(|token| !token.is_empty());
        Some(Self { access, refresh })
    }

    /// Persist a freshly issued token pair
    pub fn persist(tokens: &TokenPair, store: &dyn SessionStore, config: &PortalConfig) -> Self {
        store.set(config.access_key, &tokens.access);
        if tokens.refresh.is_empty() {
            store.remove(config.refresh_key);
        } else {
            store.set(config.refresh_key, &tokens.refresh);
        }
        Self::new(
            tokens.access.clone(),
            Some(tokens.refresh.clone()).filter(|token| !token.is_empty()),
        )
    }

    /// Remove both tokens
    pub fn clear(store: &dyn SessionStore, config: &PortalConfig) {
        store.remove(config.access_key);
        store.remove(config.refresh_key);
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access", &"<redacted>")
            .field("has_refresh", &self.refresh.is_some())
            .finish()
    }
}

/// Auth gate decision for the protected view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Allow(Session),
    Deny,
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allow(_))
    }
}

/// Decide whether the dashboard is reachable. No side effects.
pub fn gate(store: &dyn SessionStore, config: &PortalConfig) -> Access {
    match Session::load(store, config) {
        Some(session) => Access::Allow(session),
        None => Access::Deny,
    }
}

/// `window.localStorage`, behaving as an empty store when unavailable
/// (private browsing, storage disabled)
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                log::warn!("localStorage unavailable: {err:?}");
                None
            }
        }
    }
}

impl SessionStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("failed to write '{key}' to localStorage");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
