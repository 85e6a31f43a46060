//! Login Flow
//!
//! Exchanges credentials for a token pair, persists it, and signs out.

use crate::api::PortalApi;
use crate::busy::BusyFlag;
use crate::config::PortalConfig;
use crate::error::AuthError;
use crate::models::Credentials;
use crate::session::{gate, Access, Session, SessionStore};

pub struct Authenticator<A, S> {
    api: A,
    store: S,
    config: PortalConfig,
    busy: BusyFlag,
}

impl<A: PortalApi, S: SessionStore> Authenticator<A, S> {
    pub fn new(api: A, store: S, config: PortalConfig) -> Self {
        Self {
            api,
            store,
            config,
            busy: BusyFlag::default(),
        }
    }

    /// Current gate decision (token presence only)
    pub fn access(&self) -> Access {
        gate(&self.store, &self.config)
    }

    pub fn is_signing_in(&self) -> bool {
        self.busy.is_busy()
    }

    /// Exchange credentials and persist both tokens.
    ///
    /// Every rejection is reported as `InvalidCredentials`; the detail only
    /// goes to the log.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        if !credentials.is_complete() {
            return Err(AuthError::MissingCredentials);
        }
        let _guard = self.busy.try_acquire().ok_or(AuthError::InProgress)?;

        match self.api.login(credentials).await {
            Ok(tokens) if !tokens.access.is_empty() => {
                log::info!("signed in as '{}'", credentials.username);
                Ok(Session::persist(&tokens, &self.store, &self.config))
            }
            Ok(_) => {
                log::warn!("login response carried no access token");
                Err(AuthError::InvalidCredentials)
            }
            Err(err) => {
                log::warn!("login rejected: {err}");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Drop both tokens
    pub fn sign_out(&self) {
        Session::clear(&self.store, &self.config);
        log::info!("signed out");
    }
}
