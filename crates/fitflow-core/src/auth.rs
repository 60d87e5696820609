//! Identity handling.
//!
//! "Logged in" means exactly "a user id is present": every mutating
//! operation takes an [`AuthState`] and becomes a no-op when it is
//! [`AuthState::LoggedOut`]. The signed-in record persists across CLI
//! invocations -- user id and email in the local kv store, the access token
//! in the OS keyring.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::Database;

const AUTH_USER_KEY: &str = "auth_user";
const ACCESS_TOKEN_KEY: &str = "access_token";

/// Whether a user identity is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuthState {
    LoggedOut,
    LoggedIn { user_id: String },
}

impl AuthState {
    pub fn from_user_id(user_id: Option<String>) -> Self {
        match user_id {
            Some(user_id) => AuthState::LoggedIn { user_id },
            None => AuthState::LoggedOut,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            AuthState::LoggedIn { user_id } => Some(user_id),
            AuthState::LoggedOut => None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, AuthState::LoggedIn { .. })
    }
}

/// A signed-in backend session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user_id: String,
    pub email: String,
    #[serde(skip)]
    pub access_token: String,
}

impl AuthSession {
    pub fn state(&self) -> AuthState {
        AuthState::LoggedIn {
            user_id: self.user_id.clone(),
        }
    }
}

/// Thin wrapper around the OS keyring for the access token.
pub mod token_store {
    use crate::error::{CoreError, Result};

    const SERVICE: &str = "fitflow";

    pub fn get(key: &str) -> Result<Option<String>> {
        let entry = keyring::Entry::new(SERVICE, key)
            .map_err(|e| CoreError::Custom(e.to_string()))?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(CoreError::Custom(e.to_string())),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<()> {
        let entry = keyring::Entry::new(SERVICE, key)
            .map_err(|e| CoreError::Custom(e.to_string()))?;
        entry
            .set_password(value)
            .map_err(|e| CoreError::Custom(e.to_string()))?;
        Ok(())
    }

    pub fn delete(key: &str) -> Result<()> {
        let entry = keyring::Entry::new(SERVICE, key)
            .map_err(|e| CoreError::Custom(e.to_string()))?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(CoreError::Custom(e.to_string())),
        }
    }
}

/// Persists the signed-in session between CLI invocations.
pub struct AuthStore<'a> {
    db: &'a Database,
}

impl<'a> AuthStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// The stored session, if any. A missing keyring token still counts as
    /// signed in -- the id is the identity; the token is only needed for
    /// backend writes.
    pub fn load(&self) -> Result<Option<AuthSession>> {
        let Some(json) = self.db.kv_get(AUTH_USER_KEY)? else {
            return Ok(None);
        };
        let mut session: AuthSession = serde_json::from_str(&json)?;
        session.access_token = token_store::get(ACCESS_TOKEN_KEY)?.unwrap_or_default();
        Ok(Some(session))
    }

    pub fn state(&self) -> Result<AuthState> {
        Ok(AuthState::from_user_id(
            self.load()?.map(|s| s.user_id),
        ))
    }

    pub fn save(&self, session: &AuthSession) -> Result<()> {
        self.db
            .kv_set(AUTH_USER_KEY, &serde_json::to_string(session)?)?;
        token_store::set(ACCESS_TOKEN_KEY, &session.access_token)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.db.kv_delete(AUTH_USER_KEY)?;
        token_store::delete(ACCESS_TOKEN_KEY)?;
        Ok(())
    }
}
