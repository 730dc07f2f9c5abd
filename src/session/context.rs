use super::storage::KeyValueStore;
use crate::error::Result;
use crate::models::{AuthResponse, Session, SessionKey, TokenPair};
use crate::util::is_blank;
use chrono::Duration;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

pub const DEFAULT_SESSION_EXPIRY_DAYS: i64 = 30;

/// Injectable session state backed by a persistent store.
///
/// Every write goes to the store first and then to the in-memory copy,
/// both under the same write lock, so readers never observe a token pair
/// where one half is new and the other stale.
pub struct SessionContext {
    store: Arc<dyn KeyValueStore>,
    state: RwLock<Session>,
    expiry: Duration,
}

impl SessionContext {
    /// Load whatever session the store currently holds
    pub fn hydrate(store: Arc<dyn KeyValueStore>, expiry: Duration) -> Result<Self> {
        let read = |key: SessionKey| -> Result<Option<String>> {
            Ok(store.get(key.as_str())?.filter(|v| !is_blank(v)))
        };

        let access_token = read(SessionKey::AccessToken)?;
        let refresh_token = read(SessionKey::RefreshToken)?;
        let tokens = match (access_token, refresh_token) {
            (Some(access_token), Some(refresh_token)) => Some(TokenPair {
                access_token,
                refresh_token,
            }),
            (None, None) => None,
            _ => {
                debug!("dropping half-present token pair from store");
                None
            }
        };

        let session = Session {
            logged_in: read(SessionKey::LoggedIn)?.as_deref() == Some("true"),
            username: read(SessionKey::Username)?,
            role: read(SessionKey::Role)?,
            tokens,
        };

        Ok(Self {
            store,
            state: RwLock::new(session),
            expiry,
        })
    }

    pub fn with_default_expiry(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        Self::hydrate(store, Duration::days(DEFAULT_SESSION_EXPIRY_DAYS))
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    fn put(&self, key: SessionKey, value: &str) -> Result<()> {
        self.store.set(key.as_str(), value, self.expiry)
    }

    /// Persist a freshly authenticated session.
    ///
    /// If any write fails, the keys are removed again so the store never
    /// holds a partial login.
    pub fn establish(&self, username: &str, role: &str, auth: AuthResponse) -> Result<()> {
        let mut state = self.write();
        let fields = [
            (SessionKey::LoggedIn, "true"),
            (SessionKey::Username, username),
            (SessionKey::Role, role),
            (SessionKey::AccessToken, auth.access_token.as_str()),
            (SessionKey::RefreshToken, auth.refresh_token.as_str()),
        ];
        for (key, value) in fields {
            if let Err(e) = self.put(key, value) {
                warn!(key = key.as_str(), error = %e, "session write failed, rolling back");
                for key in SessionKey::ALL {
                    if let Err(e) = self.store.delete(key.as_str()) {
                        warn!(key = key.as_str(), error = %e, "rollback delete failed");
                    }
                }
                *state = Session::default();
                return Err(e);
            }
        }

        *state = Session {
            logged_in: true,
            username: Some(username.to_string()),
            role: Some(role.to_string()),
            tokens: Some(auth.into()),
        };
        Ok(())
    }

    /// Overwrite both tokens in place after a refresh
    pub fn replace_tokens(&self, tokens: TokenPair) -> Result<()> {
        let mut state = self.write();
        self.put(SessionKey::AccessToken, &tokens.access_token)?;
        self.put(SessionKey::RefreshToken, &tokens.refresh_token)?;
        state.tokens = Some(tokens);
        Ok(())
    }

    /// Clear every session field, in memory and in the store
    pub fn teardown(&self) -> Result<()> {
        let mut state = self.write();
        *state = Session::default();
        for key in SessionKey::ALL {
            self.store.delete(key.as_str())?;
        }
        Ok(())
    }

    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().access_token().map(str::to_string)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().refresh_token().map(str::to_string)
    }

    pub fn username(&self) -> Option<String> {
        self.read().username.clone()
    }

    pub fn role(&self) -> Option<String> {
        self.read().role.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.read().logged_in
    }
}
