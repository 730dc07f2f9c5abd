use super::storage::KeyValueStore;
use crate::error::{AuthRelayError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Every entry is scoped to the root path, like the cookies it replaces
pub const COOKIE_PATH: &str = "/";

#[derive(Serialize, Deserialize, Clone, Debug)]
struct Cookie {
    name: String,
    value: String,
    path: String,
    expires_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Default, Debug)]
struct CookieJar {
    #[serde(default)]
    cookies: Vec<Cookie>,
}

impl CookieJar {
    fn prune_expired(&mut self, now: DateTime<Utc>) -> bool {
        let before = self.cookies.len();
        self.cookies.retain(|c| c.expires_at > now);
        before != self.cookies.len()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.cookies
            .iter()
            .position(|c| c.name == name && c.path == COOKIE_PATH)
    }
}

/// Cookie-jar style store persisted as a single JSON file
pub struct FilesystemCookieStore {
    path: PathBuf,
    // Serializes read-modify-write cycles on the jar file
    guard: Mutex<()>,
}

impl FilesystemCookieStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    /// Store under the user cache directory (`~/.cache/authrelay/cookies.json`)
    pub fn in_cache_dir() -> Result<Self> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| AuthRelayError::StoreError("no cache directory available".to_string()))?;
        Ok(Self::new(cache_dir.join("authrelay").join("cookies.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<CookieJar> {
        if !self.path.exists() {
            return Ok(CookieJar::default());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(CookieJar::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, jar: &CookieJar) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(jar)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn with_jar<T>(&self, f: impl FnOnce(&mut CookieJar) -> (T, bool)) -> Result<T> {
        let _lock = self
            .guard
            .lock()
            .map_err(|_| AuthRelayError::StoreError("cookie jar lock poisoned".to_string()))?;
        let mut jar = self.load()?;
        let pruned = jar.prune_expired(Utc::now());
        let (value, dirty) = f(&mut jar);
        if dirty || pruned {
            self.save(&jar)?;
        }
        Ok(value)
    }
}

impl KeyValueStore for FilesystemCookieStore {
    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let cookie = Cookie {
            name: key.to_string(),
            value: value.to_string(),
            path: COOKIE_PATH.to_string(),
            expires_at: Utc::now() + ttl,
        };
        self.with_jar(|jar| {
            match jar.position(key) {
                Some(idx) => jar.cookies[idx] = cookie,
                None => jar.cookies.push(cookie),
            }
            ((), true)
        })
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_jar(|jar| {
            let value = jar.position(key).map(|idx| jar.cookies[idx].value.clone());
            (value, false)
        })
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.with_jar(|jar| match jar.position(key) {
            Some(idx) => {
                jar.cookies.remove(idx);
                ((), true)
            }
            None => ((), false),
        })
    }
}
