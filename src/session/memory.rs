use super::storage::KeyValueStore;
use crate::error::{AuthRelayError, Result};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Process-local store. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, (String, DateTime<Utc>)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, (String, DateTime<Utc>)>>> {
        self.entries
            .lock()
            .map_err(|_| AuthRelayError::StoreError("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let expires_at = Utc::now() + ttl;
        self.entries()?
            .insert(key.to_string(), (value.to_string(), expires_at));
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.entries()?;
        let expired = match entries.get(key) {
            Some((_, expires_at)) => *expires_at <= Utc::now(),
            None => return Ok(None),
        };
        if expired {
            entries.remove(key);
            return Ok(None);
        }
        Ok(entries.get(key).map(|(value, _)| value.clone()))
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}
