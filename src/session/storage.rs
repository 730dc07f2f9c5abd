use crate::error::Result;
use chrono::Duration;

/// Keyed string storage with per-write expiry, the way a browser cookie
/// jar behaves. Values are opaque; nothing is validated here.
pub trait KeyValueStore: Send + Sync {
    /// Write a value, silently replacing any existing one
    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Read a value; expired or missing keys yield `None`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Remove a value; removing a missing key is not an error
    fn delete(&self, key: &str) -> Result<()>;
}
