mod context;
mod filesystem;
mod memory;
mod storage;

pub use context::{SessionContext, DEFAULT_SESSION_EXPIRY_DAYS};
pub use filesystem::{FilesystemCookieStore, COOKIE_PATH};
pub use memory::MemoryStore;
pub use storage::KeyValueStore;
