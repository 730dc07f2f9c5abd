pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod ui;
pub mod util;

pub use api::{ApiClient, ApiResponse, DownloadedFile, Gateway};
pub use error::{AuthRelayError, Result};
pub use session::{KeyValueStore, SessionContext};
