pub mod auth;
pub mod client;
pub mod download;
pub mod gateway;
pub mod refresh;
pub mod response;

pub use client::{ApiClient, Payload};
pub use download::DownloadedFile;
pub use gateway::Gateway;
pub use response::ApiResponse;
