mod auth;
mod session;

pub use auth::{AuthResponse, LoginRequest, RefreshRequest};
pub use session::{Session, SessionKey, TokenPair};
