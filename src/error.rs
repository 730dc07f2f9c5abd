use serde_json::Value;
use std::fmt;

#[derive(Debug)]
pub enum AuthRelayError {
    /// Non-2xx from an authorized request (or from its single retry)
    RequestFailed {
        status: u16,
        body: Value,
    },
    /// The refresh endpoint rejected the refresh token; the session is gone
    ReauthenticationRequired {
        status: u16,
        body: Value,
    },
    /// The refresh endpoint failed for any other reason; the session is kept
    RefreshFailed {
        status: u16,
        body: Value,
    },
    ConfigError(String),
    StoreError(String),
    NetworkError(reqwest::Error),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    YamlError(serde_yaml::Error),
    Other(String),
}

impl AuthRelayError {
    /// HTTP status carried by the failure, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            AuthRelayError::RequestFailed { status, .. }
            | AuthRelayError::ReauthenticationRequired { status, .. }
            | AuthRelayError::RefreshFailed { status, .. } => Some(*status),
            AuthRelayError::NetworkError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Error payload returned by the server
    pub fn body(&self) -> Option<&Value> {
        match self {
            AuthRelayError::RequestFailed { body, .. }
            | AuthRelayError::ReauthenticationRequired { body, .. }
            | AuthRelayError::RefreshFailed { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn requires_login(&self) -> bool {
        matches!(self, AuthRelayError::ReauthenticationRequired { .. })
    }
}

impl fmt::Display for AuthRelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthRelayError::RequestFailed { status, body } => {
                write!(f, "Request failed (status {}): {}", status, body)
            }
            AuthRelayError::ReauthenticationRequired { status, .. } => {
                write!(f, "Session expired, please log in again (status {})", status)
            }
            AuthRelayError::RefreshFailed { status, body } => {
                write!(f, "Token refresh failed (status {}): {}", status, body)
            }
            AuthRelayError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AuthRelayError::StoreError(msg) => write!(f, "Session store error: {}", msg),
            AuthRelayError::NetworkError(e) => write!(f, "Network error: {}", e),
            AuthRelayError::IoError(e) => write!(f, "IO error: {}", e),
            AuthRelayError::JsonError(e) => write!(f, "JSON error: {}", e),
            AuthRelayError::YamlError(e) => write!(f, "YAML error: {}", e),
            AuthRelayError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AuthRelayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthRelayError::NetworkError(e) => Some(e),
            AuthRelayError::IoError(e) => Some(e),
            AuthRelayError::JsonError(e) => Some(e),
            AuthRelayError::YamlError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AuthRelayError {
    fn from(err: reqwest::Error) -> Self {
        AuthRelayError::NetworkError(err)
    }
}

impl From<std::io::Error> for AuthRelayError {
    fn from(err: std::io::Error) -> Self {
        AuthRelayError::IoError(err)
    }
}

impl From<serde_json::Error> for AuthRelayError {
    fn from(err: serde_json::Error) -> Self {
        AuthRelayError::JsonError(err)
    }
}

impl From<serde_yaml::Error> for AuthRelayError {
    fn from(err: serde_yaml::Error) -> Self {
        AuthRelayError::YamlError(err)
    }
}

impl From<anyhow::Error> for AuthRelayError {
    fn from(err: anyhow::Error) -> Self {
        AuthRelayError::Other(format!("{:#}", err))
    }
}

impl From<String> for AuthRelayError {
    fn from(msg: String) -> Self {
        AuthRelayError::Other(msg)
    }
}

impl From<&str> for AuthRelayError {
    fn from(msg: &str) -> Self {
        AuthRelayError::Other(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AuthRelayError>;
