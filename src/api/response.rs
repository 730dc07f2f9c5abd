use crate::error::{AuthRelayError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Status and decoded body of a server answer
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub async fn from_response(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        Ok(Self {
            status,
            body: decode_body(&bytes),
        })
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Hand back successes; turn anything else into `RequestFailed`
    pub fn into_result(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(AuthRelayError::RequestFailed {
                status: self.status,
                body: self.body,
            })
        }
    }

    /// Decode the body into a typed value
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.body.clone())?)
    }
}

/// JSON bodies are parsed, anything else is kept as text, empty is `null`
pub fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
