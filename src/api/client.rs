use super::response::ApiResponse;
use crate::error::{AuthRelayError, Result};
use crate::util::to_multipart_form;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use std::time::Duration;

/// What goes in the request body
#[derive(Debug, Clone)]
pub enum Payload {
    Empty,
    Json(Value),
    /// Flat object sent as multipart form fields
    Form(Value),
}

/// Thin transport over `reqwest` rooted at the API base URL
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Build a request, attaching `Authorization: Bearer <token>` when given one
    pub fn request(
        &self,
        method: Method,
        path: &str,
        payload: &Payload,
        bearer: Option<&str>,
    ) -> Result<RequestBuilder> {
        let mut builder = self.http.request(method, self.url(path));

        if let Some(token) = bearer {
            let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
                AuthRelayError::Other(format!("Invalid authorization header: {}", e))
            })?;
            builder = builder.header(AUTHORIZATION, value);
        }

        builder = match payload {
            Payload::Empty => builder,
            Payload::Json(body) => builder.json(body),
            Payload::Form(fields) => builder.multipart(to_multipart_form(fields)?),
        };
        Ok(builder)
    }

    pub async fn send(
        &self,
        method: Method,
        path: &str,
        payload: &Payload,
        bearer: Option<&str>,
    ) -> Result<ApiResponse> {
        let response = self.request(method, path, payload, bearer)?.send().await?;
        ApiResponse::from_response(response).await
    }
}
