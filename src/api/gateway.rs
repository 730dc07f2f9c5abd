use super::client::{ApiClient, Payload};
use super::refresh::{refresh_tokens, AUTH_REJECTED};
use super::response::ApiResponse;
use crate::config::{Config, Routes};
use crate::error::{AuthRelayError, Result};
use crate::session::SessionContext;
use crate::ui::Navigator;
use reqwest::Method;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// Sends authorized requests and recovers once from an expired access token.
///
/// Each call resolves to exactly one `Result`. A 401 triggers a single
/// refresh followed by a single retry; whatever the retry returns is final.
pub struct Gateway {
    pub(crate) client: ApiClient,
    pub(crate) session: Arc<SessionContext>,
    pub(crate) navigator: Arc<dyn Navigator>,
    pub(crate) routes: Routes,
    pub(crate) download_dir: PathBuf,
    // Only one refresh in flight; late arrivals reuse its result.
    // Holds the status and body of the last rejected refresh.
    refresh_gate: Mutex<Option<(u16, Value)>>,
}

impl Gateway {
    pub fn new(
        client: ApiClient,
        session: Arc<SessionContext>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            client,
            session,
            navigator,
            routes: Routes::default(),
            download_dir: PathBuf::from("."),
            refresh_gate: Mutex::new(None),
        }
    }

    pub fn from_config(
        config: &Config,
        session: Arc<SessionContext>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let client = ApiClient::new(&config.base_url, Duration::from_secs(config.timeout_secs))?;
        Ok(Self::new(client, session, navigator)
            .with_routes(config.routes.clone())
            .with_download_dir(config.download_dir.clone()))
    }

    pub fn with_routes(mut self, routes: Routes) -> Self {
        self.routes = routes;
        self
    }

    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.execute(Method::GET, path, Payload::Empty).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<ApiResponse> {
        self.execute(Method::POST, path, Payload::Json(body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> Result<ApiResponse> {
        self.execute(Method::PUT, path, Payload::Json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.execute(Method::DELETE, path, Payload::Empty).await
    }

    /// POST a flat object as multipart form fields
    pub async fn post_form(&self, path: &str, fields: Value) -> Result<ApiResponse> {
        self.execute(Method::POST, path, Payload::Form(fields)).await
    }

    async fn execute(&self, method: Method, path: &str, payload: Payload) -> Result<ApiResponse> {
        let sent_token = self.session.access_token();
        debug!(%method, path, "sending authorized request");
        let response = self
            .client
            .send(method.clone(), path, &payload, sent_token.as_deref())
            .await?;

        if response.status != AUTH_REJECTED.as_u16() {
            return response.into_result();
        }

        debug!(%method, path, "authorization rejected, refreshing credentials");
        let token = self.recover(sent_token.as_deref()).await?;

        debug!(%method, path, "retrying with refreshed access token");
        // A second rejection here is final; no further refresh
        self.client
            .send(method, path, &payload, Some(&token))
            .await?
            .into_result()
    }

    /// Obtain a usable access token after `rejected` was refused
    async fn recover(&self, rejected: Option<&str>) -> Result<String> {
        let mut last_rejection = self.refresh_gate.lock().await;

        match self.session.access_token() {
            Some(current) if Some(current.as_str()) != rejected => {
                debug!("access token already refreshed by a concurrent request");
                return Ok(current);
            }
            None if rejected.is_some() => {
                // Another request's refresh was rejected and cleared the session
                let (status, body) = last_rejection
                    .clone()
                    .unwrap_or((AUTH_REJECTED.as_u16(), Value::Null));
                return Err(AuthRelayError::ReauthenticationRequired { status, body });
            }
            _ => {}
        }

        match refresh_tokens(&self.client, &self.session).await {
            Ok(tokens) => {
                *last_rejection = None;
                Ok(tokens.access_token)
            }
            Err(e) => {
                match &e {
                    AuthRelayError::ReauthenticationRequired { status, body } => {
                        *last_rejection = Some((*status, body.clone()));
                        self.navigator.redirect(&self.routes.login)
                    }
                    AuthRelayError::RefreshFailed { .. } => {
                        self.navigator.redirect(&self.routes.bad_request)
                    }
                    _ => {}
                }
                Err(e)
            }
        }
    }
}
