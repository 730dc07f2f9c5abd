use super::client::Payload;
use super::gateway::Gateway;
use super::response::ApiResponse;
use crate::error::Result;
use crate::models::LoginRequest;
use reqwest::Method;
use tracing::info;

pub const LOGIN_PATH: &str = "/auth/login";

impl Gateway {
    /// Send credentials to the login endpoint and return the raw answer.
    ///
    /// Nothing is persisted here: callers inspect the response and call
    /// `SessionContext::establish` themselves. Refresh, by contrast,
    /// persists on its own.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<ApiResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let body = serde_json::to_value(&request)?;
        let response = self
            .client
            .send(Method::POST, LOGIN_PATH, &Payload::Json(body), None)
            .await?;
        info!(username, status = response.status, "login attempted");
        Ok(response)
    }

    /// Clear every session field, then reload
    pub fn logout(&self) -> Result<()> {
        self.session.teardown()?;
        info!("logged out");
        self.navigator.reload();
        Ok(())
    }

    /// Redirect to the landing route when the login flag is set.
    ///
    /// Token freshness is not checked. Returns whether a redirect happened.
    pub fn auto_login(&self) -> bool {
        if self.session.is_logged_in() {
            self.navigator.redirect(&self.routes.landing);
            true
        } else {
            false
        }
    }
}
