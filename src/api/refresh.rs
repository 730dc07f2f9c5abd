use super::client::{ApiClient, Payload};
use crate::error::{AuthRelayError, Result};
use crate::models::{AuthResponse, RefreshRequest, TokenPair};
use crate::session::SessionContext;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{info, warn};

pub const REFRESH_PATH: &str = "/auth/refresh-token";

/// Status the server uses to reject credentials
pub const AUTH_REJECTED: StatusCode = StatusCode::UNAUTHORIZED;

/// Exchange the stored refresh token for a new pair.
///
/// Never retries. A 401 tears the session down and yields
/// `ReauthenticationRequired`; any other failure yields `RefreshFailed`
/// and leaves the session alone.
pub async fn refresh_tokens(client: &ApiClient, session: &SessionContext) -> Result<TokenPair> {
    let Some(refresh_token) = session.refresh_token() else {
        warn!("no refresh token stored, session must be re-established");
        session.teardown()?;
        return Err(AuthRelayError::ReauthenticationRequired {
            status: AUTH_REJECTED.as_u16(),
            body: Value::Null,
        });
    };

    let request = RefreshRequest {
        username: session.username().unwrap_or_default(),
        refresh_token,
    };
    let body = serde_json::to_value(&request)?;
    let response = client
        .send(Method::POST, REFRESH_PATH, &Payload::Json(body), None)
        .await?;

    if response.is_success() {
        let tokens: TokenPair = match response.json::<AuthResponse>() {
            Ok(auth) => auth.into(),
            Err(e) => {
                warn!(error = %e, "refresh response did not carry a token pair");
                return Err(AuthRelayError::RefreshFailed {
                    status: response.status,
                    body: response.body,
                });
            }
        };
        session.replace_tokens(tokens.clone())?;
        info!("access token refreshed");
        return Ok(tokens);
    }

    if response.status == AUTH_REJECTED.as_u16() {
        warn!("refresh token rejected, clearing session");
        session.teardown()?;
        return Err(AuthRelayError::ReauthenticationRequired {
            status: response.status,
            body: response.body,
        });
    }

    warn!(status = response.status, "token refresh failed");
    Err(AuthRelayError::RefreshFailed {
        status: response.status,
        body: response.body,
    })
}
