use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login`
#[derive(Serialize, Debug, Clone)]
pub struct LoginRequest {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
}

/// Body of `POST /auth/refresh-token`
#[derive(Serialize, Debug, Clone)]
pub struct RefreshRequest {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "RefreshToken")]
    pub refresh_token: String,
}

/// Credential pair returned by the login and refresh endpoints
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
}
