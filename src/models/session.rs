use super::AuthResponse;

/// Persisted session fields, named by their store key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKey {
    LoggedIn,
    Username,
    Role,
    AccessToken,
    RefreshToken,
}

impl SessionKey {
    pub const ALL: [SessionKey; 5] = [
        SessionKey::LoggedIn,
        SessionKey::Username,
        SessionKey::Role,
        SessionKey::AccessToken,
        SessionKey::RefreshToken,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKey::LoggedIn => "is_loggedin",
            SessionKey::Username => "logged_user",
            SessionKey::Role => "role",
            SessionKey::AccessToken => "access_token",
            SessionKey::RefreshToken => "refresh_token",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<AuthResponse> for TokenPair {
    fn from(resp: AuthResponse) -> Self {
        Self {
            access_token: resp.access_token,
            refresh_token: resp.refresh_token,
        }
    }
}

/// In-memory view of the persisted session.
///
/// Tokens live together in one `Option` so a half-authenticated
/// session cannot be represented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub logged_in: bool,
    pub username: Option<String>,
    pub role: Option<String>,
    pub tokens: Option<TokenPair>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_some()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.access_token.as_str())
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.refresh_token.as_str())
    }
}
