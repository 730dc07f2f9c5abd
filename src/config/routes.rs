use super::defaults::{default_bad_request_route, default_landing_route, default_login_route};
use serde::{Deserialize, Serialize};

/// Navigation targets used by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Routes {
    #[serde(default = "default_login_route")]
    pub login: String,
    #[serde(default = "default_landing_route")]
    pub landing: String,
    #[serde(default = "default_bad_request_route")]
    pub bad_request: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            login: default_login_route(),
            landing: default_landing_route(),
            bad_request: default_bad_request_route(),
        }
    }
}
