pub fn default_timeout_secs() -> u64 {
    30
}

pub fn default_expiry_days() -> i64 {
    crate::session::DEFAULT_SESSION_EXPIRY_DAYS
}

pub fn default_login_route() -> String {
    "/login".to_string()
}

pub fn default_landing_route() -> String {
    "/dashboard".to_string()
}

pub fn default_bad_request_route() -> String {
    "/bad-request".to_string()
}
