use regex::Regex;
use std::env;

/// Expand environment variables in a string using ${VAR_NAME} syntax.
/// Unknown variables are left as written.
pub fn expand_env_var_in_string(value: &str) -> String {
    let Ok(re) = Regex::new(r"\$\{([^}]+)\}") else {
        return value.to_string();
    };

    let mut result = value.to_string();
    for cap in re.captures_iter(value) {
        let var_name = &cap[1];
        let replacement = env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name));
        result = result.replace(&cap[0], &replacement);
    }

    result
}

/// Base URLs must be absolute http(s) URLs
pub fn validate_base_url(url: &str) -> Result<(), String> {
    if crate::util::is_blank(url) {
        return Err("API base URL is empty".to_string());
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(format!("API base URL must start with http:// or https://: {}", url));
    }
    Ok(())
}
