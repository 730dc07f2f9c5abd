mod api;
mod defaults;
mod routes;
mod session;
mod validation;

use crate::cli::Args;
use crate::error::{AuthRelayError, Result as AppResult};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

pub use api::ApiConfig;
pub use routes::Routes;
pub use session::{DownloadConfig, SessionConfig};
pub use validation::{expand_env_var_in_string, validate_base_url};

pub struct Config {
    pub base_url: String,
    pub timeout_secs: u64,
    pub session_expiry_days: i64,
    pub store_path: Option<PathBuf>,
    pub routes: Routes,
    pub download_dir: PathBuf,
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JsonConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub routes: Routes,
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub verbose: Option<bool>,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> AppResult<Self> {
        let json_config = JsonConfig::load()?;
        Self::resolve(args, json_config)
    }

    /// Merge sources: CLI args > env vars > config file > defaults
    pub fn resolve(args: &Args, json_config: JsonConfig) -> AppResult<Self> {
        let base_url = args
            .base_url
            .clone()
            .or_else(|| env::var("AUTHRELAY_BASE_URL").ok())
            .or(json_config.api.base_url.clone())
            .map(|url| expand_env_var_in_string(&url))
            .ok_or_else(|| {
                AuthRelayError::ConfigError(
                    "API base URL not set (use --base-url, AUTHRELAY_BASE_URL or api.base_url)"
                        .to_string(),
                )
            })?;
        validate_base_url(&base_url).map_err(AuthRelayError::ConfigError)?;

        let timeout_secs = env::var("AUTHRELAY_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .or(json_config.api.timeout_secs)
            .unwrap_or_else(defaults::default_timeout_secs);

        let session_expiry_days = json_config
            .session
            .expiry_days
            .filter(|days| *days > 0)
            .unwrap_or_else(defaults::default_expiry_days);

        let store_path = json_config
            .session
            .store_path
            .as_deref()
            .map(expand_env_var_in_string)
            .map(PathBuf::from);

        let download_dir = args
            .download_dir
            .clone()
            .or(json_config.download.dir.as_deref().map(expand_env_var_in_string))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let verbose = args.verbose
            || env::var("AUTHRELAY_VERBOSE")
                .ok()
                .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
                .or(json_config.verbose)
                .unwrap_or(false);

        Ok(Config {
            base_url,
            timeout_secs,
            session_expiry_days,
            store_path,
            routes: json_config.routes,
            download_dir,
            verbose,
        })
    }
}

impl JsonConfig {
    pub fn load() -> Result<Self> {
        for path in Self::get_config_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        // No config file found, return default
        Ok(JsonConfig::default())
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );
        let config: JsonConfig = if is_yaml {
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config file: {}", path.display()))?
        } else {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config file: {}", path.display()))?
        };

        Ok(config)
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".authrelay.yaml"),
            PathBuf::from(".authrelay.yml"),
            PathBuf::from(".authrelay.json"),
        ];

        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("authrelay");
            paths.push(config_dir.join("authrelay.yaml"));
            paths.push(config_dir.join("authrelay.yml"));
            paths.push(config_dir.join("authrelay.json"));
        }

        paths
    }
}
