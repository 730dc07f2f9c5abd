use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub expiry_days: Option<i64>,
    #[serde(default)]
    pub store_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DownloadConfig {
    #[serde(default)]
    pub dir: Option<String>,
}
