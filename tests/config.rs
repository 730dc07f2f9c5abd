use authrelay::cli::Args;
use authrelay::config::{expand_env_var_in_string, Config, JsonConfig, Routes};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_args_override_file() {
    let json_config: JsonConfig = serde_json::from_str(
        r#"{"api": {"base_url": "https://file.example.com", "timeout_secs": 12}}"#,
    )
    .unwrap();
    let args = Args {
        base_url: Some("https://cli.example.com/".to_string()),
        download_dir: Some("/tmp/exports".to_string()),
        ..Args::default()
    };

    let config = Config::resolve(&args, json_config).unwrap();
    assert_eq!(config.base_url, "https://cli.example.com/");
    assert_eq!(config.session_expiry_days, 30);
    assert_eq!(config.routes, Routes::default());
    assert_eq!(config.download_dir, PathBuf::from("/tmp/exports"));
}

#[test]
fn test_invalid_base_url_rejected() {
    let args = Args {
        base_url: Some("ftp://example.com".to_string()),
        ..Args::default()
    };
    assert!(Config::resolve(&args, JsonConfig::default()).is_err());
}

#[test]
fn test_load_yaml_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("authrelay.yaml");
    fs::write(
        &path,
        "api:\n  base_url: https://api.example.com\nsession:\n  expiry_days: 7\nroutes:\n  login: /signin\n",
    )
    .unwrap();

    let json_config = JsonConfig::load_from(&path).unwrap();
    assert_eq!(json_config.api.base_url.as_deref(), Some("https://api.example.com"));
    assert_eq!(json_config.routes.login, "/signin");
    assert_eq!(json_config.routes.landing, "/dashboard");

    let config = Config::resolve(&Args::default(), json_config);
    // AUTHRELAY_BASE_URL, when set, wins over the file
    if std::env::var("AUTHRELAY_BASE_URL").is_err() {
        let config = config.unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.session_expiry_days, 7);
    }
}

#[test]
fn test_expand_env_var_in_string() {
    std::env::set_var("AUTHRELAY_TEST_HOST", "api.internal");
    assert_eq!(
        expand_env_var_in_string("https://${AUTHRELAY_TEST_HOST}/v1"),
        "https://api.internal/v1"
    );
    assert_eq!(
        expand_env_var_in_string("${AUTHRELAY_TEST_UNSET_VAR}"),
        "${AUTHRELAY_TEST_UNSET_VAR}"
    );
}
