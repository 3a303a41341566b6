use super::*;
use serial_test::serial;
use tempfile::TempDir;

#[test]
fn test_http_config_default() {
    let config = HttpConfig::default();
    assert_eq!(config.user_agent, "sbm-cli");
    assert!(config.timeout.is_some());
}

#[test]
#[serial]
fn test_load_with_missing_file_uses_fallback() {
    std::env::remove_var("SBM_BASE");
    std::env::remove_var("SBM_GITEA_URL");

    let tmp = TempDir::new().unwrap();
    let config =
        AppConfig::load_with(&tmp.path().join("missing.toml"), PathBuf::from("/home/alice"))
            .unwrap();

    assert_eq!(config.base_path, PathBuf::from("/home/alice"));
    assert_eq!(config.gitea_url, DEFAULT_GITEA_URL);
}

#[test]
#[serial]
fn test_load_with_config_file() {
    std::env::remove_var("SBM_BASE");
    std::env::remove_var("SBM_GITEA_URL");

    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(
        &path,
        "base_path = \"/data\"\ngitea_url = \"https://gitea.example.org\"\n",
    )
    .unwrap();

    let config = AppConfig::load_with(&path, PathBuf::from("/home/alice")).unwrap();

    assert_eq!(config.base_path, PathBuf::from("/data"));
    assert_eq!(config.gitea_url, "https://gitea.example.org");
}

#[test]
#[serial]
fn test_env_overrides_config_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "base_path = \"/data\"\n").unwrap();

    std::env::set_var("SBM_BASE", "/env-base");
    let config = AppConfig::load_with(&path, PathBuf::from("/home/alice")).unwrap();
    std::env::remove_var("SBM_BASE");

    assert_eq!(config.base_path, PathBuf::from("/env-base"));
}

#[test]
#[serial]
fn test_load_with_invalid_toml_fails() {
    std::env::remove_var("SBM_BASE");

    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "base_path = [broken").unwrap();

    let err = AppConfig::load_with(&path, PathBuf::from("/home/alice")).unwrap_err();
    assert!(matches!(err, SbmError::Config(_)));
}

#[test]
#[serial]
fn test_env_var_empty_is_none() {
    std::env::set_var("SBM_TEST_EMPTY", "");
    assert_eq!(env_var("SBM_TEST_EMPTY"), None);
    std::env::remove_var("SBM_TEST_EMPTY");

    assert_eq!(env_var("SBM_TEST_NONEXISTENT_12345"), None);

    std::env::set_var("SBM_TEST_SET", "value");
    assert_eq!(env_var("SBM_TEST_SET"), Some("value".to_string()));
    std::env::remove_var("SBM_TEST_SET");
}
