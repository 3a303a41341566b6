use super::*;
use serial_test::serial;
use tempfile::TempDir;

#[test]
#[serial]
fn test_resolve_prefers_env() {
    std::env::set_var("SBM_USER", "env-user");
    let tmp = TempDir::new().unwrap();

    let profile = UserProfile::resolve(tmp.path()).unwrap();
    std::env::remove_var("SBM_USER");

    assert_eq!(profile.username, "env-user");
    // 環境変数からの解決では profile.json は作られない
    assert!(!tmp.path().join("sbm/profile.json").exists());
}

#[test]
#[serial]
fn test_resolve_reads_existing_profile() {
    std::env::remove_var("SBM_USER");
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("sbm");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("profile.json"), r#"{ "username": "alice" }"#).unwrap();

    let profile = UserProfile::resolve(tmp.path()).unwrap();

    assert_eq!(profile.username, "alice");
}

#[test]
#[serial]
fn test_resolve_falls_back_to_user_env_and_persists() {
    std::env::remove_var("SBM_USER");
    std::env::set_var("USER", "bob");
    let tmp = TempDir::new().unwrap();

    let profile = UserProfile::resolve(tmp.path()).unwrap();
    std::env::remove_var("USER");

    assert_eq!(profile.username, "bob");
    let saved = std::fs::read_to_string(tmp.path().join("sbm/profile.json")).unwrap();
    assert!(saved.contains("bob"));
}

#[test]
#[serial]
fn test_resolve_invalid_profile_fails() {
    std::env::remove_var("SBM_USER");
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("sbm");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("profile.json"), "{broken").unwrap();

    let err = UserProfile::resolve(tmp.path()).unwrap_err();
    assert!(matches!(err, SbmError::Profile(_)));
}

#[test]
fn test_save_overwrites_atomically() {
    let tmp = TempDir::new().unwrap();
    let first = UserProfile {
        username: "alice".to_string(),
    };
    first.save(tmp.path()).unwrap();

    let second = UserProfile {
        username: "carol".to_string(),
    };
    second.save(tmp.path()).unwrap();

    let saved = std::fs::read_to_string(tmp.path().join("sbm/profile.json")).unwrap();
    assert!(saved.contains("carol"));
    assert!(!saved.contains("alice"));
}
