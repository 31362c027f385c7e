// Config loading and validation tests

use f660a_monitor::config::AppConfig;

const VALID_CONFIG: &str = r#"
[F660A]
hostip = "192.168.10.1"
username = "root"
password = "hunter2"
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.router.hostip, "192.168.10.1");
    assert_eq!(config.router.username, "root");
    assert_eq!(config.router.password, "hunter2");
}

#[test]
fn test_config_hostip_and_username_have_defaults() {
    let config = AppConfig::load_from_str("[F660A]\npassword = \"hunter2\"\n").expect("defaults");
    assert_eq!(config.router.hostip, "192.168.1.1");
    assert_eq!(config.router.username, "admin");
}

#[test]
fn test_config_password_is_mandatory() {
    let err = AppConfig::load_from_str("[F660A]\nhostip = \"192.168.1.1\"\n").unwrap_err();
    assert!(err.to_string().contains("password"));
}

#[test]
fn test_config_validation_rejects_empty_password() {
    let bad = VALID_CONFIG.replace("password = \"hunter2\"", "password = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("F660A.password"));
}

#[test]
fn test_config_validation_rejects_empty_hostip() {
    let bad = VALID_CONFIG.replace("hostip = \"192.168.10.1\"", "hostip = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("F660A.hostip"));
}
