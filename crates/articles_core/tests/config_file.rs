use articles_core::{load_config, ConfigError, DEFAULT_FIXTURE_PATH};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::Builder;

fn toml_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn file_values_override_defaults() {
    let file = toml_file(
        r#"
base_url = "http://articles.internal:8080/api"
fixture_path = "/srv/seed/articles.json"
template_path = "/srv/templates/article.hbs"
request_timeout_secs = 3

[log]
level = "warn"
dir = "/var/log/articles"
"#,
    );

    let config = load_config(Some(file.path())).unwrap();

    assert_eq!(config.base_url, "http://articles.internal:8080/api");
    assert_eq!(config.fixture_path, PathBuf::from("/srv/seed/articles.json"));
    assert_eq!(
        config.template_path,
        Some(PathBuf::from("/srv/templates/article.hbs"))
    );
    assert_eq!(config.request_timeout(), Duration::from_secs(3));
    assert_eq!(config.log.level, "warn");
    assert_eq!(config.log.dir, Some(PathBuf::from("/var/log/articles")));
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let file = toml_file("base_url = \"http://localhost:4000\"\n");

    let config = load_config(Some(file.path())).unwrap();

    assert_eq!(config.base_url, "http://localhost:4000");
    assert_eq!(config.fixture_path, PathBuf::from(DEFAULT_FIXTURE_PATH));
    assert_eq!(config.template_path, None);
    assert_eq!(config.request_timeout_secs, 10);
    assert_eq!(config.log.dir, None);
}

#[test]
fn explicit_path_must_exist() {
    let err = load_config(Some(std::path::Path::new("/nonexistent/articles.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}

#[test]
fn zero_timeout_is_rejected() {
    let file = toml_file("request_timeout_secs = 0\n");
    let err = load_config(Some(file.path())).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(message) if message.contains("request_timeout_secs")));
}

#[test]
fn blank_base_url_is_rejected() {
    let file = toml_file("base_url = \"  \"\n");
    let err = load_config(Some(file.path())).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}
