use super::*;
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn test_load_empty_config() {
    let config = ConfigLoader::load_str("").unwrap();
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.polling.interval_ms, 2_000);
}

#[test]
fn test_load_basic_config() {
    let content = r#"
        [server]
        host = "127.0.0.1"
        port = 3000

        [gumloop]
        api_key = "key-from-file"
        user_id = "user-from-file"
        base_url = "http://localhost:9999/api/v1"

        [polling]
        interval_ms = 500
        timeout_ms = 10000
    "#;
    let config = ConfigLoader::load_str(content).unwrap();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.gumloop.api_key.as_deref(), Some("key-from-file"));
    assert_eq!(config.gumloop.base_url, "http://localhost:9999/api/v1");
    assert_eq!(config.polling.interval_ms, 500);
    assert_eq!(config.polling.timeout_ms, 10_000);
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[server]").unwrap();
    writeln!(file, "port = 5000").unwrap();

    let config = ConfigLoader::load(file.path()).unwrap();
    assert_eq!(config.server.port, 5000);
}

#[test]
fn test_load_nonexistent_file() {
    let result = ConfigLoader::load(Path::new("/nonexistent/path/flowgate.toml"));
    assert!(result.is_err());
}

#[test]
fn test_load_or_default_missing_file_uses_defaults() {
    let config = ConfigLoader::load_or_default(Path::new("/nonexistent/flowgate.toml")).unwrap();
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.flows.saved_items.len(), 3);
}

#[test]
fn test_load_invalid_toml() {
    let result = ConfigLoader::load_str("invalid = [unclosed");
    assert!(matches!(result, Err(ConfigError::TomlParse(_))));
}

#[test]
fn test_apply_env_overrides_file_values() {
    let mut config = ConfigLoader::load_str(
        r#"
        [gumloop]
        api_key = "file-key"
        user_id = "file-user"
        "#,
    )
    .unwrap();

    ConfigLoader::apply_env(
        &mut config,
        lookup_from(&[(ENV_API_KEY, "env-key"), (ENV_PROJECT_ID, "proj-1")]),
    );

    assert_eq!(config.gumloop.api_key.as_deref(), Some("env-key"));
    assert_eq!(config.gumloop.user_id.as_deref(), Some("file-user"));
    assert_eq!(config.gumloop.project_id.as_deref(), Some("proj-1"));
}

#[test]
fn test_apply_env_ignores_blank_values() {
    let mut config = Config::default();
    config.gumloop.user_id = Some("kept".to_string());

    ConfigLoader::apply_env(&mut config, lookup_from(&[(ENV_USER_ID, "   ")]));

    assert_eq!(config.gumloop.user_id.as_deref(), Some("kept"));
}

#[test]
fn test_expand_env_vars() {
    // SAFETY: This test runs in isolation and sets a unique test-only env var
    unsafe {
        std::env::set_var("FLOWGATE_TEST_CONFIG_VAR", "test_value");
    }
    let content = "value = \"${FLOWGATE_TEST_CONFIG_VAR}\"";
    let expanded = ConfigLoader::expand_env_vars(content).unwrap();
    assert!(expanded.contains("test_value"));
    unsafe {
        std::env::remove_var("FLOWGATE_TEST_CONFIG_VAR");
    }
}

#[test]
fn test_expand_env_vars_not_set() {
    let content = "value = \"${NONEXISTENT_FLOWGATE_VAR_12345}\"";
    let result = ConfigLoader::expand_env_vars(content);
    assert!(matches!(result, Err(ConfigError::EnvVarNotSet(name)) if name == "NONEXISTENT_FLOWGATE_VAR_12345"));
}

#[test]
fn test_expand_env_vars_no_vars() {
    let content = "value = \"no variables here\"";
    let expanded = ConfigLoader::expand_env_vars(content).unwrap();
    assert_eq!(expanded, content);
}
