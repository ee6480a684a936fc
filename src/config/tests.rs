use crate::config::{
    AppConfig, ConfigOverrides, DEFAULT_BASE_URL, DEFAULT_MODEL, FileConfig, HttpConfig,
    PartialHttpConfig, load_project_config,
};
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn test_load_project_config() {
    let temp_dir = TempDir::new().unwrap();
    let project_root = temp_dir.path();

    let dir = project_root.join(".wgf");
    fs::create_dir_all(&dir).unwrap();

    let config_content = r#"
model = "gemini-2.5-flash"
theme = "light"

[http]
connect_timeout_ms = 2500
request_timeout_ms = 30000
"#;

    fs::write(dir.join("config.toml"), config_content).unwrap();

    let project_cfg = load_project_config(project_root).unwrap();

    assert_eq!(project_cfg.model, Some("gemini-2.5-flash".to_string()));
    assert_eq!(project_cfg.theme, Some("light".to_string()));
    assert_eq!(project_cfg.api_key, None);
    let http = project_cfg.http.unwrap();
    assert_eq!(http.connect_timeout_ms, Some(2500));
    assert_eq!(http.request_timeout_ms, Some(30000));
}

#[test]
fn test_load_project_config_not_exists() {
    let temp_dir = TempDir::new().unwrap();
    let project_cfg = load_project_config(temp_dir.path()).unwrap();
    assert_eq!(project_cfg, FileConfig::default());
}

#[test]
fn test_load_project_config_invalid_toml_falls_back_to_default() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join(".wgf");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), "model = [unclosed").unwrap();
    let project_cfg = load_project_config(temp_dir.path()).unwrap();
    assert_eq!(project_cfg, FileConfig::default());
}

#[test]
fn defaults_when_nothing_is_set() {
    let cfg = AppConfig::resolve(
        &ConfigOverrides::default(),
        env_of(&[]),
        FileConfig::default(),
        FileConfig::default(),
    );
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.model, DEFAULT_MODEL);
    assert_eq!(cfg.api_key, None);
    assert_eq!(cfg.theme, "dark");
    assert_eq!(cfg.http, HttpConfig::default());
    assert_eq!(cfg.http.request_timeout_ms, None);
}

#[test]
fn cli_beats_env_beats_project_beats_global() {
    let project = FileConfig {
        model: Some("project-model".into()),
        api_key: Some("project-key".into()),
        base_url: Some("https://project.example".into()),
        ..FileConfig::default()
    };
    let global = FileConfig {
        model: Some("global-model".into()),
        api_key: Some("global-key".into()),
        theme: Some("light".into()),
        ..FileConfig::default()
    };
    let overrides = ConfigOverrides {
        model: Some("cli-model".into()),
        ..ConfigOverrides::default()
    };
    let cfg = AppConfig::resolve(
        &overrides,
        env_of(&[("GEMINI_API_KEY", "env-key")]),
        project,
        global,
    );
    assert_eq!(cfg.model, "cli-model");
    assert_eq!(cfg.api_key.as_deref(), Some("env-key"));
    assert_eq!(cfg.base_url, "https://project.example");
    assert_eq!(cfg.theme, "light");
}

#[test]
fn api_key_env_fallback_and_blank_values_are_ignored() {
    let cfg = AppConfig::resolve(
        &ConfigOverrides::default(),
        env_of(&[("GEMINI_API_KEY", "  "), ("API_KEY", "plain-key")]),
        FileConfig::default(),
        FileConfig::default(),
    );
    assert_eq!(cfg.api_key.as_deref(), Some("plain-key"));
}

#[test]
fn http_settings_merge_per_field() {
    let project = FileConfig {
        http: Some(PartialHttpConfig {
            connect_timeout_ms: None,
            request_timeout_ms: Some(45_000),
        }),
        ..FileConfig::default()
    };
    let global = FileConfig {
        http: Some(PartialHttpConfig {
            connect_timeout_ms: Some(1_000),
            request_timeout_ms: Some(5_000),
        }),
        ..FileConfig::default()
    };
    let cfg = AppConfig::resolve(
        &ConfigOverrides::default(),
        env_of(&[]),
        project,
        global,
    );
    assert_eq!(cfg.http.connect_timeout_ms, 1_000);
    assert_eq!(cfg.http.request_timeout_ms, Some(45_000));
}

#[test]
fn debug_output_redacts_api_key() {
    let cfg = AppConfig {
        api_key: Some("secret-value".into()),
        ..AppConfig::default()
    };
    let dbg = format!("{cfg:?}");
    assert!(!dbg.contains("secret-value"));
    assert!(dbg.contains("<redacted>"));
}
