use super::{apply_env_overrides, load_settings, parse_settings, read_settings_file, Settings};

use shared::domain::RuleId;
use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let settings = parse_settings("project = \"movies\"").expect("parse");
    assert_eq!(settings.project.as_deref(), Some("movies"));
    assert_eq!(settings.editor_base_url, None);
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn env_overrides_file_values() {
    let mut settings = parse_settings(
        "editor_base_url = \"http://file\"\nproject = \"p\"\nlog_filter = \"warn\"",
    )
    .expect("parse");

    apply_env_overrides(
        &mut settings,
        env_of(&[
            ("RULE_VIEWER_BASE_URL", "http://legacy"),
            ("APP__BASE_URL", "http://env"),
            ("APP__PROJECT", "movies"),
            ("APP__TRANSFORM_TASK", "mapping"),
            ("APP__LOG_FILTER", "debug"),
        ]),
    );

    assert_eq!(settings.editor_base_url.as_deref(), Some("http://env"));
    assert_eq!(settings.project.as_deref(), Some("movies"));
    assert_eq!(settings.transform_task.as_deref(), Some("mapping"));
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn incomplete_link_settings_disable_links() {
    let settings = Settings {
        editor_base_url: Some("http://localhost".into()),
        ..Settings::default()
    };
    let links = settings.editor_links().expect("links");
    assert_eq!(links.editor_href(&RuleId::from("a")), None);
}

#[test]
fn complete_link_settings_build_editor_links() {
    let settings = Settings {
        editor_base_url: Some("http://localhost:9090".into()),
        project: Some("movies".into()),
        transform_task: Some("mapping".into()),
        ..Settings::default()
    };
    let links = settings.editor_links().expect("links");
    assert_eq!(
        links.editor_href(&RuleId::from("a")).as_deref(),
        Some("http://localhost:9090/transform/movies/mapping/editor?rule=a")
    );
}

#[test]
fn invalid_base_url_is_reported() {
    let settings = Settings {
        editor_base_url: Some("nope".into()),
        project: Some("p".into()),
        transform_task: Some("t".into()),
        ..Settings::default()
    };
    assert!(settings.editor_links().is_err());
}

#[test]
fn unset_env_keeps_file_values() {
    let mut settings = parse_settings("project = \"p\"\ntransform_task = \"t\"").expect("parse");
    apply_env_overrides(&mut settings, env_of(&[]));
    assert_eq!(settings.project.as_deref(), Some("p"));
    assert_eq!(settings.transform_task.as_deref(), Some("t"));
}

#[test]
fn config_file_is_read() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("rule_viewer_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("viewer.toml");
    fs::write(&path, "transform_task = \"mapping\"\n").expect("write config");

    let settings = read_settings_file(&path).expect("read");
    assert_eq!(settings.transform_task.as_deref(), Some("mapping"));

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn missing_explicit_config_file_is_an_error() {
    let path = env::temp_dir().join("rule_viewer_config_test_missing/none.toml");
    assert!(load_settings(Some(&path)).is_err());
}
