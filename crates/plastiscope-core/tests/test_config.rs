use plastiscope_core::config::AppConfig;
use plastiscope_core::consts::{DEFAULT_RENDER_WIDTH, DEFAULT_TIMEOUT_SECS};

#[test]
fn test_empty_toml_is_default() {
    let cfg = AppConfig::from_toml("").unwrap();
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert_eq!(cfg.viewer.render_width, DEFAULT_RENDER_WIDTH);
    assert!(cfg.api.base_url.is_none());
}

#[test]
fn test_partial_sections_keep_defaults() {
    let cfg = AppConfig::from_toml(
        r#"
[api]
base_url = "http://gpu-box:9000/"

[viewer]
thumbnail_size = 120
"#,
    )
    .unwrap();
    assert_eq!(cfg.api.base_url.as_deref(), Some("http://gpu-box:9000/"));
    assert_eq!(cfg.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert_eq!(cfg.viewer.thumbnail_size, 120);
    assert_eq!(cfg.viewer.render_width, DEFAULT_RENDER_WIDTH);
}

#[test]
fn test_rejects_wrong_types() {
    assert!(AppConfig::from_toml("[api]\ntimeout_secs = \"soon\"").is_err());
}

#[test]
fn test_written_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plastiscope.toml");
    let mut cfg = AppConfig::default();
    cfg.api.timeout_secs = 5;
    std::fs::write(&path, cfg.to_toml().unwrap()).unwrap();

    assert_eq!(AppConfig::load(&path).unwrap(), cfg);
    assert_eq!(AppConfig::load_or_default(Some(&path)).unwrap(), cfg);
    assert_eq!(AppConfig::load_or_default(None).unwrap(), AppConfig::default());
    assert!(AppConfig::load(&dir.path().join("missing.toml")).is_err());
}
