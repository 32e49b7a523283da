use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use gigscout_app::config::load_settings;
use tempfile::TempDir;

#[test]
fn missing_file_yields_defaults() {
    let temp = TempDir::new().unwrap();
    let settings = load_settings(&temp.path().join("gigscout.ron"));
    assert_eq!(settings.deadline, Duration::from_secs(180));
    assert_eq!(settings.navigation.retries, 3);
}

#[test]
fn partial_file_overrides_only_named_fields() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("gigscout.ron");
    fs::write(
        &path,
        r#"(
            deadline: (secs: 60, nanos: 0),
            pagination: (max_iterations: 8),
            results_dir: "out",
        )"#,
    )
    .unwrap();

    let settings = load_settings(&path);
    assert_eq!(settings.deadline, Duration::from_secs(60));
    assert_eq!(settings.pagination.max_iterations, 8);
    assert_eq!(settings.pagination.dwell, Duration::from_secs(2));
    assert_eq!(settings.results_dir, PathBuf::from("out"));
    assert_eq!(settings.cookies_dir, PathBuf::from("cookies"));
}

#[test]
fn invalid_file_falls_back_to_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("gigscout.ron");
    fs::write(&path, "(deadline: \"soon\"").unwrap();

    let settings = load_settings(&path);
    assert_eq!(settings.deadline, Duration::from_secs(180));
    assert_eq!(settings.extract.description_limit, 1000);
}
