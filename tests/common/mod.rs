use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use todoist_log::config::Config;
use todoist_log::todoist::TimeRange;

pub const COMPLETED_PATH: &str = "/sync/v9/completed/get_all";

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Config pointing at `base_url` that writes reports into `out`
#[allow(dead_code)]
pub fn test_config(base_url: &str, out: &TempDir) -> Config {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config.api.timeout_seconds = 5;
    config.output.directory = out.path().to_path_buf();
    config.output.pause_on_exit = false;
    config
}

#[allow(dead_code)]
pub fn test_range() -> TimeRange {
    TimeRange {
        since: "2023-01-01T00:00:00".to_string(),
        until: "2023-01-02T23:59:59".to_string(),
    }
}

#[allow(dead_code)]
pub fn empty_page() -> Value {
    json!({"projects": {}, "sections": {}, "items": []})
}

#[allow(dead_code)]
pub fn item(completed_at: &str, project_id: Option<&str>, content: &str, notes: &[&str]) -> Value {
    json!({
        "completed_at": completed_at,
        "project_id": project_id,
        "section_id": null,
        "content": content,
        "notes": notes.iter().map(|n| json!({"content": n})).collect::<Vec<_>>(),
    })
}

#[allow(dead_code)]
pub fn files_in(dir: &TempDir) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir.path())
        .expect("failed to read output dir")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
