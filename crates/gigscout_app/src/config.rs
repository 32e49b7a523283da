//! Optional `gigscout.ron` settings file.

use std::fs;
use std::path::Path;

use engine_logging::{engine_info, engine_warn};
use gigscout_engine::ScoutSettings;

pub const SETTINGS_FILE: &str = "gigscout.ron";

/// Reads settings from `path`. Missing fields keep their defaults; a missing
/// file means all defaults, an unreadable or invalid one is logged and ignored.
pub fn load_settings(path: &Path) -> ScoutSettings {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return ScoutSettings::default();
        }
        Err(err) => {
            engine_warn!("Failed to read settings from {:?}: {}", path, err);
            return ScoutSettings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => {
            engine_info!("Loaded settings from {:?}", path);
            settings
        }
        Err(err) => {
            engine_warn!("Failed to parse settings from {:?}: {}; using defaults", path, err);
            ScoutSettings::default()
        }
    }
}
