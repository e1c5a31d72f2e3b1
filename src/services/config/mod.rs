pub mod models;

pub use models::*;

use std::path::Path;

/// Load document settings from a JSON file.
/// Falls back to `DocumentSettings::default()` if the file is missing or corrupt;
/// fields absent from the file keep their defaults.
pub fn load_settings(path: &Path) -> DocumentSettings {
    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str::<DocumentSettings>(&contents) {
            Ok(settings) => {
                log::info!("Loaded document settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!(
                    "Failed to parse settings {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                DocumentSettings::default()
            }
        },
        Err(e) => {
            log::warn!(
                "Settings file not found {}: {}. Using defaults.",
                path.display(),
                e
            );
            DocumentSettings::default()
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
