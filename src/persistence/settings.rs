use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};

use super::{
    get_data_file_path,
    load_json_or_default,
    save_json,
};
use crate::core::GlosorError;

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub import_timeout_secs: u64,
    pub import_attempts: usize,
    pub default_filter: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self { import_timeout_secs: 120, import_attempts: 3, default_filter: Vec::new() }
    }
}

impl Settings {
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        load_json_or_default(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), GlosorError> {
        save_json(self, path)
    }

    pub fn path() -> PathBuf {
        get_data_file_path(SETTINGS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{"default_filter":["verb"]}"#).unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.default_filter, vec!["verb"]);
        assert_eq!(settings.import_timeout_secs, 120);
        assert_eq!(settings.import_attempts, 3);
    }

    #[test]
    fn test_malformed_settings_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "[[[").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);
        let settings =
            Settings { import_timeout_secs: 5, import_attempts: 1, default_filter: Vec::new() };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
    }
}
