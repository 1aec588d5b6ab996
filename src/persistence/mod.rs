use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::GlosorError;

pub mod settings;
pub mod store;

pub use settings::Settings;
pub use store::{
    JsonFileStore,
    KeyValueStore,
    MemoryStore,
};

const APP_NAME: &str = "glosor";
const DATA_DIR_ENV: &str = "GLOSOR_DATA_DIR";

pub fn get_app_data_dir() -> PathBuf {
    let app_dir = if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        PathBuf::from(dir)
    } else if let Some(data_dir) = dirs::data_local_dir() {
        data_dir.join(APP_NAME)
    } else {
        PathBuf::from(".")
    };
    let _ = fs::create_dir_all(&app_dir);
    app_dir
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

pub fn save_json<T: Serialize>(data: &T, path: &Path) -> Result<(), GlosorError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    log::debug!("Data saved to: {}", path.display());
    Ok(())
}

pub fn load_json<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> Result<T, GlosorError> {
    if !path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(path)?;
    let data: T = serde_json::from_str(&json)?;
    log::debug!("Data loaded from: {}", path.display());
    Ok(data)
}

pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> T {
    match load_json::<T>(path) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Failed to load {}: {}. Using defaults.", path.display(), e);
            T::default()
        }
    }
}
