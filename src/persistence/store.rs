use std::{
    collections::BTreeMap,
    path::PathBuf,
};

use super::{
    get_data_file_path,
    load_json_or_default,
    save_json,
};
use crate::core::GlosorError;

/// String-keyed, string-valued storage. Reads and writes are whole-value.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, GlosorError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), GlosorError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, GlosorError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), GlosorError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// All keys in one JSON object on disk. Every `set` rewrites the file.
#[derive(Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    pub const FILE_NAME: &'static str = "storage.json";

    pub fn open_default() -> Self {
        Self::open(get_data_file_path(Self::FILE_NAME))
    }

    /// An unreadable file opens as empty storage and is overwritten on the next `set`.
    pub fn open(file_path: PathBuf) -> Self {
        let values = load_json_or_default::<BTreeMap<String, String>>(&file_path);
        Self { file_path, values }
    }

    pub fn path(&self) -> &PathBuf {
        &self.file_path
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, GlosorError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), GlosorError> {
        let mut next = self.values.clone();
        next.insert(key.to_string(), value.to_string());
        save_json(&next, &self.file_path)?;
        self.values = next;
        Ok(())
    }
}
