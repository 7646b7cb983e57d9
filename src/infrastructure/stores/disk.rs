#[cfg(test)]
#[path = "disk_test.rs"]
mod tests;

use std::fs;
use std::path;

use crate::domain::models::KeyValueStore;

/// One UTF-8 file per key under the data directory. Read and write
/// failures degrade to "absent" with a warning; losing this store is
/// equivalent to a cold start, never an error.
pub struct DiskStore {
    pub data_dir: path::PathBuf,
}

impl Default for DiskStore {
    fn default() -> DiskStore {
        let data_dir = dirs::data_dir().unwrap().join("tryit");
        return DiskStore::new(data_dir);
    }
}

impl DiskStore {
    pub fn new(data_dir: path::PathBuf) -> DiskStore {
        return DiskStore { data_dir };
    }

    fn file_path(&self, key: &str) -> path::PathBuf {
        return self.data_dir.join(key);
    }
}

impl KeyValueStore for DiskStore {
    fn get(&self, key: &str) -> Option<String> {
        let file_path = self.file_path(key);
        if !file_path.exists() {
            return None;
        }

        match fs::read_to_string(&file_path) {
            Ok(value) => return Some(value),
            Err(err) => {
                tracing::warn!(key = key, err = ?err, "Failed to read stored value");
                return None;
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if !self.data_dir.exists() {
            if let Err(err) = fs::create_dir_all(&self.data_dir) {
                tracing::warn!(err = ?err, "Failed to create data directory");
                return;
            }
        }

        if let Err(err) = fs::write(self.file_path(key), value) {
            tracing::warn!(key = key, err = ?err, "Failed to persist value");
        }
    }

    fn remove(&self, key: &str) {
        let file_path = self.file_path(key);
        if !file_path.exists() {
            return;
        }

        if let Err(err) = fs::remove_file(file_path) {
            tracing::warn!(key = key, err = ?err, "Failed to remove stored value");
        }
    }
}
