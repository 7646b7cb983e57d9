extern crate tempdir;

use tempdir::TempDir;

use super::DiskStore;
use crate::domain::models::KeyValueStore;

#[test]
fn it_round_trips_values() {
    let tmp_dir = TempDir::new("diskstore").unwrap();
    let store = DiskStore::new(tmp_dir.path().to_path_buf());

    assert!(store.get("token").is_none());
    store.set("token", "abc.def.ghi");
    assert_eq!(store.get("token"), Some("abc.def.ghi".to_string()));

    store.remove("token");
    assert!(store.get("token").is_none());
}

#[test]
fn it_creates_a_missing_data_directory() {
    let tmp_dir = TempDir::new("diskstore").unwrap();
    let store = DiskStore::new(tmp_dir.path().join("nested/deeper"));

    store.set("mockUsers", "{}");
    assert_eq!(store.get("mockUsers"), Some("{}".to_string()));
}

#[test]
fn it_removes_missing_keys_without_complaint() {
    let tmp_dir = TempDir::new("diskstore").unwrap();
    let store = DiskStore::new(tmp_dir.path().to_path_buf());
    store.remove("never-set");
}
