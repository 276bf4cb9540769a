use std::fs;

use showbudget_core::{CoreError, SnapshotStorage};
use showbudget_domain::SnapshotMeta;
use showbudget_storage_json::{read_snapshot_file, write_snapshot_file, JsonSnapshotStorage};
use tempfile::tempdir;

const SNAPSHOT: &str = "XODIA_BUDGET_VERSION,4\nShow Title,Test\nShow Date,2025-03-01\n";

#[test]
fn json_storage_saves_and_loads_snapshots() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonSnapshotStorage::new(dir.path().join("budgets")).expect("storage");

    let id = storage
        .save(SNAPSHOT, &SnapshotMeta::new("Test", "2025-03-01"))
        .expect("save");
    assert_eq!(storage.load(&id).expect("load"), SNAPSHOT);

    let record = fs::read_to_string(storage.record_path(&id)).expect("record");
    let json: serde_json::Value = serde_json::from_str(&record).expect("json");
    assert_eq!(json["name"], "Test");
    assert_eq!(json["csv"], SNAPSHOT);
    assert!(json["createdAt"].is_string());
}

#[test]
fn json_storage_requires_name_and_date() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonSnapshotStorage::new(dir.path().to_path_buf()).expect("storage");

    let err = storage
        .save(SNAPSHOT, &SnapshotMeta::new("  ", "2025-03-01"))
        .expect_err("missing name");
    assert!(matches!(err, CoreError::Validation(_)));
    let err = storage
        .save(SNAPSHOT, &SnapshotMeta::new("Test", ""))
        .expect_err("missing date");
    assert!(matches!(err, CoreError::Validation(_)));
    assert!(storage.list().expect("list").is_empty());
}

#[test]
fn json_storage_lists_newest_first_and_skips_garbage() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonSnapshotStorage::new(dir.path().to_path_buf()).expect("storage");

    let first = storage
        .save(SNAPSHOT, &SnapshotMeta::new("First", "2025-01-01"))
        .expect("first");
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = storage
        .save(SNAPSHOT, &SnapshotMeta::new("Second", "2025-02-01"))
        .expect("second");
    fs::write(dir.path().join("broken.json"), "{ not json").expect("garbage");
    fs::write(dir.path().join("notes.txt"), "ignore me").expect("notes");

    let listed = storage.list().expect("list");
    let ids: Vec<&str> = listed.iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(ids, [second.as_str(), first.as_str()]);
    assert_eq!(listed[0].name, "Second");
}

#[test]
fn json_storage_reports_missing_ids() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonSnapshotStorage::new(dir.path().to_path_buf()).expect("storage");

    assert!(matches!(storage.load("nope"), Err(CoreError::NotFound(_))));
    assert!(matches!(storage.delete("nope"), Err(CoreError::NotFound(_))));
    assert!(matches!(
        storage.load("../escape"),
        Err(CoreError::NotFound(_))
    ));

    let id = storage
        .save(SNAPSHOT, &SnapshotMeta::new("Gone", "2025-03-01"))
        .expect("save");
    storage.delete(&id).expect("delete");
    assert!(matches!(storage.load(&id), Err(CoreError::NotFound(_))));
}

#[test]
fn snapshot_files_are_written_in_place() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("exports").join("budget_Test_2025-03-01.csv");

    write_snapshot_file(&path, SNAPSHOT).expect("write");
    write_snapshot_file(&path, SNAPSHOT).expect("overwrite");
    assert_eq!(read_snapshot_file(&path).expect("read"), SNAPSHOT);
    let leftovers = fs::read_dir(path.parent().expect("parent"))
        .expect("dir")
        .count();
    assert_eq!(leftovers, 1);
}
