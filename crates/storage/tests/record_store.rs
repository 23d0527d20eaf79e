use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use storage::{RecordStore, StoreError};
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Note {
    id: String,
    body: String,
}

fn note(id: &str, body: &str) -> Note {
    Note {
        id: id.to_owned(),
        body: body.to_owned(),
    }
}

fn store_path(dir: &TempDir) -> PathBuf {
    dir.path().join("notes.json")
}

#[test]
fn open_creates_missing_file_and_parent_directories() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("nested").join("deeper").join("notes.json");

    let store: RecordStore<Note> = RecordStore::open(&path).expect("open must create the file");

    assert!(path.is_file());
    assert!(store.load().is_empty());
}

#[test]
fn empty_file_loads_as_empty_collection() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = store_path(&dir);
    fs::write(&path, "").expect("file should be written");

    let store: RecordStore<Note> = RecordStore::open(&path).expect("open must succeed");
    assert!(store.load().is_empty());
}

#[test]
fn corrupt_file_degrades_to_empty_collection() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = store_path(&dir);
    fs::write(&path, "{ not json ]").expect("file should be written");

    let store: RecordStore<Note> = RecordStore::open(&path).expect("corrupt content is not fatal");
    assert!(store.load().is_empty());
}

#[test]
fn open_fails_when_the_path_cannot_be_created() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "plain file").expect("file should be written");

    // Parent "directory" is a regular file, so creation must fail with Io.
    let result: Result<RecordStore<Note>, StoreError> =
        RecordStore::open(blocker.join("notes.json"));
    assert!(matches!(result, Err(StoreError::Io { .. })));
}

#[test]
fn save_then_reopen_round_trips_every_record() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = store_path(&dir);

    let store: RecordStore<Note> = RecordStore::open(&path).expect("open must succeed");
    let records = vec![note("n1", "first"), note("n2", "second")];
    store.save(records.clone()).expect("save must succeed");

    let reopened: RecordStore<Note> = RecordStore::open(&path).expect("reopen must succeed");
    assert_eq!(reopened.load(), records);
}

#[test]
fn mutate_persists_the_whole_collection() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = store_path(&dir);

    let store: RecordStore<Note> = RecordStore::open(&path).expect("open must succeed");
    store.save(vec![note("n1", "first")]).expect("save must succeed");

    let appended = store
        .mutate(|notes| {
            notes.push(note("n2", "second"));
            Some(())
        })
        .expect("mutate must succeed");
    assert!(appended.is_some());

    let reopened: RecordStore<Note> = RecordStore::open(&path).expect("reopen must succeed");
    assert_eq!(
        reopened.load(),
        vec![note("n1", "first"), note("n2", "second")]
    );
}

#[test]
fn mutate_returning_none_touches_neither_memory_nor_disk() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = store_path(&dir);

    let store: RecordStore<Note> = RecordStore::open(&path).expect("open must succeed");
    store.save(vec![note("n1", "first")]).expect("save must succeed");
    let on_disk = fs::read_to_string(&path).expect("file should be readable");

    let outcome: Option<()> = store
        .mutate(|notes| {
            notes.clear();
            None
        })
        .expect("mutate must succeed");

    assert!(outcome.is_none());
    assert_eq!(store.load(), vec![note("n1", "first")]);
    assert_eq!(
        fs::read_to_string(&path).expect("file should be readable"),
        on_disk
    );
}

#[test]
fn read_sees_the_current_working_copy() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let store: RecordStore<Note> =
        RecordStore::open(store_path(&dir)).expect("open must succeed");
    store
        .save(vec![note("n1", "first"), note("n2", "second")])
        .expect("save must succeed");

    let ids = store.read(|notes| {
        notes.iter().map(|n| n.id.clone()).collect::<Vec<_>>()
    });
    assert_eq!(ids, vec!["n1", "n2"]);
}

#[test]
fn no_temp_file_is_left_behind_after_a_write() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = store_path(&dir);

    let store: RecordStore<Note> = RecordStore::open(&path).expect("open must succeed");
    store.save(vec![note("n1", "first")]).expect("save must succeed");

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .expect("dir should be readable")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path() != path)
        .collect();
    assert!(leftovers.is_empty());
}
