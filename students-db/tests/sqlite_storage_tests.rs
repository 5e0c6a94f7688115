use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;
use students_db::{SqliteStorage, Storage, StorageError};
use students_types::Student;

#[test]
fn create_assigns_increasing_ids() {
    let store = SqliteStorage::open_in_memory().unwrap();
    let first = store.create_student("Ann", "ann@x.com", 21).unwrap();
    let second = store.create_student("Bob", "bob@x.com", 22).unwrap();
    assert_eq!(first, 1);
    assert!(second > first);
}

#[test]
fn create_then_get_round_trips() {
    let store = SqliteStorage::open_in_memory().unwrap();
    let id = store.create_student("Ann", "ann@x.com", 21).unwrap();
    let student = store.get_student_by_id(id).unwrap();
    assert_eq!(
        student,
        Student {
            id,
            name: "Ann".into(),
            age: 21,
            email: "ann@x.com".into(),
        }
    );
}

#[test]
fn get_missing_is_not_found() {
    let store = SqliteStorage::open_in_memory().unwrap();
    let err = store.get_student_by_id(42).unwrap_err();
    assert!(matches!(err, StorageError::NotFound(42)));
}

#[test]
fn list_empty() {
    let store = SqliteStorage::open_in_memory().unwrap();
    assert!(store.get_students().unwrap().is_empty());
}

#[test]
fn list_is_ordered_by_id() {
    let store = SqliteStorage::open_in_memory().unwrap();
    for (name, age) in [("Ann", 21), ("Bob", 22), ("Cid", 23)] {
        store.create_student(name, &format!("{name}@x.com"), age).unwrap();
    }
    let students = store.get_students().unwrap();
    assert_eq!(students.len(), 3);
    let names: Vec<_> = students.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Ann", "Bob", "Cid"]);
    assert!(students.windows(2).all(|w| w[0].id < w[1].id));
}

#[test]
fn update_overwrites_fields() {
    let store = SqliteStorage::open_in_memory().unwrap();
    let id = store.create_student("Ann", "ann@x.com", 21).unwrap();
    store.update_student(id, "Anna", "anna@x.com", 22).unwrap();
    let student = store.get_student_by_id(id).unwrap();
    assert_eq!(student.name, "Anna");
    assert_eq!(student.email, "anna@x.com");
    assert_eq!(student.age, 22);
}

#[test]
fn update_missing_is_not_found() {
    let store = SqliteStorage::open_in_memory().unwrap();
    let err = store.update_student(9, "Ann", "ann@x.com", 21).unwrap_err();
    assert!(matches!(err, StorageError::NotFound(9)));
}

#[test]
fn update_leaves_other_rows_alone() {
    let store = SqliteStorage::open_in_memory().unwrap();
    let ann = store.create_student("Ann", "ann@x.com", 21).unwrap();
    let bob = store.create_student("Bob", "bob@x.com", 22).unwrap();
    store.update_student(ann, "Ann", "ann@y.com", 30).unwrap();
    assert_eq!(store.get_student_by_id(bob).unwrap().email, "bob@x.com");
}

#[test]
fn open_creates_file_and_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("storage.db");
    let store = SqliteStorage::open(&path).unwrap();
    assert!(path.exists());
    store.create_student("Ann", "ann@x.com", 21).unwrap();
}

#[test]
fn data_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.db");

    let id = {
        let store = SqliteStorage::open(&path).unwrap();
        store.create_student("Ann", "ann@x.com", 21).unwrap()
    };

    let store = SqliteStorage::open(&path).unwrap();
    let student = store.get_student_by_id(id).unwrap();
    assert_eq!(student.name, "Ann");
    assert_eq!(store.get_students().unwrap().len(), 1);
}

#[test]
fn concurrent_creates_all_persist() {
    let store = Arc::new(SqliteStorage::open_in_memory().unwrap());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                store
                    .create_student(&format!("s{i}"), &format!("s{i}@x.com"), 20 + i)
                    .unwrap()
            })
        })
        .collect();

    let mut ids: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 8);
    assert_eq!(store.get_students().unwrap().len(), 8);
}

#[test]
fn error_display() {
    assert_eq!(StorageError::NotFound(3).to_string(), "student not found: 3");
    assert_eq!(StorageError::LockPoisoned.to_string(), "storage lock poisoned");
}
