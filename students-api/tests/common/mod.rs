//! Shared test helpers for API tests.

#![allow(dead_code)]

use std::sync::Arc;

use students_api::build_router;
use students_db::{SqliteStorage, Storage, StorageError, StorageResult};
use students_types::Student;

/// Spin up the HTTP server on an OS-assigned port, returning the base URL.
pub async fn spawn_server(storage: Arc<dyn Storage>) -> String {
    let app = build_router(storage);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

/// Server over a fresh in-memory SQLite store.
pub async fn spawn_test_server() -> String {
    spawn_server(Arc::new(SqliteStorage::open_in_memory().unwrap())).await
}

/// A store whose every call fails with an IO error.
pub struct FailingStorage;

fn broken() -> StorageError {
    StorageError::Io(std::io::Error::other("disk unavailable"))
}

impl Storage for FailingStorage {
    fn create_student(&self, _: &str, _: &str, _: i64) -> StorageResult<i64> {
        Err(broken())
    }

    fn get_student_by_id(&self, _: i64) -> StorageResult<Student> {
        Err(broken())
    }

    fn get_students(&self) -> StorageResult<Vec<Student>> {
        Err(broken())
    }

    fn update_student(&self, _: i64, _: &str, _: &str, _: i64) -> StorageResult<()> {
        Err(broken())
    }
}

/// A store that can read but never write, for the update failure path.
pub struct ReadOnlyStorage {
    pub student: Student,
}

impl Storage for ReadOnlyStorage {
    fn create_student(&self, _: &str, _: &str, _: i64) -> StorageResult<i64> {
        Err(broken())
    }

    fn get_student_by_id(&self, id: i64) -> StorageResult<Student> {
        if id == self.student.id {
            Ok(self.student.clone())
        } else {
            Err(StorageError::NotFound(id))
        }
    }

    fn get_students(&self) -> StorageResult<Vec<Student>> {
        Ok(vec![self.student.clone()])
    }

    fn update_student(&self, _: i64, _: &str, _: &str, _: i64) -> StorageResult<()> {
        Err(broken())
    }
}
