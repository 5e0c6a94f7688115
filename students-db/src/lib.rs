//! Persistence for student records.
//!
//! The HTTP layer only sees the [`Storage`] trait. [`SqliteStorage`] is the
//! shipped engine: a single `students` table in a SQLite file.
//!
//! # Concurrency
//!
//! Implementations must be safe to call from many request tasks at once.
//! Calls are blocking; async callers run them on the blocking pool.

mod error;
mod sqlite;

pub use error::{StorageError, StorageResult};
pub use sqlite::SqliteStorage;

use students_types::Student;

/// CRUD primitives the request handlers need from a store.
pub trait Storage: Send + Sync {
    /// Inserts a new record and returns its assigned id.
    fn create_student(&self, name: &str, email: &str, age: i64) -> StorageResult<i64>;

    /// Fetches one record. A missing id yields [`StorageError::NotFound`].
    fn get_student_by_id(&self, id: i64) -> StorageResult<Student>;

    /// Returns every record in ascending id order.
    fn get_students(&self) -> StorageResult<Vec<Student>>;

    /// Overwrites all mutable fields of an existing record.
    /// A missing id yields [`StorageError::NotFound`].
    fn update_student(&self, id: i64, name: &str, email: &str, age: i64) -> StorageResult<()>;
}
