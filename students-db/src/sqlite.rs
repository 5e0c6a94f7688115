//! SQLite implementation of [`Storage`].

use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension, Row};
use students_types::Student;
use tracing::debug;

use crate::{Storage, StorageError, StorageResult};

/// Student store backed by a single SQLite table.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Opens (or creates) a store at the given path.
    ///
    /// Missing parent directories and the database file itself are created.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        if !path.exists() {
            debug!(path = %path.display(), "creating database file");
            fs::File::create(path)?;
        }
        Self::with_connection(Connection::open(path)?)
    }

    /// Opens an in-memory store (for testing).
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StorageResult<Self> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS students (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                age INTEGER NOT NULL
            );
            ",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

fn student_from_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        age: row.get(3)?,
    })
}

impl Storage for SqliteStorage {
    fn create_student(&self, name: &str, email: &str, age: i64) -> StorageResult<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO students (name, email, age) VALUES (?1, ?2, ?3)",
            params![name, email, age],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn get_student_by_id(&self, id: i64) -> StorageResult<Student> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, name, email, age FROM students WHERE id = ?1 LIMIT 1",
            params![id],
            student_from_row,
        )
        .optional()?
        .ok_or(StorageError::NotFound(id))
    }

    fn get_students(&self) -> StorageResult<Vec<Student>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, name, email, age FROM students ORDER BY id")?;
        let rows = stmt.query_map([], student_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn update_student(&self, id: i64, name: &str, email: &str, age: i64) -> StorageResult<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE students SET name = ?1, email = ?2, age = ?3 WHERE id = ?4",
            params![name, email, age, id],
        )?;
        if changed == 0 {
            return Err(StorageError::NotFound(id));
        }
        Ok(())
    }
}
