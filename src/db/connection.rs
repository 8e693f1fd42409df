use std::env;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use rusqlite::Connection;

use super::error::{StoreError, StoreResult};

/// Environment variable that overrides the database location. Connection
/// parameters are opaque inputs; the core does not validate the path beyond
/// letting SQLite try to open it.
const DB_PATH_ENV: &str = "STAFF_MANAGER_DB";
/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".staff-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "staff.sqlite";

/// Open the database at its configured location, run lazy migrations, and
/// return a live connection. Any failure here is a connection error: the
/// caller treats it as fatal at startup, with no retry.
pub fn open_default() -> StoreResult<Connection> {
    let db_path = match env::var_os(DB_PATH_ENV) {
        Some(path) => PathBuf::from(path),
        None => default_db_path()?,
    };

    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).map_err(|err| StoreError::Connection(err.to_string()))?;
    }

    let conn = Connection::open(&db_path).map_err(StoreError::from_sql)?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Open a throwaway in-memory database with the full schema applied. Used by
/// tests so every case starts from a pristine store.
pub fn open_in_memory() -> StoreResult<Connection> {
    let conn = Connection::open_in_memory().map_err(StoreError::from_sql)?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Create the three tables if they are missing and toggle
/// `PRAGMA foreign_keys = ON` so referential integrity checks behave the same
/// during tests and production runs. Each statement runs on its own; no
/// transaction spans the batch.
///
/// The manager self-reference carries `ON DELETE SET NULL`: deleting an
/// employee who manages others clears the reports' `manager_id` instead of
/// leaving dangling ids behind.
fn ensure_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute("PRAGMA foreign_keys = ON", [])
        .map_err(StoreError::from_sql)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS departments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        )",
        [],
    )
    .map_err(StoreError::from_sql)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS roles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            salary REAL NOT NULL,
            department_id INTEGER NOT NULL,
            FOREIGN KEY(department_id) REFERENCES departments(id)
        )",
        [],
    )
    .map_err(StoreError::from_sql)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS employees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            role_id INTEGER NOT NULL,
            manager_id INTEGER,
            salary REAL,
            FOREIGN KEY(role_id) REFERENCES roles(id),
            FOREIGN KEY(manager_id) REFERENCES employees(id) ON DELETE SET NULL
        )",
        [],
    )
    .map_err(StoreError::from_sql)?;

    Ok(())
}

/// Resolve the default SQLite path inside the user's home directory.
fn default_db_path() -> StoreResult<PathBuf> {
    let base_dirs = BaseDirs::new()
        .ok_or_else(|| StoreError::Connection("could not locate home directory".to_string()))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_schema_enforces_foreign_keys() {
        let conn = open_in_memory().unwrap();
        let err = conn
            .execute(
                "INSERT INTO roles (title, salary, department_id) VALUES ('Ghost', 1.0, 999)",
                [],
            )
            .unwrap_err();
        assert!(matches!(
            err.sqlite_error_code(),
            Some(rusqlite::ErrorCode::ConstraintViolation)
        ));
    }

    #[test]
    fn env_override_creates_the_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("staff.sqlite");
        env::set_var(DB_PATH_ENV, &path);
        let conn = open_default().unwrap();
        env::remove_var(DB_PATH_ENV);

        assert!(path.exists());
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM departments", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
