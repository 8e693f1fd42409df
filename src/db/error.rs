//! Error taxonomy for the persistence layer. Every rusqlite failure is
//! classified into one of these variants before it leaves the `db` module so
//! the menu loop can decide between "fatal at startup" and "report and keep
//! looping" without inspecting SQLite error codes itself.

use rusqlite::{Error as SqlError, ErrorCode};
use thiserror::Error;

/// Failures surfaced by the store and the repository operations built on it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database could not be opened or the connection dropped mid-call.
    /// Fatal when it happens at startup; reported otherwise. Carries the
    /// backend's diagnostic as text because the failure can originate either
    /// in SQLite or in the filesystem around it.
    #[error("database connection failed: {0}")]
    Connection(String),

    /// A write was rejected by a referential-integrity rule, typically a
    /// foreign key that does not resolve (unknown role, department, or
    /// manager id).
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// The statement itself was rejected. This indicates a programming
    /// defect, not bad operator input.
    #[error("query failed: {0}")]
    Query(#[source] SqlError),

    /// An update or delete matched zero rows. Surfaced distinctly so a no-op
    /// is never mistaken for a successful write.
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl StoreError {
    /// Classify a raw rusqlite error. Constraint codes map to
    /// [`StoreError::Constraint`], open/locking problems to
    /// [`StoreError::Connection`], everything else to [`StoreError::Query`].
    pub(crate) fn from_sql(err: SqlError) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => StoreError::Constraint(err.to_string()),
            Some(
                ErrorCode::CannotOpen
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::NotADatabase,
            ) => StoreError::Connection(err.to_string()),
            _ => StoreError::Query(err),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::ffi;

    fn sqlite_err(code: std::ffi::c_int) -> SqlError {
        SqlError::SqliteFailure(ffi::Error::new(code), Some("boom".to_string()))
    }

    #[test]
    fn constraint_code_maps_to_constraint() {
        let err = StoreError::from_sql(sqlite_err(ffi::SQLITE_CONSTRAINT));
        assert!(matches!(err, StoreError::Constraint(_)));
    }

    #[test]
    fn cannot_open_maps_to_connection() {
        let err = StoreError::from_sql(sqlite_err(ffi::SQLITE_CANTOPEN));
        assert!(matches!(err, StoreError::Connection(_)));
    }

    #[test]
    fn anything_else_maps_to_query() {
        let err = StoreError::from_sql(SqlError::QueryReturnedNoRows);
        assert!(matches!(err, StoreError::Query(_)));
    }
}
