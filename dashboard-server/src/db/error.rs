use rusqlite::ffi;

/// Failures surfaced by the repositories
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The requested id does not resolve to a row
    #[error("{0}")]
    NotFound(String),

    /// A unique constraint rejected the write
    #[error("{0}")]
    Conflict(String),

    /// A foreign key target does not exist
    #[error("{0}")]
    InvalidReference(String),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
}

pub type DbResult<T> = Result<T, DbError>;

impl DbError {
    /// Classify constraint violations reported by SQLite itself.
    ///
    /// Unique violations become `Conflict(conflict)` and foreign key
    /// violations become `InvalidReference(reference)`; anything else stays a
    /// plain database error.
    pub fn from_write(err: rusqlite::Error, conflict: &str, reference: &str) -> Self {
        let code = err.sqlite_error().map(|e| e.extended_code);
        match code {
            Some(ffi::SQLITE_CONSTRAINT_UNIQUE) => DbError::Conflict(conflict.to_string()),
            Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => {
                DbError::InvalidReference(reference.to_string())
            }
            _ => DbError::Sqlite(err),
        }
    }
}
