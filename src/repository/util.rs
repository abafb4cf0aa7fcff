//! Repository utilities.

use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind};

/// Simple error info wrapper for database errors.
#[derive(Debug)]
pub struct DbErrorInfo(pub String);

impl DatabaseErrorInformation for DbErrorInfo {
    fn message(&self) -> &str {
        &self.0
    }
    fn details(&self) -> Option<&str> {
        None
    }
    fn hint(&self) -> Option<&str> {
        None
    }
    fn table_name(&self) -> Option<&str> {
        None
    }
    fn column_name(&self) -> Option<&str> {
        None
    }
    fn constraint_name(&self) -> Option<&str> {
        None
    }
    fn statement_position(&self) -> Option<i32> {
        None
    }
}

/// Convert any displayable error to a diesel error with proper message.
pub fn to_diesel_error(e: impl std::fmt::Display) -> diesel::result::Error {
    diesel::result::Error::DatabaseError(
        DatabaseErrorKind::Unknown,
        Box::new(DbErrorInfo(e.to_string())),
    )
}

/// Check whether a diesel error is a NOT NULL constraint failure.
///
/// Older SQLite builds report these as a generic constraint error, so the
/// message is checked as well as the error kind.
pub fn is_not_null_violation(e: &diesel::result::Error) -> bool {
    match e {
        diesel::result::Error::DatabaseError(DatabaseErrorKind::NotNullViolation, _) => true,
        diesel::result::Error::DatabaseError(_, info) => {
            info.message().starts_with("NOT NULL constraint failed")
        }
        _ => false,
    }
}

/// Strip the `sqlite:` scheme, leaving the file path diesel and rusqlite expect.
pub fn sqlite_path(database_url: &str) -> &str {
    database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url)
}
