//! Database migrations using cetane.
//!
//! Runs migrations via blocking tasks to work with async callers. Applied
//! migration names are recorded in the `__cetane_migrations` ledger table.

use cetane::migrator::MigrationStateStore;
use tracing::info;

use super::util::sqlite_path;
use crate::error::{Error, Result};

/// Name of the ledger table cetane state is stored in.
pub const LEDGER_TABLE: &str = "__cetane_migrations";

/// Run pending migrations for a database URL.
///
/// Returns the names of the migrations that were applied, in order. An
/// up-to-date database yields an empty list.
pub async fn run_migrations(database_url: &str) -> Result<Vec<String>> {
    let path = sqlite_path(database_url).to_string();

    tokio::task::spawn_blocking(move || {
        let conn = rusqlite::Connection::open(&path)?;
        migrate_connection(&conn)
    })
    .await?
}

/// Apply pending migrations on an open connection.
pub fn migrate_connection(conn: &rusqlite::Connection) -> Result<Vec<String>> {
    use cetane::backend::Sqlite;
    use cetane::migrator::Migrator;

    let backend = Sqlite;
    let registry = crate::migrations::registry();
    let state = SqliteState::new(conn)?;

    let mut migrator = Migrator::new(&registry, &backend, state);
    let applied: Vec<String> = migrator
        .migrate_forward(|sql| conn.execute_batch(sql).map_err(|e| e.to_string()))
        .map_err(migration_error)?
        .into_iter()
        .map(|name| name.to_string())
        .collect();

    for name in &applied {
        info!("Applied migration: {}", name);
    }

    if applied.is_empty() {
        info!("No pending migrations");
    }

    Ok(applied)
}

/// Names of migrations recorded as applied.
pub fn applied_migrations(conn: &rusqlite::Connection) -> Result<Vec<String>> {
    SqliteState::new(conn)?
        .applied_migrations()
        .map_err(migration_error)
}

fn migration_error(msg: impl std::fmt::Display) -> Error {
    Error::Migration(msg.to_string())
}

// -- SQLite state store --

struct SqliteState<'a> {
    conn: &'a rusqlite::Connection,
}

impl<'a> SqliteState<'a> {
    fn new(conn: &'a rusqlite::Connection) -> Result<Self> {
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {LEDGER_TABLE} (
                name TEXT PRIMARY KEY NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            )"
        ))?;

        Ok(Self { conn })
    }
}

impl MigrationStateStore for SqliteState<'_> {
    fn applied_migrations(&mut self) -> std::result::Result<Vec<String>, String> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT name FROM {LEDGER_TABLE} ORDER BY name"))
            .map_err(|e| e.to_string())?;

        let names = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| e.to_string())?
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(|e| e.to_string())?;

        Ok(names)
    }

    fn mark_applied(&mut self, name: &str) -> std::result::Result<(), String> {
        self.conn
            .execute(
                &format!("INSERT OR IGNORE INTO {LEDGER_TABLE} (name) VALUES (?1)"),
                [name],
            )
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    fn mark_unapplied(&mut self, name: &str) -> std::result::Result<(), String> {
        self.conn
            .execute(
                &format!("DELETE FROM {LEDGER_TABLE} WHERE name = ?1"),
                [name],
            )
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}
