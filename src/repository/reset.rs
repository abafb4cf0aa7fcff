//! Schema initialization and destructive reset.
//!
//! `reset_database` is the full initialization sequence: every application
//! table is dropped if present and then recreated from the migrations. It
//! deletes all rows and must only run during setup or reset, never against a
//! database whose data is still needed. `initialize` is the non-destructive
//! variant that only creates what is missing.

use tracing::{info, warn};

use super::migrations::{migrate_connection, LEDGER_TABLE};
use super::util::sqlite_path;
use crate::error::Result;
use crate::migrations::TABLES;

/// Create any missing tables, keeping existing data.
pub async fn initialize(database_url: &str) -> Result<Vec<String>> {
    super::migrations::run_migrations(database_url).await
}

/// Drop and recreate all application tables.
///
/// Idempotent: running it twice in a row leaves the same four empty tables.
/// System-generated ids restart at 1 because dropping an AUTOINCREMENT table
/// also drops its `sqlite_sequence` entry.
pub async fn reset_database(database_url: &str) -> Result<()> {
    let path = sqlite_path(database_url).to_string();

    tokio::task::spawn_blocking(move || {
        let mut conn = rusqlite::Connection::open(&path)?;
        reset_connection(&mut conn)
    })
    .await?
}

/// Drop and recreate all application tables on an open connection.
pub fn reset_connection(conn: &mut rusqlite::Connection) -> Result<()> {
    warn!("Resetting database: dropping {}", TABLES.join(", "));

    let tx = conn.transaction()?;
    for table in TABLES {
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {table}"))?;
    }
    tx.execute_batch(&format!("DROP TABLE IF EXISTS {LEDGER_TABLE}"))?;
    tx.commit()?;

    let applied = migrate_connection(conn)?;
    info!(
        "Database reset complete ({} migration(s) applied)",
        applied.len()
    );
    Ok(())
}
