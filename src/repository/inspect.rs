//! Read back the live schema of a database.
//!
//! Captures what SQLite reports through `sqlite_master` and
//! `PRAGMA table_info`, so callers can confirm a database file matches the
//! declared column set without trusting the migration ledger.

use std::collections::BTreeMap;

use rusqlite::Connection;
use serde::Serialize;

use super::util::sqlite_path;
use crate::error::Result;

/// One column as SQLite reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub col_type: String,
    pub not_null: bool,
    pub default_value: Option<String>,
    pub primary_key: bool,
}

/// A table and its columns in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
    pub autoincrement: bool,
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Names of NOT NULL columns, excluding the primary key.
    pub fn required_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.not_null && !c.primary_key)
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// Application tables keyed by name. Internal `sqlite_*` tables and the
/// `__`-prefixed migration ledger are left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaSnapshot {
    pub tables: BTreeMap<String, TableSchema>,
    pub index_count: usize,
}

impl SchemaSnapshot {
    /// Capture the schema of the database at `database_url`.
    pub async fn capture(database_url: &str) -> Result<Self> {
        let path = sqlite_path(database_url).to_string();

        tokio::task::spawn_blocking(move || {
            let conn = Connection::open(&path)?;
            Self::from_connection(&conn)
        })
        .await?
    }

    pub fn from_connection(conn: &Connection) -> Result<Self> {
        let mut stmt = conn.prepare(
            "SELECT name, sql FROM sqlite_master WHERE type='table' \
             AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )?;

        let rows: Vec<(String, Option<String>)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut tables = BTreeMap::new();
        for (name, sql) in rows {
            if name.starts_with("__") {
                continue;
            }
            let columns = table_columns(conn, &name)?;
            let autoincrement = sql
                .map(|s| s.to_uppercase().contains("AUTOINCREMENT"))
                .unwrap_or(false);
            tables.insert(
                name.clone(),
                TableSchema {
                    name,
                    columns,
                    autoincrement,
                },
            );
        }

        // Implicit primary key indexes have no SQL and are not counted.
        let index_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='index' AND sql IS NOT NULL",
            [],
            |row| row.get(0),
        )?;

        Ok(Self {
            tables,
            index_count: usize::try_from(index_count).unwrap_or_default(),
        })
    }

    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.get(name)
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }
}

fn table_columns(conn: &Connection, table: &str) -> Result<Vec<ColumnInfo>> {
    let mut pragma = conn.prepare(&format!("PRAGMA table_info(\"{}\")", table))?;
    let columns = pragma
        .query_map([], |row| {
            Ok(ColumnInfo {
                name: row.get(1)?,
                col_type: row.get::<_, String>(2)?.to_uppercase(),
                not_null: row.get(3)?,
                default_value: row.get(4)?,
                primary_key: row.get::<_, i32>(5)? > 0,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(columns)
}
