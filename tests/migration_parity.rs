//! Migration Parity Tests
//!
//! Verifies that the cetane migrations produce exactly the column set the
//! rest of the crate (diesel `table!` declarations, repositories) relies on.

use std::collections::BTreeMap;

use campus_connect::migrations::{registry, TABLES};
use campus_connect::repository::migrations::migrate_connection;
use campus_connect::repository::SchemaSnapshot;
use rusqlite::Connection;

/// (column, declared type, NOT NULL, primary key, default)
type ExpectedColumn = (&'static str, &'static str, bool, bool, Option<&'static str>);

const USERS: &[ExpectedColumn] = &[
    ("id", "INTEGER", false, true, None),
    ("name", "TEXT", true, false, None),
    ("preferences", "TEXT", false, false, None),
];

const EVENTS: &[ExpectedColumn] = &[
    ("id", "INTEGER", false, true, None),
    ("title", "TEXT", true, false, None),
    ("location", "TEXT", false, false, None),
    ("date", "TEXT", false, false, None),
];

const EXTERNAL_EVENTS: &[ExpectedColumn] = &[
    ("id", "INTEGER", false, true, None),
    ("title", "TEXT", true, false, None),
    ("location", "TEXT", false, false, None),
    ("date", "TEXT", false, false, None),
    ("time", "TEXT", false, false, None),
    ("description", "TEXT", false, false, None),
    ("source_url", "TEXT", false, false, None),
    ("scraped_at", "TIMESTAMP", false, false, Some("CURRENT_TIMESTAMP")),
];

const API_DATA: &[ExpectedColumn] = &[
    ("id", "INTEGER", false, true, None),
    ("location_name", "TEXT", true, false, None),
    ("country", "TEXT", false, false, None),
    ("region", "TEXT", false, false, None),
    ("lat", "TEXT", false, false, None),
    ("lon", "TEXT", false, false, None),
    ("timezone_id", "TEXT", false, false, None),
    ("localtime", "TEXT", false, false, None),
    ("temperature", "INTEGER", false, false, None),
    ("weather_code", "INTEGER", false, false, None),
    ("weather_icons", "TEXT", false, false, None),
    ("weather_descriptions", "TEXT", false, false, None),
    ("wind_speed", "INTEGER", false, false, None),
    ("wind_degree", "INTEGER", false, false, None),
    ("wind_dir", "TEXT", false, false, None),
    ("pressure", "INTEGER", false, false, None),
    ("precip", "INTEGER", false, false, None),
    ("humidity", "INTEGER", false, false, None),
    ("cloudcover", "INTEGER", false, false, None),
    ("feelslike", "INTEGER", false, false, None),
    ("uv_index", "INTEGER", false, false, None),
    ("visibility", "INTEGER", false, false, None),
    ("observation_time", "TEXT", false, false, None),
    ("fetched_at", "TIMESTAMP", false, false, Some("CURRENT_TIMESTAMP")),
];

fn expected_tables() -> BTreeMap<&'static str, &'static [ExpectedColumn]> {
    BTreeMap::from([
        ("users", USERS),
        ("events", EVENTS),
        ("external_events", EXTERNAL_EVENTS),
        ("api_data", API_DATA),
    ])
}

/// Compare the expected column set with what SQLite reports.
fn compare(snapshot: &SchemaSnapshot) -> Vec<String> {
    let mut diffs = Vec::new();
    let expected = expected_tables();

    for name in expected.keys() {
        if snapshot.table(name).is_none() {
            diffs.push(format!("Missing table: {}", name));
        }
    }
    for name in snapshot.table_names() {
        if !expected.contains_key(name) {
            diffs.push(format!("Unexpected table: {}", name));
        }
    }

    for (name, columns) in &expected {
        let Some(table) = snapshot.table(name) else {
            continue;
        };

        let actual_order: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        let expected_order: Vec<&str> = columns.iter().map(|c| c.0).collect();
        if actual_order != expected_order {
            diffs.push(format!(
                "Column order in {}: expected={:?}, actual={:?}",
                name, expected_order, actual_order
            ));
        }

        for (col, col_type, not_null, pk, default) in columns.iter() {
            let Some(actual) = table.column(col) else {
                diffs.push(format!("Missing column: {}.{}", name, col));
                continue;
            };
            if actual.col_type != *col_type {
                diffs.push(format!(
                    "Type mismatch in {}.{}: expected={}, actual={}",
                    name, col, col_type, actual.col_type
                ));
            }
            if actual.not_null != *not_null {
                diffs.push(format!("NOT NULL mismatch in {}.{}", name, col));
            }
            if actual.primary_key != *pk {
                diffs.push(format!("PRIMARY KEY mismatch in {}.{}", name, col));
            }
            if actual.default_value.as_deref() != *default {
                diffs.push(format!(
                    "Default mismatch in {}.{}: expected={:?}, actual={:?}",
                    name, col, default, actual.default_value
                ));
            }
        }
    }

    diffs
}

#[test]
fn test_schema_parity() {
    let conn = Connection::open_in_memory().expect("Failed to open DB");
    migrate_connection(&conn).expect("Failed to run migrations");
    let snapshot = SchemaSnapshot::from_connection(&conn).expect("Failed to read schema");

    let diffs = compare(&snapshot);
    assert!(diffs.is_empty(), "Schema differences:\n  {}", diffs.join("\n  "));

    assert_eq!(snapshot.index_count, 0, "only primary keys are expected");
    assert!(!snapshot.table("users").unwrap().autoincrement);
    assert!(!snapshot.table("events").unwrap().autoincrement);
    assert!(snapshot.table("external_events").unwrap().autoincrement);
    assert!(snapshot.table("api_data").unwrap().autoincrement);
}

#[test]
fn test_tables_constant_matches_registry() {
    let conn = Connection::open_in_memory().expect("Failed to open DB");
    migrate_connection(&conn).expect("Failed to run migrations");
    let snapshot = SchemaSnapshot::from_connection(&conn).unwrap();

    let mut from_constant: Vec<&str> = TABLES.to_vec();
    from_constant.sort_unstable();
    assert_eq!(snapshot.table_names(), from_constant);
}

#[test]
fn test_individual_migrations_generate_valid_sql() {
    use cetane::backend::Sqlite;

    let registry = registry();
    let backend = Sqlite;

    let ordered_names = registry
        .resolve_order()
        .expect("Failed to resolve migration order");

    let conn = Connection::open_in_memory().expect("Failed to open DB");
    for name in ordered_names {
        let migration = registry.get(name).expect("Migration not found");
        for stmt in migration.forward_sql(&backend) {
            if stmt.trim().is_empty() {
                continue;
            }
            conn.execute_batch(&stmt)
                .unwrap_or_else(|e| {
                    panic!("Migration {} failed: {}\nSQL: {}", migration.name, e, stmt)
                });
        }
    }
}

#[test]
fn test_postgres_sql_generation() {
    use cetane::backend::Postgres;

    let registry = registry();
    let backend = Postgres;

    let ordered_names = registry
        .resolve_order()
        .expect("Failed to resolve migration order");

    for name in ordered_names {
        let migration = registry.get(name).expect("Migration not found");
        let statements = migration.forward_sql(&backend);

        assert!(
            !statements.is_empty(),
            "Migration {} produced no SQL for Postgres",
            migration.name
        );

        for stmt in &statements {
            assert!(
                !stmt.contains("AUTOINCREMENT"),
                "Migration {} uses AUTOINCREMENT in Postgres SQL (should be SERIAL)",
                migration.name
            );
        }
    }
}
