//! Diesel ORM models for the four application tables.
//!
//! Records are what a `SELECT` returns; the borrowed `New*` structs are what
//! callers insert. Optional fields left as `None` are stored as NULL, and
//! columns that are absent from a `New*` struct (system-generated ids and the
//! `scraped_at`/`fetched_at` timestamps) take the engine default.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

use crate::schema;

/// User record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize)]
#[diesel(table_name = schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    /// Opaque to this layer; the application owns its format.
    pub preferences: Option<String>,
}

/// New user for insertion.
///
/// `id` is normally supplied by the caller. When it is `None`, SQLite picks
/// the next rowid, which may reuse ids freed by deletes.
#[derive(Insertable, Debug, Clone, Copy, Default)]
#[diesel(table_name = schema::users)]
pub struct NewUser<'a> {
    pub id: Option<i64>,
    pub name: &'a str,
    pub preferences: Option<&'a str>,
}

/// Internal campus event record.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize)]
#[diesel(table_name = schema::events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EventRecord {
    pub id: i64,
    pub title: String,
    pub location: Option<String>,
    pub date: Option<String>,
}

/// New internal event for insertion.
#[derive(Insertable, Debug, Clone, Copy, Default)]
#[diesel(table_name = schema::events)]
pub struct NewEvent<'a> {
    pub id: Option<i64>,
    pub title: &'a str,
    pub location: Option<&'a str>,
    pub date: Option<&'a str>,
}

/// Scraped external event record.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize)]
#[diesel(table_name = schema::external_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExternalEventRecord {
    pub id: i64,
    pub title: String,
    pub location: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub description: Option<String>,
    pub source_url: Option<String>,
    pub scraped_at: Option<NaiveDateTime>,
}

/// New external event. The id and `scraped_at` are assigned on insert.
#[derive(Insertable, Debug, Clone, Copy, Default)]
#[diesel(table_name = schema::external_events)]
pub struct NewExternalEvent<'a> {
    pub title: &'a str,
    pub location: Option<&'a str>,
    pub date: Option<&'a str>,
    pub time: Option<&'a str>,
    pub description: Option<&'a str>,
    pub source_url: Option<&'a str>,
}

/// Weather snapshot record from the `api_data` table.
///
/// Numeric readings are INTEGER columns; fractional values from the
/// upstream feed do not survive storage.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize)]
#[diesel(table_name = schema::api_data)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WeatherRecord {
    pub id: i64,
    pub location_name: String,
    pub country: Option<String>,
    pub region: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub timezone_id: Option<String>,
    pub localtime: Option<String>,
    pub temperature: Option<i64>,
    pub weather_code: Option<i64>,
    pub weather_icons: Option<String>,
    pub weather_descriptions: Option<String>,
    pub wind_speed: Option<i64>,
    pub wind_degree: Option<i64>,
    pub wind_dir: Option<String>,
    pub pressure: Option<i64>,
    pub precip: Option<i64>,
    pub humidity: Option<i64>,
    pub cloudcover: Option<i64>,
    pub feelslike: Option<i64>,
    pub uv_index: Option<i64>,
    pub visibility: Option<i64>,
    pub observation_time: Option<String>,
    pub fetched_at: Option<NaiveDateTime>,
}

/// New weather snapshot. The id and `fetched_at` are assigned on insert.
#[derive(Insertable, Debug, Clone, Copy, Default)]
#[diesel(table_name = schema::api_data)]
pub struct NewWeatherSnapshot<'a> {
    pub location_name: &'a str,
    pub country: Option<&'a str>,
    pub region: Option<&'a str>,
    pub lat: Option<&'a str>,
    pub lon: Option<&'a str>,
    pub timezone_id: Option<&'a str>,
    pub localtime: Option<&'a str>,
    pub temperature: Option<i64>,
    pub weather_code: Option<i64>,
    pub weather_icons: Option<&'a str>,
    pub weather_descriptions: Option<&'a str>,
    pub wind_speed: Option<i64>,
    pub wind_degree: Option<i64>,
    pub wind_dir: Option<&'a str>,
    pub pressure: Option<i64>,
    pub precip: Option<i64>,
    pub humidity: Option<i64>,
    pub cloudcover: Option<i64>,
    pub feelslike: Option<i64>,
    pub uv_index: Option<i64>,
    pub visibility: Option<i64>,
    pub observation_time: Option<&'a str>,
}

/// Convert a fractional reading to what an INTEGER column holds.
///
/// Truncates toward zero, the same as the upstream schema. Only the
/// fractional part is lost: values outside the 64-bit range a SQLite INTEGER
/// holds, and non-finite input, map to `None` instead of saturating.
pub fn integer_reading(value: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    const UPPER: f64 = i64::MAX as f64;
    const LOWER: f64 = i64::MIN as f64;

    let truncated = value.trunc();
    if truncated.is_finite() && (LOWER..UPPER).contains(&truncated) {
        Some(truncated as i64)
    } else {
        None
    }
}

/// Row returned by `SELECT last_insert_rowid()`.
#[derive(QueryableByName)]
pub(crate) struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::BigInt, column_name = "last_insert_rowid()")]
    pub id: i64,
}
