//! Development fixture data.
//!
//! Loads a small set of users, internal events and weather snapshots so the
//! application has something to show on a fresh database.

use diesel_async::{AsyncConnection, RunQueryDsl};
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::repository::models::integer_reading;
use crate::repository::{DbContext, DieselError, NewEvent, NewUser, NewWeatherSnapshot};
use crate::schema;

/// Row counts after seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub users: i64,
    pub events: i64,
    pub external_events: i64,
    pub weather_snapshots: i64,
}

const USERS: [(&str, &str); 3] = [("Alice", "Aly"), ("Bob", "art, Bobby"), ("Charlie", "Chaz")];

const EVENTS: [(&str, &str, &str); 3] = [
    ("Music Night", "Student Center", "2025-04-05"),
    ("Hackathon", "Library", "2025-04-01"),
    ("Art Exhibition", "Gallery", "2025-04-10"),
];

fn weather_fixtures() -> [NewWeatherSnapshot<'static>; 2] {
    [
        NewWeatherSnapshot {
            location_name: "New York",
            country: Some("United States of America"),
            region: Some("New York"),
            lat: Some("40.714"),
            lon: Some("-74.006"),
            timezone_id: Some("America/New_York"),
            localtime: Some("2025-11-21 10:00"),
            temperature: Some(13),
            weather_code: Some(113),
            weather_icons: None,
            weather_descriptions: Some("Sunny"),
            wind_speed: Some(15),
            wind_degree: Some(180),
            wind_dir: Some("S"),
            pressure: Some(1013),
            precip: Some(0),
            humidity: Some(65),
            cloudcover: Some(25),
            feelslike: Some(12),
            uv_index: Some(4),
            visibility: Some(16),
            observation_time: Some("02:00 PM"),
        },
        NewWeatherSnapshot {
            location_name: "London",
            country: Some("United Kingdom"),
            region: Some("City of London"),
            lat: Some("51.517"),
            lon: Some("-0.106"),
            timezone_id: Some("Europe/London"),
            localtime: Some("2025-11-21 15:00"),
            temperature: Some(8),
            weather_code: Some(116),
            weather_icons: None,
            weather_descriptions: Some("Partly Cloudy"),
            wind_speed: Some(20),
            wind_degree: Some(270),
            wind_dir: Some("W"),
            pressure: Some(1010),
            // Reported as 0.5; the column is INTEGER.
            precip: integer_reading(0.5),
            humidity: Some(75),
            cloudcover: Some(50),
            feelslike: Some(6),
            uv_index: Some(2),
            visibility: Some(10),
            observation_time: Some("03:00 PM"),
        },
    ]
}

/// Insert the fixture rows into an already-migrated database.
///
/// All rows go in through one transaction, so a failure leaves the database
/// as it was. Users and events get engine-assigned ids. Running it twice
/// inserts the fixtures twice; use [`seed_fresh`] for a clean slate.
pub async fn seed_database(ctx: &DbContext) -> Result<SeedSummary> {
    let users: Vec<NewUser<'static>> = USERS
        .iter()
        .map(|&(name, preferences)| NewUser {
            id: None,
            name,
            preferences: Some(preferences),
        })
        .collect();
    let events: Vec<NewEvent<'static>> = EVENTS
        .iter()
        .map(|&(title, location, date)| NewEvent {
            id: None,
            title,
            location: Some(location),
            date: Some(date),
        })
        .collect();
    let snapshots = weather_fixtures();

    let mut conn = ctx.pool().get().await?;
    conn.transaction(|conn| {
        Box::pin(async move {
            for user in &users {
                diesel::insert_into(schema::users::table)
                    .values(user)
                    .execute(conn)
                    .await?;
            }
            for event in &events {
                diesel::insert_into(schema::events::table)
                    .values(event)
                    .execute(conn)
                    .await?;
            }
            for snapshot in &snapshots {
                diesel::insert_into(schema::api_data::table)
                    .values(snapshot)
                    .execute(conn)
                    .await?;
            }
            Ok::<_, DieselError>(())
        })
    })
    .await?;

    let summary = SeedSummary {
        users: ctx.users().count().await?,
        events: ctx.events().count().await?,
        external_events: ctx.external_events().count().await?,
        weather_snapshots: ctx.weather().count().await?,
    };

    info!(
        "Seeded database: {} users, {} events, {} weather snapshots",
        summary.users, summary.events, summary.weather_snapshots
    );

    Ok(summary)
}

/// Reset the database, then load the fixtures.
pub async fn seed_fresh(ctx: &DbContext) -> Result<SeedSummary> {
    ctx.reset().await?;
    seed_database(ctx).await
}
