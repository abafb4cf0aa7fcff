use cetane::prelude::*;

pub fn migration() -> Migration {
    Migration::new(super::INITIAL_SCHEMA)
        // users - caller-assigned id, no AUTOINCREMENT
        .operation(
            RunSql::portable()
                .for_backend(
                    "sqlite",
                    r#"CREATE TABLE users (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    preferences TEXT
)"#,
                )
                .for_backend(
                    "postgres",
                    r#"CREATE TABLE users (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    preferences TEXT
)"#,
                ),
        )
        // events - internal campus events
        .operation(
            RunSql::portable()
                .for_backend(
                    "sqlite",
                    r#"CREATE TABLE events (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    location TEXT,
    date TEXT
)"#,
                )
                .for_backend(
                    "postgres",
                    r#"CREATE TABLE events (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    location TEXT,
    date TEXT
)"#,
                ),
        )
        // external_events - backend-specific due to SERIAL vs AUTOINCREMENT
        .operation(
            RunSql::portable()
                .for_backend(
                    "sqlite",
                    r#"CREATE TABLE external_events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    location TEXT,
    date TEXT,
    time TEXT,
    description TEXT,
    source_url TEXT,
    scraped_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)"#,
                )
                .for_backend(
                    "postgres",
                    r#"CREATE TABLE external_events (
    id SERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    location TEXT,
    date TEXT,
    time TEXT,
    description TEXT,
    source_url TEXT,
    scraped_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)"#,
                ),
        )
        // api_data - weather snapshots; numeric readings are INTEGER and truncate
        .operation(
            RunSql::portable()
                .for_backend(
                    "sqlite",
                    r#"CREATE TABLE api_data (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    location_name TEXT NOT NULL,
    country TEXT,
    region TEXT,
    lat TEXT,
    lon TEXT,
    timezone_id TEXT,
    localtime TEXT,
    temperature INTEGER,
    weather_code INTEGER,
    weather_icons TEXT,
    weather_descriptions TEXT,
    wind_speed INTEGER,
    wind_degree INTEGER,
    wind_dir TEXT,
    pressure INTEGER,
    precip INTEGER,
    humidity INTEGER,
    cloudcover INTEGER,
    feelslike INTEGER,
    uv_index INTEGER,
    visibility INTEGER,
    observation_time TEXT,
    fetched_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)"#,
                )
                .for_backend(
                    "postgres",
                    r#"CREATE TABLE api_data (
    id SERIAL PRIMARY KEY,
    location_name TEXT NOT NULL,
    country TEXT,
    region TEXT,
    lat TEXT,
    lon TEXT,
    timezone_id TEXT,
    "localtime" TEXT,
    temperature INTEGER,
    weather_code INTEGER,
    weather_icons TEXT,
    weather_descriptions TEXT,
    wind_speed INTEGER,
    wind_degree INTEGER,
    wind_dir TEXT,
    pressure INTEGER,
    precip INTEGER,
    humidity INTEGER,
    cloudcover INTEGER,
    feelslike INTEGER,
    uv_index INTEGER,
    visibility INTEGER,
    observation_time TEXT,
    fetched_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)"#,
                ),
        )
}
