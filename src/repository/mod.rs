//! Repository layer for database persistence.
//!
//! Row access uses Diesel ORM with compile-time query checking over an async
//! SQLite connection. Migrations, reset and schema inspection go through
//! rusqlite on blocking tasks.

pub mod context;
pub mod event;
pub mod external_event;
pub mod inspect;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod reset;
pub mod user;
pub mod util;
pub mod weather;

pub use context::DbContext;
pub use event::EventRepository;
pub use external_event::ExternalEventRepository;
pub use inspect::{ColumnInfo, SchemaSnapshot, TableSchema};
pub use migrations::run_migrations;
pub use models::{
    EventRecord, ExternalEventRecord, NewEvent, NewExternalEvent, NewUser, NewWeatherSnapshot,
    UserRecord, WeatherRecord,
};
pub use pool::{AsyncSqlitePool, DieselError};
pub use reset::{initialize, reset_database};
pub use user::UserRepository;
pub use weather::WeatherRepository;
