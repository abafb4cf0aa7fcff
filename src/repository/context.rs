//! Database context for managing connections and repository access.

use std::path::Path;

use super::event::EventRepository;
use super::external_event::ExternalEventRepository;
use super::inspect::SchemaSnapshot;
use super::pool::AsyncSqlitePool;
use super::user::UserRepository;
use super::weather::WeatherRepository;
use crate::error::Result;

/// Entry point for database operations. Create one per command or service,
/// then use it to reach every repository.
///
/// # Example
/// ```ignore
/// let ctx = DbContext::from_url("sqlite:db/campus_connect.db");
/// ctx.migrate().await?;
/// let events = ctx.events().get_all().await?;
/// ```
#[derive(Clone, Debug)]
pub struct DbContext {
    pool: AsyncSqlitePool,
}

impl DbContext {
    /// Create a context from a file path.
    pub fn new(db_path: &Path) -> Self {
        Self {
            pool: AsyncSqlitePool::from_path(db_path),
        }
    }

    /// Create a context from a database URL (`sqlite:path` or a plain path).
    pub fn from_url(database_url: &str) -> Self {
        Self {
            pool: AsyncSqlitePool::new(database_url),
        }
    }

    pub fn with_pool(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &AsyncSqlitePool {
        &self.pool
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    pub fn events(&self) -> EventRepository {
        EventRepository::new(self.pool.clone())
    }

    pub fn external_events(&self) -> ExternalEventRepository {
        ExternalEventRepository::new(self.pool.clone())
    }

    pub fn weather(&self) -> WeatherRepository {
        WeatherRepository::new(self.pool.clone())
    }

    /// Create missing tables, keeping existing rows.
    pub async fn migrate(&self) -> Result<Vec<String>> {
        super::reset::initialize(self.pool.database_url()).await
    }

    /// Drop and recreate every application table. Destroys all rows.
    pub async fn reset(&self) -> Result<()> {
        super::reset::reset_database(self.pool.database_url()).await
    }

    /// Read back the live schema.
    pub async fn schema(&self) -> Result<SchemaSnapshot> {
        SchemaSnapshot::capture(self.pool.database_url()).await
    }
}
