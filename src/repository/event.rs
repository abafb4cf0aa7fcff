//! Internal (first-party) event repository.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::models::{EventRecord, LastInsertRowId, NewEvent};
use super::pool::{AsyncSqlitePool, DieselError};
use crate::schema::events;

/// Repository for the `events` table.
#[derive(Clone)]
pub struct EventRepository {
    pool: AsyncSqlitePool,
}

impl EventRepository {
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an event and return its id.
    pub async fn insert(&self, event: NewEvent<'_>) -> Result<i64, DieselError> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(events::table)
            .values(&event)
            .execute(&mut conn)
            .await?;

        diesel::sql_query("SELECT last_insert_rowid()")
            .get_result::<LastInsertRowId>(&mut conn)
            .await
            .map(|r| r.id)
    }

    pub async fn get(&self, id: i64) -> Result<Option<EventRecord>, DieselError> {
        let mut conn = self.pool.get().await?;

        events::table
            .find(id)
            .select(EventRecord::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    /// All events ordered by id. `date` is opaque text so no date ordering is attempted.
    pub async fn get_all(&self) -> Result<Vec<EventRecord>, DieselError> {
        let mut conn = self.pool.get().await?;

        events::table
            .order(events::id.asc())
            .select(EventRecord::as_select())
            .load(&mut conn)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<bool, DieselError> {
        let mut conn = self.pool.get().await?;

        let rows = diesel::delete(events::table.find(id))
            .execute(&mut conn)
            .await?;

        Ok(rows > 0)
    }

    pub async fn count(&self) -> Result<i64, DieselError> {
        let mut conn = self.pool.get().await?;

        events::table.count().get_result(&mut conn).await
    }
}
