//! Append-only log of weather snapshots (`api_data` table).
//!
//! Each row is one point-in-time observation for a location. Nothing stops
//! two snapshots for the same place and time from coexisting.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::models::{LastInsertRowId, NewWeatherSnapshot, WeatherRecord};
use super::pool::{AsyncSqlitePool, DieselError};
use crate::schema::api_data;

/// Repository for the `api_data` table.
#[derive(Clone)]
pub struct WeatherRepository {
    pool: AsyncSqlitePool,
}

impl WeatherRepository {
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Append a snapshot. The id and `fetched_at` are assigned by the engine.
    pub async fn append(&self, snapshot: NewWeatherSnapshot<'_>) -> Result<i64, DieselError> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(api_data::table)
            .values(&snapshot)
            .execute(&mut conn)
            .await?;

        diesel::sql_query("SELECT last_insert_rowid()")
            .get_result::<LastInsertRowId>(&mut conn)
            .await
            .map(|r| r.id)
    }

    pub async fn get(&self, id: i64) -> Result<Option<WeatherRecord>, DieselError> {
        let mut conn = self.pool.get().await?;

        api_data::table
            .find(id)
            .select(WeatherRecord::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    /// Most recent snapshots first.
    ///
    /// `fetched_at` has one-second resolution, so ties are broken by id.
    pub async fn recent(&self, limit: i64) -> Result<Vec<WeatherRecord>, DieselError> {
        let mut conn = self.pool.get().await?;

        api_data::table
            .order((api_data::fetched_at.desc(), api_data::id.desc()))
            .limit(limit)
            .select(WeatherRecord::as_select())
            .load(&mut conn)
            .await
    }

    /// Latest snapshot recorded for an exact location name.
    pub async fn latest_for_location(
        &self,
        location_name: &str,
    ) -> Result<Option<WeatherRecord>, DieselError> {
        let mut conn = self.pool.get().await?;

        api_data::table
            .filter(api_data::location_name.eq(location_name))
            .order((api_data::fetched_at.desc(), api_data::id.desc()))
            .select(WeatherRecord::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    pub async fn count(&self) -> Result<i64, DieselError> {
        let mut conn = self.pool.get().await?;

        api_data::table.count().get_result(&mut conn).await
    }
}
