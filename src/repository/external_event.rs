//! Append-only log of events ingested from external calendars.
//!
//! Rows are never updated and duplicates are accepted: the table carries no
//! uniqueness constraint, so dedup is the ingesting application's concern.

use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use super::models::{ExternalEventRecord, LastInsertRowId, NewExternalEvent};
use super::pool::{AsyncSqlitePool, DieselError};
use crate::schema::external_events;

/// Repository for the `external_events` table.
#[derive(Clone)]
pub struct ExternalEventRepository {
    pool: AsyncSqlitePool,
}

impl ExternalEventRepository {
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Append one event. The id and `scraped_at` are assigned by the engine.
    pub async fn append(&self, event: NewExternalEvent<'_>) -> Result<i64, DieselError> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(external_events::table)
            .values(&event)
            .execute(&mut conn)
            .await?;

        diesel::sql_query("SELECT last_insert_rowid()")
            .get_result::<LastInsertRowId>(&mut conn)
            .await
            .map(|r| r.id)
    }

    /// Append a batch in a single transaction, returning ids in input order.
    ///
    /// Either every row is stored or none is.
    pub async fn append_batch(
        &self,
        events: &[NewExternalEvent<'_>],
    ) -> Result<Vec<i64>, DieselError> {
        if events.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.pool.get().await?;
        let rows = events.to_vec();

        let ids = conn
            .transaction(|conn| {
                Box::pin(async move {
                    let mut ids = Vec::with_capacity(rows.len());
                    for row in &rows {
                        diesel::insert_into(external_events::table)
                            .values(row)
                            .execute(conn)
                            .await?;
                        let last: LastInsertRowId =
                            diesel::sql_query("SELECT last_insert_rowid()")
                                .get_result(conn)
                                .await?;
                        ids.push(last.id);
                    }
                    Ok::<_, DieselError>(ids)
                })
            })
            .await?;

        debug!("Appended {} external events", ids.len());
        Ok(ids)
    }

    pub async fn get(&self, id: i64) -> Result<Option<ExternalEventRecord>, DieselError> {
        let mut conn = self.pool.get().await?;

        external_events::table
            .find(id)
            .select(ExternalEventRecord::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    /// All events in insertion order.
    pub async fn get_all(&self) -> Result<Vec<ExternalEventRecord>, DieselError> {
        let mut conn = self.pool.get().await?;

        external_events::table
            .order(external_events::id.asc())
            .select(ExternalEventRecord::as_select())
            .load(&mut conn)
            .await
    }

    pub async fn count(&self) -> Result<i64, DieselError> {
        let mut conn = self.pool.get().await?;

        external_events::table.count().get_result(&mut conn).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::migrated_pool;
    use chrono::Utc;

    fn campus_event<'a>(title: &'a str) -> NewExternalEvent<'a> {
        NewExternalEvent {
            title,
            location: Some("Blue Mountain Christian University"),
            date: Some("2025-04-12"),
            time: Some("09:00 AM"),
            description: None,
            source_url: Some("https://events.bmc.edu/event/42"),
        }
    }

    #[tokio::test]
    async fn test_ids_increase_and_timestamp_defaults() {
        let (pool, _dir) = migrated_pool().await;
        let repo = ExternalEventRepository::new(pool);

        let before = Utc::now().naive_utc() - chrono::Duration::seconds(5);
        let first = repo.append(campus_event("Chapel")).await.unwrap();
        let second = repo.append(campus_event("Concert")).await.unwrap();
        assert!(second > first);

        let record = repo.get(second).await.unwrap().unwrap();
        assert_eq!(record.title, "Concert");
        assert!(record.description.is_none());
        let scraped_at = record.scraped_at.expect("scraped_at should default");
        assert!(scraped_at >= before);
        assert!(scraped_at <= Utc::now().naive_utc() + chrono::Duration::seconds(5));
    }

    #[tokio::test]
    async fn test_duplicates_are_accepted() {
        let (pool, _dir) = migrated_pool().await;
        let repo = ExternalEventRepository::new(pool);

        let a = repo.append(campus_event("Chapel")).await.unwrap();
        let b = repo.append(campus_event("Chapel")).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_append_batch() {
        let (pool, _dir) = migrated_pool().await;
        let repo = ExternalEventRepository::new(pool);

        let ids = repo
            .append_batch(&[
                campus_event("Chapel"),
                campus_event("Concert"),
                campus_event("Lecture"),
            ])
            .await
            .unwrap();
        assert_eq!(ids.len(), 3);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));

        let titles: Vec<String> = repo
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["Chapel", "Concert", "Lecture"]);

        assert!(repo.append_batch(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ids_keep_increasing_past_i32_max() {
        let (pool, _dir) = migrated_pool().await;
        let mut conn = pool.get().await.unwrap();
        diesel::insert_into(external_events::table)
            .values((
                external_events::id.eq(i64::from(i32::MAX)),
                external_events::title.eq("Legacy import"),
            ))
            .execute(&mut conn)
            .await
            .unwrap();

        let repo = ExternalEventRepository::new(pool);
        let next = repo.append(campus_event("Chapel")).await.unwrap();
        assert_eq!(next, i64::from(i32::MAX) + 1);
        assert_eq!(repo.get(next).await.unwrap().unwrap().title, "Chapel");

        let ids: Vec<i64> = repo.get_all().await.unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![i64::from(i32::MAX), next]);
    }
}
