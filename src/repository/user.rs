//! User repository.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::models::{LastInsertRowId, NewUser, UserRecord};
use super::pool::{AsyncSqlitePool, DieselError};
use crate::schema::users;

/// Repository for the `users` table.
#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncSqlitePool,
}

impl UserRepository {
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a user and return its id.
    ///
    /// Fails with a not-null violation if `name` is missing at the SQL level,
    /// or a unique violation if the caller-supplied id is taken.
    pub async fn insert(&self, user: NewUser<'_>) -> Result<i64, DieselError> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(users::table)
            .values(&user)
            .execute(&mut conn)
            .await?;

        diesel::sql_query("SELECT last_insert_rowid()")
            .get_result::<LastInsertRowId>(&mut conn)
            .await
            .map(|r| r.id)
    }

    pub async fn get(&self, id: i64) -> Result<Option<UserRecord>, DieselError> {
        let mut conn = self.pool.get().await?;

        users::table
            .find(id)
            .select(UserRecord::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    /// All users ordered by id.
    pub async fn get_all(&self) -> Result<Vec<UserRecord>, DieselError> {
        let mut conn = self.pool.get().await?;

        users::table
            .order(users::id.asc())
            .select(UserRecord::as_select())
            .load(&mut conn)
            .await
    }

    /// Replace the stored preferences. Returns false if the user does not exist.
    pub async fn update_preferences(
        &self,
        id: i64,
        preferences: Option<&str>,
    ) -> Result<bool, DieselError> {
        let mut conn = self.pool.get().await?;

        let rows = diesel::update(users::table.find(id))
            .set(users::preferences.eq(preferences))
            .execute(&mut conn)
            .await?;

        Ok(rows > 0)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, DieselError> {
        let mut conn = self.pool.get().await?;

        let rows = diesel::delete(users::table.find(id))
            .execute(&mut conn)
            .await?;

        Ok(rows > 0)
    }

    pub async fn count(&self) -> Result<i64, DieselError> {
        let mut conn = self.pool.get().await?;

        users::table.count().get_result(&mut conn).await
    }
}
