// SPDX-License-Identifier: MIT

//! Relational store for user profiles and trips

use crate::adk::error::{Result, StorageError};
use crate::butler::config::SqliteSettings;
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqlitePool, SqliteRow};
use sqlx::{Column, Row, TypeInfo, ValueRef};

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    profile_json TEXT,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)"#;

const CREATE_TRIPS: &str = r#"
CREATE TABLE IF NOT EXISTS trips (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT REFERENCES users(id),
    gpx TEXT,
    notes TEXT,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)"#;

/// A completed hike on record
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Trip {
    pub id: i64,
    pub user_id: Option<String>,
    pub gpx: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone)]
pub struct RelationalStore {
    pool: SqlitePool,
}

impl RelationalStore {
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        match super::connect_pool(url, max_connections).await {
            Ok(pool) => {
                log::info!("Relational store connected: {}", url);
                Ok(Self { pool })
            }
            Err(e) => {
                log::error!("Relational store connection failed: {}", e);
                Err(e)
            }
        }
    }

    pub async fn from_settings(settings: &SqliteSettings) -> Result<Self> {
        Self::connect(&settings.url, settings.pool_size).await
    }

    pub async fn close(&self) {
        self.pool.close().await;
        log::info!("Relational store closed");
    }

    /// Run a parameterized query and return each row as a JSON object
    pub async fn execute_query(&self, sql: &str, params: &[Value]) -> Result<Vec<Map<String, Value>>> {
        let rows = match bind_params(sqlx::query(sql), params)
            .fetch_all(&self.pool)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                log::error!("Query failed: {}", e);
                return Err(e.into());
            }
        };

        rows.iter().map(row_to_json).collect()
    }

    /// Run a parameterized statement in a transaction, returning rows affected
    pub async fn execute_update(&self, sql: &str, params: &[Value]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        match bind_params(sqlx::query(sql), params)
            .execute(&mut *tx)
            .await
        {
            Ok(done) => {
                tx.commit().await?;
                Ok(done.rows_affected())
            }
            Err(e) => {
                log::error!("Update failed: {}", e);
                tx.rollback().await?;
                Err(e.into())
            }
        }
    }

    pub async fn init_tables(&self) -> Result<()> {
        for ddl in [CREATE_USERS, CREATE_TRIPS] {
            if let Err(e) = self.execute_update(ddl, &[]).await {
                log::error!("Table initialization failed: {}", e);
                return Err(e);
            }
        }
        log::info!("Tables initialized");
        Ok(())
    }

    pub async fn get_user_profile(&self, user_id: &str) -> Result<Option<Value>> {
        let rows = self
            .execute_query(
                "SELECT profile_json FROM users WHERE id = ?1",
                &[Value::from(user_id)],
            )
            .await?;

        match rows.first().and_then(|row| row.get("profile_json")) {
            Some(Value::String(text)) => serde_json::from_str(text)
                .map(Some)
                .map_err(|_| StorageError::CorruptProfile(user_id.to_string()).into()),
            _ => Ok(None),
        }
    }

    /// Insert or replace the profile blob for a user
    pub async fn save_user_profile(&self, user_id: &str, profile: &Value) -> Result<()> {
        let profile_json = serde_json::to_string(profile)?;
        self.execute_update(
            "INSERT INTO users (id, profile_json) VALUES (?1, ?2) \
             ON CONFLICT(id) DO UPDATE SET profile_json = excluded.profile_json, \
             updated_at = CURRENT_TIMESTAMP",
            &[Value::from(user_id), Value::from(profile_json)],
        )
        .await?;
        Ok(())
    }

    pub async fn add_trip(&self, user_id: &str, gpx: Option<&str>, notes: Option<&str>) -> Result<i64> {
        let result = sqlx::query("INSERT INTO trips (user_id, gpx, notes) VALUES (?1, ?2, ?3)")
            .bind(user_id)
            .bind(gpx)
            .bind(notes)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(e) => {
                log::error!("Trip insert failed: {}", e);
                Err(e.into())
            }
        }
    }

    pub async fn list_trips(&self, user_id: &str) -> Result<Vec<Trip>> {
        let trips = sqlx::query_as::<_, Trip>(
            "SELECT id, user_id, gpx, notes, created_at FROM trips WHERE user_id = ?1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(trips)
    }
}

fn bind_params<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &'q [Value],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            Value::Null => query.bind(None::<String>),
            Value::Bool(b) => query.bind(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => query.bind(i),
                None => query.bind(n.as_f64()),
            },
            Value::String(s) => query.bind(s.as_str()),
            other => query.bind(other.to_string()),
        };
    }
    query
}

fn row_to_json(row: &SqliteRow) -> Result<Map<String, Value>> {
    let mut object = Map::new();
    for column in row.columns() {
        let idx = column.ordinal();
        let raw = row.try_get_raw(idx)?;
        let value = if raw.is_null() {
            Value::Null
        } else {
            let type_name = raw.type_info().name().to_string();
            match type_name.as_str() {
                "INTEGER" | "BOOLEAN" => Value::from(row.try_get_unchecked::<i64, _>(idx)?),
                "REAL" => Value::from(row.try_get_unchecked::<f64, _>(idx)?),
                "BLOB" => Value::from(row.try_get_unchecked::<Vec<u8>, _>(idx)?),
                _ => Value::from(row.try_get_unchecked::<String, _>(idx)?),
            }
        };
        object.insert(column.name().to_string(), value);
    }
    Ok(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn store() -> RelationalStore {
        let store = RelationalStore::connect("sqlite::memory:", 1).await.unwrap();
        store.init_tables().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_profile_round_trip_and_upsert() {
        let store = store().await;
        assert!(store.get_user_profile("alice").await.unwrap().is_none());

        let profile = json!({"level": "intermediate", "gear": ["poles", "shell"]});
        store.save_user_profile("alice", &profile).await.unwrap();
        assert_eq!(store.get_user_profile("alice").await.unwrap(), Some(profile));

        let updated = json!({"level": "advanced"});
        store.save_user_profile("alice", &updated).await.unwrap();
        assert_eq!(store.get_user_profile("alice").await.unwrap(), Some(updated));

        let rows = store
            .execute_query("SELECT COUNT(*) AS n FROM users", &[])
            .await
            .unwrap();
        assert_eq!(rows[0]["n"], json!(1));
    }

    #[tokio::test]
    async fn test_trips_recorded_per_user() {
        let store = store().await;
        store.save_user_profile("bob", &json!({})).await.unwrap();

        let first = store.add_trip("bob", Some("<gpx/>"), Some("windy ridge")).await.unwrap();
        let second = store.add_trip("bob", None, Some("easy loop")).await.unwrap();
        assert!(second > first);

        let trips = store.list_trips("bob").await.unwrap();
        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].gpx.as_deref(), Some("<gpx/>"));
        assert_eq!(trips[1].notes.as_deref(), Some("easy loop"));
        assert!(store.list_trips("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_trip_requires_known_user() {
        let store = store().await;
        assert!(store.add_trip("ghost", None, None).await.is_err());
    }

    #[tokio::test]
    async fn test_execute_query_maps_column_types() {
        let store = store().await;
        let rows = store
            .execute_query(
                "SELECT ?1 AS i, ?2 AS r, ?3 AS t, ?4 AS n, ?5 AS b",
                &[json!(7), json!(2.5), json!("trail"), Value::Null, json!(true)],
            )
            .await
            .unwrap();

        assert_eq!(rows[0]["i"], json!(7));
        assert_eq!(rows[0]["r"], json!(2.5));
        assert_eq!(rows[0]["t"], json!("trail"));
        assert_eq!(rows[0]["n"], Value::Null);
        assert_eq!(rows[0]["b"], json!(1));
    }

    #[tokio::test]
    async fn test_execute_update_reports_rows_and_errors() {
        let store = store().await;
        let inserted = store
            .execute_update(
                "INSERT INTO users (id, profile_json) VALUES (?1, ?2), (?3, ?4)",
                &[json!("a"), json!("{}"), json!("b"), json!("{}")],
            )
            .await
            .unwrap();
        assert_eq!(inserted, 2);

        let err = store.execute_update("INSERT INTO nowhere VALUES (1)", &[]).await;
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn test_corrupt_profile_is_error() {
        let store = store().await;
        store
            .execute_update(
                "INSERT INTO users (id, profile_json) VALUES (?1, ?2)",
                &[json!("carol"), json!("not json")],
            )
            .await
            .unwrap();
        assert!(store.get_user_profile("carol").await.is_err());
    }
}
