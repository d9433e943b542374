// SPDX-License-Identifier: MIT

//! Storage adapters
//!
//! - `RelationalStore` - user profiles, trip history and raw SQL passthrough
//! - `VectorStore` - embedded documents searched by cosine similarity
//!
//! Both sit on SQLite through sqlx.

mod relational;
mod vector;

pub use relational::{RelationalStore, Trip};
pub use vector::{SearchHit, VectorStore, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOP_K};

use crate::adk::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Open a pool, creating the database file when missing.
///
/// In-memory databases are per-connection in SQLite, so they get a single
/// connection that never expires.
pub(crate) async fn connect_pool(url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?
    };

    Ok(pool)
}
