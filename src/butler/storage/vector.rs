// SPDX-License-Identifier: MIT

//! Persistent vector store for the hiking knowledge base
//!
//! Documents are embedded on insert and kept in a local SQLite file.
//! Search ranks every document of the collection by cosine distance.

use crate::adk::embedding::Embedder;
use crate::adk::error::{Result, StorageError};
use crate::butler::config::{EmbeddingSettings, VectorSettings};
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use std::sync::Arc;

pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.7;

const CREATE_COLLECTIONS: &str = r#"
CREATE TABLE IF NOT EXISTS vector_collections (
    name TEXT PRIMARY KEY,
    space TEXT NOT NULL,
    dimension INTEGER
)"#;

const CREATE_DOCUMENTS: &str = r#"
CREATE TABLE IF NOT EXISTS vector_documents (
    collection TEXT NOT NULL REFERENCES vector_collections(name) ON DELETE CASCADE,
    id TEXT NOT NULL,
    document TEXT NOT NULL,
    metadata TEXT NOT NULL,
    embedding TEXT NOT NULL,
    PRIMARY KEY (collection, id)
)"#;

/// A search result above the similarity threshold
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchHit {
    pub id: String,
    pub document: String,
    pub metadata: Value,
    pub similarity: f32,
    pub distance: f32,
}

pub struct VectorStore {
    pool: SqlitePool,
    collection: String,
    embedder: Arc<dyn Embedder>,
    /// Size a fresh collection must be filled with; otherwise the first batch decides
    expected_dimension: Option<usize>,
}

impl VectorStore {
    /// Open (or create) the store at `url` and get-or-create `collection`
    pub async fn open(url: &str, collection: &str, embedder: Arc<dyn Embedder>) -> Result<Self> {
        let pool = super::connect_pool(url, 1).await?;
        sqlx::query(CREATE_COLLECTIONS).execute(&pool).await?;
        sqlx::query(CREATE_DOCUMENTS).execute(&pool).await?;
        sqlx::query("INSERT OR IGNORE INTO vector_collections (name, space) VALUES (?1, 'cosine')")
            .bind(collection)
            .execute(&pool)
            .await?;

        log::info!("Vector store ready: {} ({})", url, collection);
        Ok(Self {
            pool,
            collection: collection.to_string(),
            embedder,
            expected_dimension: None,
        })
    }

    pub async fn from_settings(
        settings: &VectorSettings,
        embedding: &EmbeddingSettings,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self> {
        let url = format!("sqlite://{}", settings.path);
        let store = Self::open(&url, &settings.collection_name, embedder).await?;
        Ok(store.with_dimension(embedding.dimension))
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.expected_dimension = Some(dimension);
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Vector size recorded for the collection, `None` until the first add
    pub async fn dimension(&self) -> Result<Option<usize>> {
        let dimension = sqlx::query_scalar::<_, Option<i64>>(
            "SELECT dimension FROM vector_collections WHERE name = ?1",
        )
        .bind(&self.collection)
        .fetch_optional(&self.pool)
        .await?
        .flatten();
        Ok(dimension.map(|d| d as usize))
    }

    /// Embed and upsert documents.
    ///
    /// Ids default to `doc_{i}` and metadata to `{}`. Every vector must match
    /// the collection's dimension; a mismatched batch is rejected whole.
    pub async fn add_documents(
        &self,
        documents: &[String],
        metadatas: Option<Vec<Map<String, Value>>>,
        ids: Option<Vec<String>>,
    ) -> Result<()> {
        let ids = ids.unwrap_or_else(|| (0..documents.len()).map(|i| format!("doc_{}", i)).collect());
        let metadatas = metadatas.unwrap_or_else(|| vec![Map::new(); documents.len()]);

        check_len("ids", documents.len(), ids.len())?;
        check_len("metadatas", documents.len(), metadatas.len())?;

        let embeddings = self.embedder.embed_documents(documents).await?;
        check_len("embeddings", documents.len(), embeddings.len())?;

        let stored = self.dimension().await?;
        let expected = stored
            .or(self.expected_dimension)
            .or_else(|| embeddings.first().map(Vec::len));
        if let Some(expected) = expected {
            if let Some(bad) = embeddings.iter().find(|e| e.len() != expected) {
                log::error!(
                    "Rejected batch for {}: {}-dim vector, collection holds {}",
                    self.collection,
                    bad.len(),
                    expected
                );
                return Err(StorageError::DimensionMismatch(bad.len(), expected).into());
            }
        }

        let mut tx = self.pool.begin().await?;
        sqlx::query("INSERT OR IGNORE INTO vector_collections (name, space) VALUES (?1, 'cosine')")
            .bind(&self.collection)
            .execute(&mut *tx)
            .await?;
        if let (None, Some(first)) = (stored, embeddings.first()) {
            sqlx::query(
                "UPDATE vector_collections SET dimension = ?1 WHERE name = ?2 AND dimension IS NULL",
            )
            .bind(first.len() as i64)
            .bind(&self.collection)
            .execute(&mut *tx)
            .await?;
        }

        for (((id, document), metadata), embedding) in
            ids.iter().zip(documents).zip(&metadatas).zip(&embeddings)
        {
            sqlx::query(
                "INSERT INTO vector_documents (collection, id, document, metadata, embedding) \
                 VALUES (?1, ?2, ?3, ?4, ?5) \
                 ON CONFLICT(collection, id) DO UPDATE SET document = excluded.document, \
                 metadata = excluded.metadata, embedding = excluded.embedding",
            )
            .bind(&self.collection)
            .bind(id)
            .bind(document)
            .bind(serde_json::to_string(metadata)?)
            .bind(serde_json::to_string(embedding)?)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        log::info!("Added {} documents to {}", documents.len(), self.collection);
        Ok(())
    }

    /// Documents whose similarity to `query` is at least `similarity_threshold`,
    /// best first, drawn from the `top_k` nearest.
    pub async fn search(
        &self,
        query: &str,
        top_k: usize,
        similarity_threshold: f32,
    ) -> Result<Vec<SearchHit>> {
        let query_embedding = self.embedder.embed_query(query).await?;

        let rows = sqlx::query(
            "SELECT id, document, metadata, embedding FROM vector_documents WHERE collection = ?1",
        )
        .bind(&self.collection)
        .fetch_all(&self.pool)
        .await?;

        let mut scored = Vec::with_capacity(rows.len());
        for row in rows {
            let embedding: Vec<f32> = serde_json::from_str(row.try_get::<&str, _>("embedding")?)?;
            let distance = cosine_distance(&query_embedding, &embedding)?;
            scored.push((distance, row));
        }
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut hits = Vec::new();
        for (distance, row) in scored.into_iter().take(top_k) {
            let similarity = 1.0 - distance;
            // NaN fails this too
            if similarity >= similarity_threshold {
                hits.push(SearchHit {
                    id: row.try_get("id")?,
                    document: row.try_get("document")?,
                    metadata: serde_json::from_str(row.try_get::<&str, _>("metadata")?)?,
                    similarity,
                    distance,
                });
            }
        }

        Ok(hits)
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM vector_documents WHERE collection = ?1")
                .bind(&self.collection)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Drop the collection and every document in it
    pub async fn delete_collection(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM vector_documents WHERE collection = ?1")
            .bind(&self.collection)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM vector_collections WHERE name = ?1")
            .bind(&self.collection)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        log::warn!("Deleted collection: {}", self.collection);
        Ok(())
    }
}

fn check_len(field: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(StorageError::LengthMismatch {
            field,
            expected,
            actual,
        }
        .into())
    }
}

/// `1 - cos(a, b)`; a zero vector is treated as orthogonal to everything
fn cosine_distance(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(StorageError::DimensionMismatch(a.len(), b.len()).into());
    }

    let (mut dot, mut norm_a, mut norm_b) = (0.0f32, 0.0f32, 0.0f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(1.0);
    }
    Ok(1.0 - dot / (norm_a.sqrt() * norm_b.sqrt()))
}
