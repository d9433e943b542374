// SPDX-License-Identifier: MIT

//! Embedding module - text embedding trait and the OpenAI-compatible client

pub mod openai;

use crate::adk::error::{ModelError, Result};
use async_trait::async_trait;

/// Turns text into dense vectors for the vector store
#[async_trait]
pub trait Embedder: Send + Sync {
    fn model_name(&self) -> &str;

    /// Embed a batch of documents, one vector per input, in input order
    async fn embed_documents(&self, documents: &[String]) -> Result<Vec<Vec<f32>>>;

    async fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
        self.embed_documents(&[query.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::InvalidResponse("empty embedding batch".into()).into())
    }
}
