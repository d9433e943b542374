// SPDX-License-Identifier: MIT

//! Embedding factory

use super::ProviderKind;
use crate::adk::embedding::openai::OpenAIEmbedder;
use crate::adk::embedding::Embedder;
use crate::adk::error::{ModelError, Result};
use crate::butler::config::{self, EmbeddingSettings, ModelSettings};
use once_cell::sync::OnceCell;
use std::sync::{Arc, PoisonError, RwLock};

const FALLBACK_MODEL: &str = "text-embedding-ada-002";

static EMBEDDING_FACTORY: OnceCell<EmbeddingFactory> = OnceCell::new();

/// Holds the process-wide embedding client
pub struct EmbeddingFactory {
    embedding: RwLock<Arc<dyn Embedder>>,
}

impl EmbeddingFactory {
    pub fn global() -> Result<&'static EmbeddingFactory> {
        EMBEDDING_FACTORY.get_or_try_init(|| {
            let settings = config::model_settings()?;
            Self::from_settings(&settings)
        })
    }

    pub fn from_settings(settings: &ModelSettings) -> Result<Self> {
        Ok(Self {
            embedding: RwLock::new(create_embedding(&settings.embedding)?),
        })
    }

    pub fn get_embedding(&self) -> Arc<dyn Embedder> {
        self.embedding
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn reload(&self) -> Result<()> {
        let settings = config::model_settings()?;
        let embedding = create_embedding(&settings.embedding)?;
        *self.embedding.write().unwrap_or_else(PoisonError::into_inner) = embedding;
        log::info!("Embedding configuration reloaded");
        Ok(())
    }
}

pub fn create_embedding(settings: &EmbeddingSettings) -> Result<Arc<dyn Embedder>> {
    let api_key = config::resolved_secret(settings.api_key.as_deref())
        .ok_or_else(|| ModelError::ApiKeyMissing(settings.provider.clone()))?
        .to_string();

    let provider: ProviderKind = settings.provider.parse()?;
    let model_name = if provider.is_native() {
        settings.model_name.clone()
    } else {
        log::warn!(
            "{} embedding integration not implemented, falling back to the OpenAI client",
            provider
        );
        FALLBACK_MODEL.to_string()
    };

    Ok(Arc::new(OpenAIEmbedder::new(
        api_key,
        model_name,
        settings.base_url.clone(),
    )))
}

pub fn get_embedding() -> Result<Arc<dyn Embedder>> {
    Ok(EmbeddingFactory::global()?.get_embedding())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adk::error::ButlerError;

    fn settings(provider: &str, api_key: Option<&str>) -> EmbeddingSettings {
        EmbeddingSettings {
            provider: provider.to_string(),
            model_name: "text-embedding-3-small".to_string(),
            api_key: api_key.map(String::from),
            ..EmbeddingSettings::default()
        }
    }

    #[test]
    fn test_openai_uses_configured_model() {
        let embedder = create_embedding(&settings("openai", Some("sk-1"))).unwrap();
        assert_eq!(embedder.model_name(), "text-embedding-3-small");
    }

    #[test]
    fn test_qwen_degrades_to_fallback() {
        let factory = EmbeddingFactory::from_settings(&ModelSettings {
            embedding: settings("qwen", Some("sk-1")),
            ..ModelSettings::default()
        })
        .unwrap();
        assert_eq!(factory.get_embedding().model_name(), FALLBACK_MODEL);
    }

    #[test]
    fn test_missing_key_reported_before_provider() {
        let err = create_embedding(&settings("cohere", None)).err().unwrap();
        assert!(matches!(
            err,
            ButlerError::Model(ModelError::ApiKeyMissing(ref p)) if p == "cohere"
        ));
    }

    #[test]
    fn test_unsupported_provider_fails() {
        let err = create_embedding(&settings("cohere", Some("k"))).err().unwrap();
        assert!(matches!(
            err,
            ButlerError::Model(ModelError::UnsupportedProvider(_))
        ));
    }
}
