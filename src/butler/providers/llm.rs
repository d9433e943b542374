// SPDX-License-Identifier: MIT

//! LLM factory

use super::ProviderKind;
use crate::adk::error::{ModelError, Result};
use crate::adk::model::openai::OpenAIModel;
use crate::adk::model::{GenerationConfig, Model};
use crate::butler::config::{self, LlmSettings, ModelSettings};
use once_cell::sync::OnceCell;
use std::sync::{Arc, PoisonError, RwLock};

const FALLBACK_MODEL: &str = "gpt-3.5-turbo";

static LLM_FACTORY: OnceCell<LlmFactory> = OnceCell::new();

/// Holds the process-wide language-model client
pub struct LlmFactory {
    llm: RwLock<Arc<dyn Model>>,
}

impl LlmFactory {
    /// The singleton, built from `models.yaml` on first use.
    ///
    /// A failed build is not cached; the next call tries again.
    pub fn global() -> Result<&'static LlmFactory> {
        LLM_FACTORY.get_or_try_init(|| {
            let settings = config::model_settings()?;
            Self::from_settings(&settings)
        })
    }

    pub fn from_settings(settings: &ModelSettings) -> Result<Self> {
        Ok(Self {
            llm: RwLock::new(create_llm(&settings.llm)?),
        })
    }

    pub fn get_llm(&self) -> Arc<dyn Model> {
        self.llm
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reread `models.yaml` and swap in a freshly built client
    pub fn reload(&self) -> Result<()> {
        let settings = config::model_settings()?;
        self.replace(&settings)
    }

    pub fn replace(&self, settings: &ModelSettings) -> Result<()> {
        let llm = create_llm(&settings.llm)?;
        *self.llm.write().unwrap_or_else(PoisonError::into_inner) = llm;
        log::info!("LLM configuration reloaded");
        Ok(())
    }
}

/// Build a client for the configured provider
pub fn create_llm(settings: &LlmSettings) -> Result<Arc<dyn Model>> {
    let api_key = config::resolved_secret(settings.api_key.as_deref())
        .ok_or_else(|| ModelError::ApiKeyMissing(settings.provider.clone()))?
        .to_string();

    let provider: ProviderKind = settings.provider.parse()?;
    let model_name = if provider.is_native() {
        settings.model_name.clone()
    } else {
        log::warn!(
            "{} LLM integration not implemented, falling back to the OpenAI client",
            provider
        );
        FALLBACK_MODEL.to_string()
    };

    log::debug!("Using provider '{}' with model '{}'", provider, model_name);

    let model = OpenAIModel::new(api_key, model_name, settings.base_url.clone()).with_defaults(
        GenerationConfig {
            temperature: Some(settings.temperature),
            max_output_tokens: Some(settings.max_tokens),
            top_p: None,
        },
    );
    Ok(Arc::new(model))
}

/// Convenience accessor for the singleton's client
pub fn get_llm() -> Result<Arc<dyn Model>> {
    Ok(LlmFactory::global()?.get_llm())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adk::error::ButlerError;

    fn settings(provider: &str, api_key: Option<&str>) -> ModelSettings {
        ModelSettings {
            llm: LlmSettings {
                provider: provider.to_string(),
                model_name: "gpt-4o-mini".to_string(),
                api_key: api_key.map(String::from),
                ..LlmSettings::default()
            },
            ..ModelSettings::default()
        }
    }

    #[test]
    fn test_openai_uses_configured_model() {
        let factory = LlmFactory::from_settings(&settings("openai", Some("sk-1"))).unwrap();
        assert_eq!(factory.get_llm().model_name(), "gpt-4o-mini");
    }

    #[test]
    fn test_deepseek_and_qwen_degrade_to_fallback() {
        for provider in ["deepseek", "qwen"] {
            let factory = LlmFactory::from_settings(&settings(provider, Some("sk-1"))).unwrap();
            assert_eq!(factory.get_llm().model_name(), FALLBACK_MODEL);
        }
    }

    #[test]
    fn test_missing_api_key_fails() {
        for key in [None, Some(""), Some("${LLM_API_KEY}")] {
            let err = create_llm(&settings("openai", key).llm).err().unwrap();
            assert!(matches!(
                err,
                ButlerError::Model(ModelError::ApiKeyMissing(ref p)) if p == "openai"
            ));
        }
    }

    #[test]
    fn test_unsupported_provider_fails() {
        let err = create_llm(&settings("anthropic", Some("sk-1")).llm)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ButlerError::Model(ModelError::UnsupportedProvider(_))
        ));
    }

    #[test]
    fn test_replace_swaps_client() {
        let factory = LlmFactory::from_settings(&settings("deepseek", Some("sk-1"))).unwrap();
        factory.replace(&settings("openai", Some("sk-2"))).unwrap();
        assert_eq!(factory.get_llm().model_name(), "gpt-4o-mini");
    }
}
